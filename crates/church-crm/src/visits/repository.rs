use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::ChurchRatingSummary;
use super::domain::{ChurchId, VisitId};
use super::rating::{
    hospitality_description, mission_openness_description, RatingResult, VisitObservation,
};

/// Stored rating: the observation, the engine output, and when it was scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub visit_id: VisitId,
    pub church_id: ChurchId,
    pub observation: VisitObservation,
    pub result: RatingResult,
    pub rated_at: DateTime<Utc>,
}

impl RatingRecord {
    pub fn view(&self) -> VisitRatingView {
        VisitRatingView {
            visit_id: self.visit_id.clone(),
            church_id: self.church_id.clone(),
            star_rating: self.result.star_rating,
            financial_score: self.result.financial_score,
            result: self.result.clone(),
            mission_openness_description: mission_openness_description(
                self.observation.mission_openness_rating,
            ),
            hospitality_description: hospitality_description(self.observation.hospitality_rating),
            rated_at: self.rated_at,
        }
    }
}

/// Storage abstraction for per-visit ratings.
pub trait RatingRepository: Send + Sync {
    /// Must fail with `Conflict` when the visit already has a rating.
    fn insert(&self, record: RatingRecord) -> Result<RatingRecord, RepositoryError>;
    fn fetch(&self, visit_id: &VisitId) -> Result<Option<RatingRecord>, RepositoryError>;
    fn for_church(&self, church_id: &ChurchId) -> Result<Vec<RatingRecord>, RepositoryError>;
}

/// Sink for church-level aggregates (the directory's rating column, a cache, etc.).
pub trait ChurchRatingStore: Send + Sync {
    fn record_summary(&self, summary: ChurchRatingSummary) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("visit already rated")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public representation of a visit's rating, with tooltip text for the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRatingView {
    pub visit_id: VisitId,
    pub church_id: ChurchId,
    pub star_rating: u8,
    pub financial_score: f64,
    pub result: RatingResult,
    pub mission_openness_description: &'static str,
    pub hospitality_description: &'static str,
    pub rated_at: DateTime<Utc>,
}
