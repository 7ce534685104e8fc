use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::ChurchId;
use super::repository::RatingRecord;

/// Church-level rollup of every rated visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurchRatingSummary {
    pub church_id: ChurchId,
    pub rated_visits: usize,
    /// Mean star rating to two decimals; `None` until a visit is rated.
    pub average_star_rating: Option<f64>,
    /// Mean rounded half-up to whole stars.
    pub star_rating: Option<u8>,
    pub last_rated_at: Option<DateTime<Utc>>,
}

impl ChurchRatingSummary {
    pub fn empty(church_id: ChurchId) -> Self {
        Self {
            church_id,
            rated_visits: 0,
            average_star_rating: None,
            star_rating: None,
            last_rated_at: None,
        }
    }

    /// Folds the star ratings of `records` that belong to `church_id`.
    pub fn from_records(church_id: ChurchId, records: &[RatingRecord]) -> Self {
        let relevant: Vec<&RatingRecord> = records
            .iter()
            .filter(|record| record.church_id == church_id)
            .collect();

        if relevant.is_empty() {
            return Self::empty(church_id);
        }

        let total: u32 = relevant
            .iter()
            .map(|record| u32::from(record.result.star_rating))
            .sum();
        let mean = f64::from(total) / relevant.len() as f64;
        let last_rated_at = relevant.iter().map(|record| record.rated_at).max();

        Self {
            church_id,
            rated_visits: relevant.len(),
            average_star_rating: Some((mean * 100.0).round() / 100.0),
            star_rating: Some((mean + 1e-9).round().clamp(1.0, 5.0) as u8),
            last_rated_at,
        }
    }
}
