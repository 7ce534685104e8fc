use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::visits::aggregate::ChurchRatingSummary;
use crate::visits::domain::{ChurchId, RatingSubmission, VisitId};
use crate::visits::rating::{RatingPolicy, VisitObservation};
use crate::visits::repository::{
    ChurchRatingStore, RatingRecord, RatingRepository, RepositoryError,
};
use crate::visits::{visit_rating_router, VisitRatingService};

pub(super) fn church() -> ChurchId {
    ChurchId("grace-chapel".to_string())
}

pub(super) fn submission() -> RatingSubmission {
    RatingSubmission {
        church_id: church(),
        mission_openness_rating: Some(4),
        hospitality_rating: Some(3),
        missionary_support_count: Some(2),
        offerings_amount: Some(500.0),
        church_members: Some(100),
        attendees_count: Some(80),
        visit_duration_minutes: Some(95),
        notes: Some("  Pastor asked for a follow-up in spring.  ".to_string()),
    }
}

pub(super) fn no_offering_submission() -> RatingSubmission {
    RatingSubmission {
        offerings_amount: Some(0.0),
        ..submission()
    }
}

pub(super) fn observation(
    mission_openness: i32,
    hospitality: i32,
    offerings: f64,
    members: i64,
    attendees: i64,
) -> VisitObservation {
    VisitObservation {
        mission_openness_rating: mission_openness,
        hospitality_rating: hospitality,
        offerings_amount: offerings,
        church_members: members,
        attendees_count: attendees,
        ..VisitObservation::default()
    }
}

pub(super) fn build_service() -> (
    VisitRatingService<MemoryRepository, MemoryChurches>,
    Arc<MemoryRepository>,
    Arc<MemoryChurches>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let churches = Arc::new(MemoryChurches::default());
    let service =
        VisitRatingService::new(repository.clone(), churches.clone(), RatingPolicy::default());
    (service, repository, churches)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<VisitId, RatingRecord>>>,
}

impl RatingRepository for MemoryRepository {
    fn insert(&self, record: RatingRecord) -> Result<RatingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.visit_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.visit_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, visit_id: &VisitId) -> Result<Option<RatingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(visit_id).cloned())
    }

    fn for_church(&self, church_id: &ChurchId) -> Result<Vec<RatingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.church_id == church_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryChurches {
    summaries: Arc<Mutex<Vec<ChurchRatingSummary>>>,
}

impl MemoryChurches {
    pub(super) fn summaries(&self) -> Vec<ChurchRatingSummary> {
        self.summaries
            .lock()
            .expect("church mutex poisoned")
            .clone()
    }
}

impl ChurchRatingStore for MemoryChurches {
    fn record_summary(&self, summary: ChurchRatingSummary) -> Result<(), RepositoryError> {
        self.summaries
            .lock()
            .expect("church mutex poisoned")
            .push(summary);
        Ok(())
    }
}

pub(super) struct OfflineChurches;

impl ChurchRatingStore for OfflineChurches {
    fn record_summary(&self, _summary: ChurchRatingSummary) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("church table offline".to_string()))
    }
}

/// Simulates a concurrent writer landing between the duplicate check and the insert.
pub(super) struct RacingRepository;

impl RatingRepository for RacingRepository {
    fn insert(&self, _record: RatingRecord) -> Result<RatingRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _visit_id: &VisitId) -> Result<Option<RatingRecord>, RepositoryError> {
        Ok(None)
    }

    fn for_church(&self, _church_id: &ChurchId) -> Result<Vec<RatingRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl RatingRepository for UnavailableRepository {
    fn insert(&self, _record: RatingRecord) -> Result<RatingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _visit_id: &VisitId) -> Result<Option<RatingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_church(&self, _church_id: &ChurchId) -> Result<Vec<RatingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: VisitRatingService<MemoryRepository, MemoryChurches>,
) -> axum::Router {
    visit_rating_router(Arc::new(service))
}
