use church_crm::visits::{
    ChurchId, ChurchRatingStore, ChurchRatingSummary, RatingRecord, RatingRepository,
    RepositoryError, VisitId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRatingRepository {
    records: Arc<Mutex<HashMap<VisitId, RatingRecord>>>,
}

impl RatingRepository for InMemoryRatingRepository {
    fn insert(&self, record: RatingRecord) -> Result<RatingRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("rating store poisoned".to_string()))?;
        if guard.contains_key(&record.visit_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.visit_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, visit_id: &VisitId) -> Result<Option<RatingRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("rating store poisoned".to_string()))?;
        Ok(guard.get(visit_id).cloned())
    }

    fn for_church(&self, church_id: &ChurchId) -> Result<Vec<RatingRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("rating store poisoned".to_string()))?;
        Ok(guard
            .values()
            .filter(|record| &record.church_id == church_id)
            .cloned()
            .collect())
    }
}

/// Latest rollup per church; stands in for the directory's rating column.
#[derive(Default, Clone)]
pub(crate) struct InMemoryChurchStore {
    summaries: Arc<Mutex<HashMap<ChurchId, ChurchRatingSummary>>>,
}

impl ChurchRatingStore for InMemoryChurchStore {
    fn record_summary(&self, summary: ChurchRatingSummary) -> Result<(), RepositoryError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("church store poisoned".to_string()))?;
        guard.insert(summary.church_id.clone(), summary);
        Ok(())
    }
}

impl InMemoryChurchStore {
    pub(crate) fn latest(&self, church_id: &ChurchId) -> Option<ChurchRatingSummary> {
        self.summaries
            .lock()
            .ok()
            .and_then(|guard| guard.get(church_id).cloned())
    }
}
