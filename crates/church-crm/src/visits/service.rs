use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::aggregate::ChurchRatingSummary;
use super::domain::{ChurchId, RatingSubmission, VisitId};
use super::intake::{RatingGuard, RatingValidationError};
use super::rating::{RatingEngine, RatingPolicy, RatingResult, VisitObservation};
use super::repository::{ChurchRatingStore, RatingRecord, RatingRepository, RepositoryError};

/// Service composing the submission guard, rating engine, and storage seams.
pub struct VisitRatingService<R, C> {
    guard: Arc<RatingGuard>,
    repository: Arc<R>,
    churches: Arc<C>,
    engine: Arc<RatingEngine>,
}

impl<R, C> VisitRatingService<R, C>
where
    R: RatingRepository + 'static,
    C: ChurchRatingStore + 'static,
{
    pub fn new(repository: Arc<R>, churches: Arc<C>, policy: RatingPolicy) -> Self {
        Self::with_guard(RatingGuard::default(), repository, churches, policy)
    }

    pub fn with_guard(
        guard: RatingGuard,
        repository: Arc<R>,
        churches: Arc<C>,
        policy: RatingPolicy,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            repository,
            churches,
            engine: Arc::new(RatingEngine::new(policy)),
        }
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    /// Validate, score, and persist a visit's rating, then refresh the church rollup.
    pub fn submit(
        &self,
        visit_id: VisitId,
        submission: RatingSubmission,
    ) -> Result<RatingRecord, RatingServiceError> {
        let observation = self
            .guard
            .observation_from_submission(&submission)
            .map_err(|err| {
                warn!(visit = %visit_id, error = %err, "rating submission rejected");
                err
            })?;

        if self.repository.fetch(&visit_id)?.is_some() {
            warn!(visit = %visit_id, "visit already rated");
            return Err(RepositoryError::Conflict.into());
        }

        let result = self.engine.calculate(&observation);
        let record = RatingRecord {
            visit_id,
            church_id: submission.church_id,
            observation,
            result,
            rated_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            visit = %stored.visit_id,
            church = %stored.church_id,
            stars = stored.result.star_rating,
            weighting = stored.result.weighting.label(),
            "visit rated"
        );

        self.refresh_church_summary(&stored.church_id);

        Ok(stored)
    }

    /// Best effort: the rating is already stored and `church_summary` rebuilds from the
    /// repository on read.
    fn refresh_church_summary(&self, church_id: &ChurchId) {
        let recorded = self.church_summary(church_id).and_then(|summary| {
            debug!(
                church = %summary.church_id,
                rated_visits = summary.rated_visits,
                average = ?summary.average_star_rating,
                "church rating recomputed"
            );
            self.churches
                .record_summary(summary)
                .map_err(RatingServiceError::from)
        });

        if let Err(err) = recorded {
            warn!(church = %church_id, error = %err, "church rating rollup not recorded");
        }
    }

    /// Fetch the stored rating for a visit.
    pub fn get(&self, visit_id: &VisitId) -> Result<RatingRecord, RatingServiceError> {
        let record = self
            .repository
            .fetch(visit_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn church_summary(
        &self,
        church_id: &ChurchId,
    ) -> Result<ChurchRatingSummary, RatingServiceError> {
        let records = self.repository.for_church(church_id)?;
        Ok(ChurchRatingSummary::from_records(
            church_id.clone(),
            &records,
        ))
    }

    /// Score without persisting anything.
    pub fn preview(&self, observation: &VisitObservation) -> RatingResult {
        self.engine.calculate(observation)
    }
}

/// Error raised by the visit rating service.
#[derive(Debug, thiserror::Error)]
pub enum RatingServiceError {
    #[error(transparent)]
    Validation(#[from] RatingValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
