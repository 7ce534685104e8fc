//! Church visit rating: the scoring engine plus the submission, persistence, and
//! aggregation workflow that the HTTP layer drives.

pub mod aggregate;
pub mod domain;
pub mod import;
pub mod intake;
pub mod rating;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::ChurchRatingSummary;
pub use domain::{ChurchId, RatingSubmission, VisitId};
pub use import::{ObservationImportError, ObservationImporter, ObservationRow};
pub use intake::{IntakePolicy, RatingGuard, RatingValidationError};
pub use rating::{
    calculate_visit_rating, hospitality_description, mission_openness_description,
    FinancialThresholds, RatingBreakdown, RatingDescriptions, RatingEngine, RatingPolicy,
    RatingResult, ScoreWeights, ThresholdError, VisitObservation, WeightingScheme,
};
pub use repository::{
    ChurchRatingStore, RatingRecord, RatingRepository, RepositoryError, VisitRatingView,
};
pub use router::visit_rating_router;
pub use service::{RatingServiceError, VisitRatingService};
