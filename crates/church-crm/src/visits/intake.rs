use super::domain::RatingSubmission;
use super::rating::VisitObservation;

/// Validation errors raised before a submission reaches the rating engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingValidationError {
    #[error("church id is required")]
    MissingChurch,
    #[error("rating must include {field}")]
    MissingRating { field: &'static str },
    #[error("{field} must be between 1 and 5 (found {value})")]
    RatingOutOfRange { field: &'static str, value: i32 },
    #[error("{field} cannot be negative (found {value})")]
    NegativeCount { field: &'static str, value: i64 },
    #[error("offerings amount must be a non-negative number")]
    InvalidOfferings,
    #[error("visit duration must be greater than zero minutes")]
    InvalidDuration,
    #[error("notes exceed {max} characters")]
    NotesTooLong { max: usize },
}

const DEFAULT_MAX_NOTES_CHARS: usize = 4_000;

/// Limits applied to free-text parts of a submission.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    max_notes_chars: usize,
}

impl IntakePolicy {
    pub fn new(max_notes_chars: usize) -> Self {
        let sanitized = if max_notes_chars == 0 {
            DEFAULT_MAX_NOTES_CHARS
        } else {
            max_notes_chars
        };

        Self {
            max_notes_chars: sanitized,
        }
    }

    pub fn max_notes_chars(&self) -> usize {
        self.max_notes_chars
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NOTES_CHARS)
    }
}

/// Guard responsible for turning submissions into engine-ready observations.
#[derive(Debug, Clone, Default)]
pub struct RatingGuard {
    policy: IntakePolicy,
}

impl RatingGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn observation_from_submission(
        &self,
        submission: &RatingSubmission,
    ) -> Result<VisitObservation, RatingValidationError> {
        if submission.church_id.0.trim().is_empty() {
            return Err(RatingValidationError::MissingChurch);
        }

        let mission_openness_rating =
            required_rating("missionOpennessRating", submission.mission_openness_rating)?;
        let hospitality_rating =
            required_rating("hospitalityRating", submission.hospitality_rating)?;

        let missionary_support_count =
            optional_count("missionarySupportCount", submission.missionary_support_count)?;
        let church_members = optional_count("churchMembers", submission.church_members)?;
        let attendees_count = optional_count("attendeesCount", submission.attendees_count)?;

        let offerings_amount = match submission.offerings_amount {
            Some(amount) if !amount.is_finite() || amount < 0.0 => {
                return Err(RatingValidationError::InvalidOfferings)
            }
            Some(amount) => amount,
            None => 0.0,
        };

        if submission.visit_duration_minutes == Some(0) {
            return Err(RatingValidationError::InvalidDuration);
        }

        let notes = submission
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        if let Some(text) = &notes {
            if text.chars().count() > self.policy.max_notes_chars() {
                return Err(RatingValidationError::NotesTooLong {
                    max: self.policy.max_notes_chars(),
                });
            }
        }

        Ok(VisitObservation {
            mission_openness_rating,
            hospitality_rating,
            missionary_support_count,
            offerings_amount,
            church_members,
            attendees_count,
            visit_duration_minutes: submission.visit_duration_minutes,
            notes,
        })
    }
}

fn required_rating(field: &'static str, value: Option<i32>) -> Result<i32, RatingValidationError> {
    match value {
        None => Err(RatingValidationError::MissingRating { field }),
        Some(rating) if !(1..=5).contains(&rating) => {
            Err(RatingValidationError::RatingOutOfRange {
                field,
                value: rating,
            })
        }
        Some(rating) => Ok(rating),
    }
}

fn optional_count(field: &'static str, value: Option<i64>) -> Result<i64, RatingValidationError> {
    match value {
        Some(count) if count < 0 => Err(RatingValidationError::NegativeCount {
            field,
            value: count,
        }),
        Some(count) => Ok(count),
        None => Ok(0),
    }
}
