mod config;
mod descriptions;
mod rules;

pub use config::{
    FinancialThresholds, RatingPolicy, ScoreWeights, ThresholdError,
    DEFAULT_FINANCIAL_THRESHOLDS, NO_OFFERING_WEIGHTS, STANDARD_WEIGHTS,
};
pub use descriptions::{
    hospitality_description, mission_openness_description, RatingDescriptions,
    RatingLevelDescription,
};

use serde::{Deserialize, Serialize};

/// What was observed during a single church visit.
///
/// Fields are deliberately loose (signed, unbounded) because the engine normalizes
/// rather than rejects; range checks belong to the submission guard upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitObservation {
    pub mission_openness_rating: i32,
    pub hospitality_rating: i32,
    /// Recorded for reporting only; it never moves the star rating.
    pub missionary_support_count: i64,
    pub offerings_amount: f64,
    pub church_members: i64,
    pub attendees_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Which named weight set produced the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingScheme {
    Standard,
    NoOffering,
}

impl WeightingScheme {
    pub const fn label(self) -> &'static str {
        match self {
            WeightingScheme::Standard => "standard",
            WeightingScheme::NoOffering => "no offering",
        }
    }
}

/// Component values that fed the final score, for display and audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBreakdown {
    pub mission_openness: u8,
    pub hospitality: u8,
    pub financial: f64,
    pub missionary_bonus: f64,
    pub weighted_average: f64,
}

/// Scored outcome of a visit. Never mutated once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub star_rating: u8,
    pub financial_score: f64,
    /// Always zero; kept so existing API consumers still find the field.
    pub missionary_bonus: f64,
    pub weighting: WeightingScheme,
    pub breakdown: RatingBreakdown,
}

/// Stateless scorer that applies a rating policy to visit observations.
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    policy: RatingPolicy,
}

impl RatingEngine {
    pub fn new(policy: RatingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RatingPolicy {
        &self.policy
    }

    pub fn calculate(&self, observation: &VisitObservation) -> RatingResult {
        let mission_openness = rules::sanitize_rating(observation.mission_openness_rating);
        let hospitality = rules::sanitize_rating(observation.hospitality_rating);
        let offerings = rules::sanitize_amount(observation.offerings_amount);
        let attendees = rules::sanitize_count(observation.attendees_count);
        let members = rules::sanitize_count(observation.church_members);

        let financial =
            rules::financial_score(offerings, attendees, members, self.policy.thresholds());

        let (weighting, weights) = if offerings == 0.0 {
            (
                WeightingScheme::NoOffering,
                self.policy.no_offering_weights(),
            )
        } else {
            (WeightingScheme::Standard, self.policy.standard_weights())
        };

        let weighted_average = rules::weighted_average(
            weights,
            f64::from(mission_openness),
            f64::from(hospitality),
            financial,
        );

        let missionary_bonus = 0.0;

        RatingResult {
            star_rating: rules::to_stars(weighted_average),
            financial_score: financial,
            missionary_bonus,
            weighting,
            breakdown: RatingBreakdown {
                mission_openness,
                hospitality,
                financial,
                missionary_bonus,
                weighted_average,
            },
        }
    }
}

/// Scores an observation against the default rating policy.
pub fn calculate_visit_rating(observation: &VisitObservation) -> RatingResult {
    RatingEngine::default().calculate(observation)
}
