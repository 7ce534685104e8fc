use serde::{Deserialize, Serialize};

/// Per-person offering breakpoints, in currency units, for the 1-5 financial tiers.
pub const DEFAULT_FINANCIAL_THRESHOLDS: [f64; 4] = [6.0, 17.0, 34.0, 67.0];

/// Weights applied when an offering was made.
pub const STANDARD_WEIGHTS: ScoreWeights = ScoreWeights {
    mission_openness: 0.35,
    hospitality: 0.30,
    financial: 0.35,
};

/// Weights applied when no offering was made; the financial share moves to the
/// two observed scores so a zero offering cannot drag the average down.
pub const NO_OFFERING_WEIGHTS: ScoreWeights = ScoreWeights {
    mission_openness: 0.55,
    hospitality: 0.45,
    financial: 0.0,
};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Share of the blended average contributed by each scored dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub mission_openness: f64,
    pub hospitality: f64,
    pub financial: f64,
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.mission_openness + self.hospitality + self.financial
    }

    /// True when every weight is non-negative and they sum to one.
    pub fn is_normalized(&self) -> bool {
        let parts = [self.mission_openness, self.hospitality, self.financial];
        parts.iter().all(|weight| weight.is_finite() && *weight >= 0.0)
            && (self.total() - 1.0).abs() < WEIGHT_SUM_TOLERANCE
    }
}

/// Reasons a breakpoint table cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    #[error("expected 4 breakpoints, found {0}")]
    WrongCount(usize),
    #[error("breakpoints must be numbers")]
    NotANumber,
    #[error("breakpoints must be finite and greater than zero")]
    OutOfRange,
    #[error("breakpoints must be strictly increasing")]
    NotIncreasing,
}

/// Monotonic step table mapping offering-per-person onto tiers 1 through 5.
///
/// A value below `breakpoints[0]` is tier 1, below `breakpoints[1]` tier 2, and
/// so on; anything at or above the last breakpoint is tier 5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct FinancialThresholds {
    breakpoints: [f64; 4],
}

impl FinancialThresholds {
    pub fn new(breakpoints: [f64; 4]) -> Result<Self, ThresholdError> {
        if breakpoints
            .iter()
            .any(|value| !value.is_finite() || *value <= 0.0)
        {
            return Err(ThresholdError::OutOfRange);
        }

        if breakpoints.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ThresholdError::NotIncreasing);
        }

        Ok(Self { breakpoints })
    }

    pub fn breakpoints(&self) -> [f64; 4] {
        self.breakpoints
    }

    /// Tier for a positive offering-per-person amount.
    pub fn tier_for(&self, per_person: f64) -> u8 {
        let below = self
            .breakpoints
            .iter()
            .position(|breakpoint| per_person < *breakpoint);

        match below {
            Some(index) => index as u8 + 1,
            None => 5,
        }
    }
}

impl Default for FinancialThresholds {
    fn default() -> Self {
        Self {
            breakpoints: DEFAULT_FINANCIAL_THRESHOLDS,
        }
    }
}

impl TryFrom<[f64; 4]> for FinancialThresholds {
    type Error = ThresholdError;

    fn try_from(value: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FinancialThresholds> for [f64; 4] {
    fn from(value: FinancialThresholds) -> Self {
        value.breakpoints
    }
}

/// Immutable policy the engine scores against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPolicy {
    thresholds: FinancialThresholds,
    standard_weights: ScoreWeights,
    no_offering_weights: ScoreWeights,
}

impl RatingPolicy {
    pub fn new(
        thresholds: FinancialThresholds,
        standard_weights: ScoreWeights,
        no_offering_weights: ScoreWeights,
    ) -> Self {
        let standard_weights = if standard_weights.is_normalized() {
            standard_weights
        } else {
            STANDARD_WEIGHTS
        };

        let no_offering_weights =
            if no_offering_weights.is_normalized() && no_offering_weights.financial == 0.0 {
                no_offering_weights
            } else {
                NO_OFFERING_WEIGHTS
            };

        Self {
            thresholds,
            standard_weights,
            no_offering_weights,
        }
    }

    pub fn with_thresholds(mut self, thresholds: FinancialThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &FinancialThresholds {
        &self.thresholds
    }

    pub fn standard_weights(&self) -> &ScoreWeights {
        &self.standard_weights
    }

    pub fn no_offering_weights(&self) -> &ScoreWeights {
        &self.no_offering_weights
    }
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self {
            thresholds: FinancialThresholds::default(),
            standard_weights: STANDARD_WEIGHTS,
            no_offering_weights: NO_OFFERING_WEIGHTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_weight_sets_are_normalized() {
        assert!(STANDARD_WEIGHTS.is_normalized());
        assert!(NO_OFFERING_WEIGHTS.is_normalized());
        assert_eq!(NO_OFFERING_WEIGHTS.financial, 0.0);
    }

    #[test]
    fn default_tiers_follow_reference_table() {
        let thresholds = FinancialThresholds::default();
        assert_eq!(thresholds.tier_for(0.01), 1);
        assert_eq!(thresholds.tier_for(5.99), 1);
        assert_eq!(thresholds.tier_for(6.0), 2);
        assert_eq!(thresholds.tier_for(16.99), 2);
        assert_eq!(thresholds.tier_for(17.0), 3);
        assert_eq!(thresholds.tier_for(34.0), 4);
        assert_eq!(thresholds.tier_for(66.99), 4);
        assert_eq!(thresholds.tier_for(67.0), 5);
        assert_eq!(thresholds.tier_for(10_000.0), 5);
    }

    #[test]
    fn thresholds_reject_unordered_or_invalid_breakpoints() {
        assert_eq!(
            FinancialThresholds::new([6.0, 6.0, 34.0, 67.0]),
            Err(ThresholdError::NotIncreasing)
        );
        assert_eq!(
            FinancialThresholds::new([0.0, 17.0, 34.0, 67.0]),
            Err(ThresholdError::OutOfRange)
        );
        assert_eq!(
            FinancialThresholds::new([6.0, f64::NAN, 34.0, 67.0]),
            Err(ThresholdError::OutOfRange)
        );
    }

    #[test]
    fn thresholds_deserialize_through_validation() {
        let parsed: FinancialThresholds =
            serde_json::from_str("[5, 10, 20, 40]").expect("valid table");
        assert_eq!(parsed.breakpoints(), [5.0, 10.0, 20.0, 40.0]);

        let rejected = serde_json::from_str::<FinancialThresholds>("[40, 20, 10, 5]");
        assert!(rejected.is_err());
    }

    #[test]
    fn policy_falls_back_to_named_weights_when_overrides_are_unusable() {
        let skewed = ScoreWeights {
            mission_openness: 0.5,
            hospitality: 0.5,
            financial: 0.5,
        };
        let policy = RatingPolicy::new(FinancialThresholds::default(), skewed, skewed);

        assert_eq!(*policy.standard_weights(), STANDARD_WEIGHTS);
        assert_eq!(*policy.no_offering_weights(), NO_OFFERING_WEIGHTS);
    }
}
