use super::config::{FinancialThresholds, ScoreWeights};

/// Absorbs binary representation error so `x.5` averages round up.
const ROUNDING_EPSILON: f64 = 1e-9;

pub(crate) const MIN_STARS: u8 = 1;
pub(crate) const MAX_STARS: u8 = 5;

/// Non-finite and negative amounts count as zero.
pub(crate) fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub(crate) fn sanitize_count(value: i64) -> u64 {
    value.max(0) as u64
}

/// Subjective ratings are held to 0..=5; zero marks "nothing usable observed".
pub(crate) fn sanitize_rating(value: i32) -> u8 {
    value.clamp(0, i32::from(MAX_STARS)) as u8
}

/// Attendees divide the offering; members stand in when nobody was counted.
pub(crate) fn offering_denominator(attendees: u64, members: u64) -> u64 {
    if attendees > 0 {
        attendees
    } else if members > 0 {
        members
    } else {
        1
    }
}

/// 0 for no offering, otherwise the tier of the per-person amount.
pub(crate) fn financial_score(
    offerings: f64,
    attendees: u64,
    members: u64,
    thresholds: &FinancialThresholds,
) -> f64 {
    if offerings == 0.0 {
        return 0.0;
    }

    let per_person = offerings / offering_denominator(attendees, members) as f64;
    f64::from(thresholds.tier_for(per_person))
}

pub(crate) fn weighted_average(
    weights: &ScoreWeights,
    mission_openness: f64,
    hospitality: f64,
    financial: f64,
) -> f64 {
    weights.mission_openness * mission_openness
        + weights.hospitality * hospitality
        + weights.financial * financial
}

/// Round half-up, then clamp into the star range.
pub(crate) fn to_stars(average: f64) -> u8 {
    if !average.is_finite() {
        return MIN_STARS;
    }

    let rounded = (average + ROUNDING_EPSILON).round();
    rounded.clamp(f64::from(MIN_STARS), f64::from(MAX_STARS)) as u8
}
