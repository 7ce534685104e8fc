use serde::Serialize;

const MISSION_OPENNESS_LEVELS: [&str; 5] = [
    "Closed to mission work; no interest in partnering.",
    "Guarded; willing to listen but unlikely to take part.",
    "Open; interested in hearing more about mission opportunities.",
    "Very open; actively looking for ways to support mission work.",
    "Fully committed; eager to partner and champion mission work.",
];

const HOSPITALITY_LEVELS: [&str; 5] = [
    "Unwelcoming; little or no hospitality was shown.",
    "Reserved; basic courtesy but no real welcome.",
    "Friendly; a warm, ordinary welcome.",
    "Very hospitable; the congregation went out of its way to welcome the team.",
    "Exceptional; the team was received as honored guests.",
];

fn level_text(levels: &'static [&'static str; 5], rating: i32) -> &'static str {
    usize::try_from(rating)
        .ok()
        .and_then(|level| level.checked_sub(1))
        .and_then(|index| levels.get(index))
        .copied()
        .unwrap_or("")
}

/// Tooltip text for a mission openness level; empty outside 1..=5.
pub fn mission_openness_description(rating: i32) -> &'static str {
    level_text(&MISSION_OPENNESS_LEVELS, rating)
}

/// Tooltip text for a hospitality level; empty outside 1..=5.
pub fn hospitality_description(rating: i32) -> &'static str {
    level_text(&HOSPITALITY_LEVELS, rating)
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingLevelDescription {
    pub rating: u8,
    pub description: &'static str,
}

/// Both description scales, as served to the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDescriptions {
    pub mission_openness: Vec<RatingLevelDescription>,
    pub hospitality: Vec<RatingLevelDescription>,
}

impl RatingDescriptions {
    pub fn all() -> Self {
        let table = |describe: fn(i32) -> &'static str| -> Vec<RatingLevelDescription> {
            (1..=5u8)
                .map(|rating| RatingLevelDescription {
                    rating,
                    description: describe(i32::from(rating)),
                })
                .collect()
        };

        Self {
            mission_openness: table(mission_openness_description),
            hospitality: table(hospitality_description),
        }
    }
}
