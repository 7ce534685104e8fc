use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for recorded visits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisitId(pub String);

/// Identifier wrapper for churches in the directory.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChurchId(pub String);

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ChurchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rating form as posted by the visit team. Every field is optional on the wire so
/// the guard can report exactly what is missing instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmission {
    pub church_id: ChurchId,
    #[serde(default)]
    pub mission_openness_rating: Option<i32>,
    #[serde(default)]
    pub hospitality_rating: Option<i32>,
    #[serde(default)]
    pub missionary_support_count: Option<i64>,
    #[serde(default)]
    pub offerings_amount: Option<f64>,
    #[serde(default)]
    pub church_members: Option<i64>,
    #[serde(default)]
    pub attendees_count: Option<i64>,
    #[serde(default)]
    pub visit_duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}
