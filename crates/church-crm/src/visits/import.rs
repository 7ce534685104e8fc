//! Batch scoring input: CSV exports of visit observations, one visit per row.
//!
//! Headers are the snake_case field names (`visit_id`, `mission_openness_rating`,
//! `hospitality_rating`, `offerings_amount`, ...). Blank numeric cells read as zero
//! so partially filled spreadsheets still score.

use super::domain::VisitId;
use super::rating::VisitObservation;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug)]
pub enum ObservationImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ObservationImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationImportError::Io(err) => {
                write!(f, "failed to read visit observations: {}", err)
            }
            ObservationImportError::Csv(err) => {
                write!(f, "invalid visit observation CSV data: {}", err)
            }
        }
    }
}

impl std::error::Error for ObservationImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObservationImportError::Io(err) => Some(err),
            ObservationImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ObservationImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ObservationImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One parsed CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub visit_id: VisitId,
    pub observation: VisitObservation,
}

pub struct ObservationImporter;

impl ObservationImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ObservationRow>, ObservationImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ObservationRow>, ObservationImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for (index, record) in csv_reader.deserialize::<CsvObservation>().enumerate() {
            let row = record?;
            rows.push(row.into_row(index + 1));
        }

        Ok(rows)
    }
}

#[derive(Debug, Deserialize)]
struct CsvObservation {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    visit_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_zero")]
    mission_openness_rating: i32,
    #[serde(default, deserialize_with = "blank_as_zero")]
    hospitality_rating: i32,
    #[serde(default, deserialize_with = "blank_as_zero")]
    missionary_support_count: i64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    offerings_amount: f64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    church_members: i64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    attendees_count: i64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    visit_duration_minutes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

impl CsvObservation {
    /// Rows without an id are named after their 1-based position.
    fn into_row(self, line: usize) -> ObservationRow {
        let visit_id = VisitId(self.visit_id.unwrap_or_else(|| format!("row-{line}")));
        let visit_duration_minutes = self
            .visit_duration_minutes
            .as_deref()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|minutes| *minutes > 0);

        ObservationRow {
            visit_id,
            observation: VisitObservation {
                mission_openness_rating: self.mission_openness_rating,
                hospitality_rating: self.hospitality_rating,
                missionary_support_count: self.missionary_support_count,
                offerings_amount: self.offerings_amount,
                church_members: self.church_members,
                attendees_count: self.attendees_count,
                visit_duration_minutes,
                notes: self.notes,
            },
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn blank_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    match empty_string_as_none(deserializer)? {
        Some(raw) => raw.trim().parse::<T>().map_err(serde::de::Error::custom),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXPORT: &str = "\
visit_id,mission_openness_rating,hospitality_rating,missionary_support_count,offerings_amount,church_members,attendees_count,visit_duration_minutes,notes
v-100,4,3,2,500,100,80,90,Met with the elders
v-101,1,1,,0,10,5,,
,5,5,0,2000,200,150,0,
";

    #[test]
    fn parses_rows_and_defaults_blank_cells() {
        let rows = ObservationImporter::from_reader(Cursor::new(EXPORT)).expect("valid export");
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].visit_id, VisitId("v-100".to_string()));
        assert_eq!(rows[0].observation.offerings_amount, 500.0);
        assert_eq!(rows[0].observation.visit_duration_minutes, Some(90));
        assert_eq!(
            rows[0].observation.notes.as_deref(),
            Some("Met with the elders")
        );

        assert_eq!(rows[1].observation.missionary_support_count, 0);
        assert!(rows[1].observation.notes.is_none());

        assert_eq!(rows[2].visit_id, VisitId("row-3".to_string()));
        assert_eq!(rows[2].observation.visit_duration_minutes, None);
    }

    #[test]
    fn rejects_non_numeric_ratings() {
        let export = "visit_id,mission_openness_rating,hospitality_rating\nv-1,four,3\n";
        match ObservationImporter::from_reader(Cursor::new(export)) {
            Err(ObservationImportError::Csv(_)) => {}
            other => panic!("expected csv error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match ObservationImporter::from_path("/nonexistent/visits.csv") {
            Err(ObservationImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
