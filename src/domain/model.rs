use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One spreadsheet cell as decoded, before normalization to text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Normalize to the string form used everywhere past the decode boundary.
    /// Whole numbers render without a fractional part, so an Excel roll of
    /// `5.0` comes out as `"5"`.
    pub fn into_text(self) -> String {
        match self {
            CellValue::Text(text) => text,
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Empty => String::new(),
        }
    }
}

/// One ordered row of normalized cell text.
pub type RawRow = Vec<String>;

/// A parsed student entry, pre-persistence. Guardian fields are omitted from
/// serialized output when absent rather than written as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
}

/// Destination (user, class) pair for one ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterTarget {
    pub user_id: String,
    pub class_id: String,
}

/// Parsed-but-not-yet-persisted roster, handed to the review step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedRoster {
    pub target: RosterTarget,
    pub staged_at: DateTime<Utc>,
    pub records: Vec<StudentRecord>,
    /// Rows dropped for a blank name.
    pub skipped: usize,
}

/// What extraction produced: raw rows from a tabular source, or records
/// already shaped by the vision service. Both go through the same roll
/// normalization in the transform stage.
#[derive(Debug, Clone)]
pub enum RosterInput {
    Rows(Vec<RawRow>),
    Records(Vec<StudentRecord>),
}
