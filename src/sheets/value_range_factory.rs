use google_sheets4::api::ValueRange;
use serde_json::Value;

use super::a1_notation::A1Notation;

pub trait ValueRangeFactory {
    fn from_rows(rows: Vec<Vec<Value>>) -> Self;
    fn from_rows_at(range: &A1Notation, rows: Vec<Vec<Value>>) -> Self;
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(rows),
        }
    }

    /// The API rejects a body whose `range` differs from the request's, so it must match.
    fn from_rows_at(range: &A1Notation, rows: Vec<Vec<Value>>) -> Self {
        ValueRange {
            range: Some(range.to_string()),
            ..Self::from_rows(rows)
        }
    }
}
