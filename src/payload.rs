use std::path::{Path, PathBuf};

use error_stack::{report, ResultExt};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

/// Rows of cells, exactly as they will be sent to the spreadsheet.
pub type CellRows = Vec<Vec<Value>>;

/// Contents of the source data file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    pub spreadsheet_id: String,
    /// Sheet (tab) every range in `data` is relative to.
    pub list_name: String,
    /// Range → rows. Keeps the order of the file.
    pub data: IndexMap<String, CellRows>,
}

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Source data file \"{}\" is missing.", .0.display())]
    Missing(PathBuf),
    #[error("Could not read source data file \"{}\"", .0.display())]
    Unreadable(PathBuf),
    #[error("Source data file \"{}\" is not a valid update payload", .0.display())]
    Malformed(PathBuf),
}

impl UpdatePayload {
    #[instrument]
    pub async fn load(path: &Path) -> error_stack::Result<Self, PayloadError> {
        let exists = tokio::fs::try_exists(path)
            .await
            .change_context_lazy(|| PayloadError::Unreadable(path.to_path_buf()))?;
        if !exists {
            return Err(report!(PayloadError::Missing(path.to_path_buf())));
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .change_context_lazy(|| PayloadError::Unreadable(path.to_path_buf()))?;

        Self::parse(&contents).change_context_lazy(|| PayloadError::Malformed(path.to_path_buf()))
    }

    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_range_order() {
        let payload = UpdatePayload::parse(
            r#"{
                "spreadsheetId": "abc",
                "listName": "Sheet1",
                "data": {
                    "C1": [["c"]],
                    "A1:B2": [[1, 2], [3, 4]],
                    "B7": [["=SUM(A1:B2)"]]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(payload.spreadsheet_id, "abc");
        assert_eq!(payload.list_name, "Sheet1");
        assert_eq!(
            payload.data.keys().collect::<Vec<_>>(),
            vec!["C1", "A1:B2", "B7"]
        );
        assert_eq!(
            payload.data["A1:B2"],
            vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]]
        );
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let result = UpdatePayload::parse(r#"{"spreadsheetId": "abc", "data": {"A1": "x"}}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("update.json");

        let report = UpdatePayload::load(&path).await.unwrap_err();

        assert!(matches!(report.current_context(), PayloadError::Missing(p) if p == &path));
        assert!(report
            .current_context()
            .to_string()
            .contains(&path.display().to_string()));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("update.json");
        std::fs::write(&path, "{ not json").unwrap();

        let report = UpdatePayload::load(&path).await.unwrap_err();

        assert!(matches!(report.current_context(), PayloadError::Malformed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_load_through_a_file_is_unreadable_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("not-a-dir");
        std::fs::write(&parent, "").unwrap();
        let path = parent.join("update.json");

        let report = UpdatePayload::load(&path).await.unwrap_err();

        assert!(matches!(report.current_context(), PayloadError::Unreadable(p) if p == &path));
    }
}
