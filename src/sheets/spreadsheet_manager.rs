use std::fmt::Debug;

use error_stack::ResultExt;
use google_sheets4::{api::ValueRange, Sheets};
use thiserror::Error;
use tracing::{debug, instrument};

use super::{
    a1_notation::A1Notation,
    http_client::{self, HttpsConnector},
    value_range_factory::ValueRangeFactory,
};
use crate::{auth::Token, payload::CellRows};

/// How the API interprets written cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Parsed as if typed into the UI: formulas, dates and numbers are interpreted.
    #[default]
    UserEntered,
    /// Stored verbatim.
    Raw,
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to create Sheets hub")]
    FailedToCreateHub,
    #[error("Failed to write range")]
    FailedToWriteRange,
}

/// Writes one block of cells into a spreadsheet.
#[async_trait::async_trait]
pub trait RangeWriter: Send + Sync {
    async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &A1Notation,
        values: CellRows,
    ) -> error_stack::Result<(), SpreadsheetManagerError>;
}

pub struct SpreadsheetManager {
    hub: Sheets<HttpsConnector>,
    application_name: String,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ application_name: {} }}",
            self.application_name
        )
    }
}

impl SpreadsheetManager {
    /// The hub sends `token` as bearer on every call; it is not refreshed mid-run.
    /// `application_name` goes out as the user agent.
    #[instrument(name = "SpreadsheetManager::new", skip(token))]
    pub fn new(
        token: &Token,
        application_name: &str,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client =
            http_client::http_client().change_context(SpreadsheetManagerError::FailedToCreateHub)?;
        let mut hub = Sheets::new(client, token.access_token.clone());
        hub.user_agent(application_name.to_string());

        Ok(SpreadsheetManager {
            hub,
            application_name: application_name.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RangeWriter for SpreadsheetManager {
    #[instrument(skip(values))]
    async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &A1Notation,
        values: CellRows,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let value_range = ValueRange::from_rows_at(range, values);

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(value_range, spreadsheet_id, range.as_ref())
            .value_input_option(ValueInputOption::UserEntered.as_ref())
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range))?;

        debug!(
            updated_range = ?response.updated_range,
            updated_cells = ?response.updated_cells,
            "Range written"
        );
        Ok(())
    }
}
