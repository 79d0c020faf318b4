use error_stack::ResultExt;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    auth::{Authenticator, GoogleOAuthEndpoint, TerminalCodeProvider, TokenStore},
    config::AppConfig,
    payload::UpdatePayload,
    routines::{Routine, UpdateRangesRoutine},
    sheets::SpreadsheetManager,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load configuration")]
    Config,
    #[error("Failed to load source data")]
    Payload,
    #[error("Failed to authorize against Google")]
    Auth,
    #[error("Failed to update spreadsheet")]
    Update,
}

/// Loads the payload, authorizes and writes every range.
#[instrument(skip(config), fields(payload = %config.payload_path.display()))]
pub async fn run(config: &AppConfig) -> error_stack::Result<(), AppError> {
    let payload = UpdatePayload::load(&config.payload_path)
        .await
        .change_context(AppError::Payload)?;
    info!(
        spreadsheet_id = %payload.spreadsheet_id,
        list_name = %payload.list_name,
        ranges = payload.data.len(),
        "Loaded source data"
    );

    let endpoint =
        GoogleOAuthEndpoint::from_credentials_file(reqwest::Client::new(), &config.credentials_path)
            .await
            .change_context(AppError::Auth)?;
    let authenticator = Authenticator::new(
        endpoint,
        TerminalCodeProvider,
        TokenStore::new(&config.token_path),
        config.scopes.clone(),
    );
    let token = authenticator
        .authorize()
        .await
        .change_context(AppError::Auth)?;

    let spreadsheet_manager = SpreadsheetManager::new(&token, &config.application_name)
        .change_context(AppError::Update)?;
    let routine = UpdateRangesRoutine::new(&payload, &spreadsheet_manager);
    info!("Running {}", routine.name());
    routine.run().await.change_context(AppError::Update)?;

    Ok(())
}
