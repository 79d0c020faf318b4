use std::path::PathBuf;

use config::{Config, Environment, File};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const ENV_PREFIX: &str = "SHEETS_WRAPPER";

const DEFAULT_CONFIG_PATH: &str = "Config";
const DEFAULT_PAYLOAD_PATH: &str = "data/update.json";
const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";
const DEFAULT_TOKEN_PATH: &str = "token.json";
const DEFAULT_APPLICATION_NAME: &str = "Google Sheets API Rust Wrapper";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file with `spreadsheetId`, `listName` and `data`.
    pub payload_path: PathBuf,
    /// OAuth client secret downloaded from the Google Cloud console.
    pub credentials_path: PathBuf,
    /// Where the access/refresh token is cached between runs.
    pub token_path: PathBuf,
    pub application_name: String,
    pub scopes: Vec<String>,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Failed to build configuration from '{0}'")]
    Build(String),
    #[error("Failed to deserialize configuration from '{0}'")]
    Deserialize(String),
}

impl AppConfig {
    /// Defaults, overridden by the optional file named in `CONFIG_PATH`, overridden by
    /// `SHEETS_WRAPPER_*` environment variables.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = Self::builder(&config_path)
            .and_then(|builder| builder.build())
            .change_context_lazy(|| AppConfigError::Build(config_path.clone()))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context_lazy(|| AppConfigError::Deserialize(config_path.clone()))?;

        Self::from_value(value)
            .change_context_lazy(|| AppConfigError::Deserialize(config_path.clone()))
    }

    fn builder(
        config_path: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Ok(Config::builder()
            .set_default("payload_path", DEFAULT_PAYLOAD_PATH)?
            .set_default("credentials_path", DEFAULT_CREDENTIALS_PATH)?
            .set_default("token_path", DEFAULT_TOKEN_PATH)?
            .set_default("application_name", DEFAULT_APPLICATION_NAME)?
            .set_default("scopes", vec![SPREADSHEETS_SCOPE])?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("scopes"),
            ))
    }

    fn from_value(value: serde_json::Value) -> Result<Self, Report<AppConfigError>> {
        use serde::de::IntoDeserializer;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            Report::new(AppConfigError::Deserialize(e.to_string())).attach_printable(format!(
                "Field path: {}",
                path_str.trim_start_matches('.')
            ))
        })
    }
}
