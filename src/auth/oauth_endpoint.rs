use std::path::Path;

use error_stack::ResultExt;
use google_sheets4::oauth2::{self, ApplicationSecret};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::{token::Token, AuthError};

/// Used when the client secret lists no redirect uri.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Raw body of a token endpoint response, successful or not.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}: {}", description.as_deref().unwrap_or("no description"))]
pub struct OAuthErrorResponse {
    pub error: String,
    pub description: Option<String>,
}

impl TokenResponse {
    /// Fails when the endpoint answered with an `error` field.
    pub fn into_token(self, created: i64) -> Result<Token, OAuthErrorResponse> {
        if let Some(error) = self.error {
            return Err(OAuthErrorResponse {
                error,
                description: self.error_description,
            });
        }

        let access_token = self.access_token.ok_or_else(|| OAuthErrorResponse {
            error: "missing_access_token".to_string(),
            description: Some("token endpoint returned no access_token".to_string()),
        })?;

        Ok(Token {
            access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
            created: Some(created),
            scope: self.scope,
            token_type: self.token_type,
        })
    }
}

/// The two token endpoint grants plus the consent page url.
#[async_trait::async_trait]
pub trait OAuthEndpoint: Send + Sync {
    fn authorization_url(&self, scopes: &[String]) -> error_stack::Result<Url, AuthError>;

    async fn exchange_code(&self, code: &str) -> error_stack::Result<TokenResponse, AuthError>;

    async fn refresh(&self, refresh_token: &str)
        -> error_stack::Result<TokenResponse, AuthError>;
}

pub struct GoogleOAuthEndpoint {
    http: reqwest::Client,
    secret: ApplicationSecret,
}

impl std::fmt::Debug for GoogleOAuthEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleOAuthEndpoint")
            .field("client_id", &self.secret.client_id)
            .field("token_uri", &self.secret.token_uri)
            .finish()
    }
}

impl GoogleOAuthEndpoint {
    pub fn new(http: reqwest::Client, secret: ApplicationSecret) -> Self {
        Self { http, secret }
    }

    /// Reads an "installed" or "web" client secret file.
    #[instrument(skip(http))]
    pub async fn from_credentials_file(
        http: reqwest::Client,
        path: &Path,
    ) -> error_stack::Result<Self, AuthError> {
        let secret = oauth2::read_application_secret(path)
            .await
            .change_context(AuthError::Credentials)
            .attach_printable_lazy(|| format!("Credentials file: {}", path.display()))?;

        Ok(Self::new(http, secret))
    }

    fn redirect_uri(&self) -> &str {
        self.secret
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI)
    }

    async fn post_form(
        &self,
        params: &[(&str, &str)],
    ) -> error_stack::Result<TokenResponse, AuthError> {
        // Error responses come back as 400 with a JSON body, so the status is not checked.
        self.http
            .post(&self.secret.token_uri)
            .form(params)
            .send()
            .await
            .change_context(AuthError::Endpoint)?
            .json::<TokenResponse>()
            .await
            .change_context(AuthError::Endpoint)
            .attach_printable_lazy(|| format!("Token uri: {}", self.secret.token_uri))
    }
}

#[async_trait::async_trait]
impl OAuthEndpoint for GoogleOAuthEndpoint {
    fn authorization_url(&self, scopes: &[String]) -> error_stack::Result<Url, AuthError> {
        let scope = scopes.join(" ");
        Url::parse_with_params(
            &self.secret.auth_uri,
            &[
                ("response_type", "code"),
                ("client_id", self.secret.client_id.as_str()),
                ("redirect_uri", self.redirect_uri()),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "select_account consent"),
            ],
        )
        .change_context(AuthError::AuthorizationUrl)
        .attach_printable_lazy(|| format!("Auth uri: {}", self.secret.auth_uri))
    }

    #[instrument(skip(code))]
    async fn exchange_code(&self, code: &str) -> error_stack::Result<TokenResponse, AuthError> {
        debug!("Exchanging authorization code");
        self.post_form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri()),
        ])
        .await
    }

    #[instrument(skip(refresh_token))]
    async fn refresh(
        &self,
        refresh_token: &str,
    ) -> error_stack::Result<TokenResponse, AuthError> {
        debug!("Refreshing access token");
        self.post_form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
        ])
        .await
    }
}
