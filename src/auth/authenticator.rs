use chrono::{DateTime, Utc};
use error_stack::{report, ResultExt};
use tracing::{debug, info, instrument};

use super::{
    code_provider::AuthorizationCodeProvider, oauth_endpoint::OAuthEndpoint, token::Token,
    token_store::TokenStore, AuthError,
};

/// What the cached token allows us to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    NoToken,
    Valid,
    ExpiredWithRefreshToken,
    ExpiredWithoutRefreshToken,
}

impl AuthState {
    pub fn of(token: Option<&Token>, now: DateTime<Utc>) -> Self {
        match token {
            None => AuthState::NoToken,
            Some(token) if !token.is_expired_at(now) => AuthState::Valid,
            Some(Token {
                refresh_token: Some(_),
                ..
            }) => AuthState::ExpiredWithRefreshToken,
            Some(_) => AuthState::ExpiredWithoutRefreshToken,
        }
    }
}

/// Produces a usable access token: cached, refreshed or freshly granted.
pub struct Authenticator<E, P> {
    endpoint: E,
    code_provider: P,
    store: TokenStore,
    scopes: Vec<String>,
}

impl<E, P> std::fmt::Debug for Authenticator<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("store", &self.store)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl<E: OAuthEndpoint, P: AuthorizationCodeProvider> Authenticator<E, P> {
    pub fn new(endpoint: E, code_provider: P, store: TokenStore, scopes: Vec<String>) -> Self {
        Self {
            endpoint,
            code_provider,
            store,
            scopes,
        }
    }

    /// Every newly obtained token is written back to the store.
    #[instrument(name = "Authenticator::authorize")]
    pub async fn authorize(&self) -> error_stack::Result<Token, AuthError> {
        let cached = self.store.load().change_context(AuthError::Store)?;
        let state = AuthState::of(cached.as_ref(), Utc::now());
        debug!(?state, "Inspected cached token");

        let token = match (state, cached) {
            (AuthState::Valid, Some(token)) => return Ok(token),
            (AuthState::ExpiredWithRefreshToken, Some(token)) => self.refresh(token).await?,
            _ => self.interactive().await?,
        };

        self.store
            .save(&token)
            .change_context(AuthError::Store)
            .attach_printable_lazy(|| format!("Token file: {}", self.store.path().display()))?;

        Ok(token)
    }

    async fn refresh(&self, previous: Token) -> error_stack::Result<Token, AuthError> {
        let refresh_token = previous
            .refresh_token
            .ok_or_else(|| report!(AuthError::Refresh))?;

        info!("Access token expired, refreshing");
        let mut token = self
            .endpoint
            .refresh(&refresh_token)
            .await?
            .into_token(Utc::now().timestamp())
            .change_context(AuthError::Refresh)?;

        // Google only hands out the refresh token with the first grant.
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token);
        }

        Ok(token)
    }

    async fn interactive(&self) -> error_stack::Result<Token, AuthError> {
        info!("No usable token, requesting authorization");
        let authorization_url = self.endpoint.authorization_url(&self.scopes)?;
        let code = self.code_provider.authorization_code(&authorization_url)?;

        self.endpoint
            .exchange_code(&code)
            .await?
            .into_token(Utc::now().timestamp())
            .change_context(AuthError::Exchange)
    }
}
