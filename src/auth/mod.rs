pub mod authenticator;
pub mod code_provider;
pub mod oauth_endpoint;
pub mod token;
pub mod token_store;

use thiserror::Error;

pub use authenticator::{AuthState, Authenticator};
pub use code_provider::{AuthorizationCodeProvider, TerminalCodeProvider};
pub use oauth_endpoint::{GoogleOAuthEndpoint, OAuthEndpoint};
pub use token::Token;
pub use token_store::TokenStore;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to read OAuth client credentials")]
    Credentials,
    #[error("Failed to build authorization url")]
    AuthorizationUrl,
    #[error("Failed to prompt for verification code")]
    Prompt,
    #[error("No verification code was entered")]
    MissingCode,
    #[error("Authorization code exchange was rejected")]
    Exchange,
    #[error("Access token refresh was rejected")]
    Refresh,
    #[error("Token endpoint request failed")]
    Endpoint,
    #[error("Failed to access token store")]
    Store,
}
