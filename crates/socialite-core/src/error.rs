// Error type shared across the socialite crates.
//
// Configuration problems, transport failures, and flow-level failure
// signals funnel into one enum so provider code can use `?` end to end.
// Transport errors pass through from reqwest unmodified; nothing here
// retries or remaps them.

use thiserror::Error;

/// Errors produced while driving a social login flow.
#[derive(Debug, Error)]
pub enum SocialiteError {
    /// Missing or invalid provider configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// An endpoint or redirect URI failed to parse as a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure from the underlying HTTP client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status.
    #[error("token endpoint returned {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    /// The userinfo endpoint answered with a non-success status.
    #[error("userinfo endpoint returned {status}: {body}")]
    UserEndpoint { status: u16, body: String },

    /// The callback request carried no authorization code.
    #[error("callback request carried no authorization code")]
    MissingAuthorizationCode,

    /// The token response carried no access token.
    #[error("token response carried no access token")]
    MissingAccessToken,

    /// No provider is registered under the given identifier.
    #[error("provider not registered: {0}")]
    ProviderNotFound(String),
}

/// Unified result type for socialite operations.
pub type Result<T> = std::result::Result<T, SocialiteError>;
