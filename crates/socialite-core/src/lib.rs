#![doc = include_str!("../README.md")]

pub mod auth_url;
pub mod config;
pub mod error;
pub mod json;
pub mod provider;
pub mod registry;
pub mod request;
pub mod tokens;

// Re-exports for convenience
pub use auth_url::{build_authorization_url, AuthUrlParams};
pub use config::ProviderConfig;
pub use error::{Result, SocialiteError};
pub use provider::{json_body_or_null, standard_token_fields, Provider};
pub use registry::{ProviderFactory, SocialiteRegistry, SocialiteWasCalled};
pub use request::CallbackRequest;
pub use tokens::{SocialUser, TokenSet};
