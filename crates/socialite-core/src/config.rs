// Provider configuration — supplied by the host once per login attempt
// and immutable for the lifetime of that flow.

use serde::Deserialize;

use crate::error::{Result, SocialiteError};

/// Per-provider configuration: client credentials, redirect URI, and an
/// optional scope override.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// OAuth client ID.
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: String,

    /// Redirect URI for the callback.
    pub redirect_uri: String,

    /// When present, replaces the provider's default scopes entirely.
    /// Normalized at construction: an empty override is stored as `None`.
    pub scopes: Option<Vec<String>>,
}

/// Raw service configuration as the host hands it over.
///
/// `redirect` rather than `redirect_uri` on the wire — the host's
/// conventional service-config key.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    redirect: Option<String>,
    #[serde(default)]
    scopes: Option<ScopeList>,
}

/// `scopes` may arrive as a single string or a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScopeList {
    One(String),
    Many(Vec<String>),
}

impl ScopeList {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(scope) => vec![scope],
            Self::Many(scopes) => scopes,
        }
    }
}

impl ProviderConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes: None,
        }
    }

    /// Override the provider's default scopes. An empty list clears the
    /// override instead of storing it.
    pub fn with_scopes(mut self, scopes: &[&str]) -> Self {
        self.scopes = if scopes.is_empty() {
            None
        } else {
            Some(scopes.iter().map(|s| (*s).to_string()).collect())
        };
        self
    }

    /// Build a config from the host's JSON service mapping.
    ///
    /// Recognized keys: `client_id`, `client_secret`, `redirect`, plus
    /// whatever the provider declares via `additional_config_keys`
    /// (`scopes` here). Unrecognized keys are ignored. Missing or empty
    /// required keys are a configuration error.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let raw: RawConfig = serde_json::from_value(value.clone())
            .map_err(|e| SocialiteError::Config(format!("invalid service config: {e}")))?;

        let client_id = require(raw.client_id, "client_id")?;
        let client_secret = require(raw.client_secret, "client_secret")?;
        let redirect_uri = require(raw.redirect, "redirect")?;

        let scopes = raw
            .scopes
            .map(ScopeList::into_vec)
            .filter(|scopes| !scopes.is_empty());

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            scopes,
        })
    }
}

fn require(field: Option<String>, name: &str) -> Result<String> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SocialiteError::Config(format!("missing `{name}`"))),
    }
}
