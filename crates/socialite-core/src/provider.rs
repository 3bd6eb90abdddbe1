// The Provider trait — the capability set every social provider
// implements, with default bodies carrying the host-standard behavior:
// comma-joined scopes, a `code` callback field, snake_case token fields
// posted as a form body, snake_case token parsing. Providers override
// exactly the pieces where their API deviates.
//
// The flow driver at the bottom runs the fixed authorization-code
// sequence: extract-code -> exchange-token -> fetch-profile -> map-profile.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::auth_url::{build_authorization_url, AuthUrlParams};
use crate::config::ProviderConfig;
use crate::error::{Result, SocialiteError};
use crate::json;
use crate::request::CallbackRequest;
use crate::tokens::{SocialUser, TokenSet};

/// The host-standard token-exchange field set. Providers that rename or
/// reshape fields start from this and rewrite it.
pub fn standard_token_fields(config: &ProviderConfig, code: &str) -> Vec<(String, String)> {
    vec![
        ("grant_type".to_string(), "authorization_code".to_string()),
        ("client_id".to_string(), config.client_id.clone()),
        ("client_secret".to_string(), config.client_secret.clone()),
        ("code".to_string(), code.to_string()),
        ("redirect_uri".to_string(), config.redirect_uri.clone()),
    ]
}

/// Decode a response body as JSON, degrading to `Value::Null` when the
/// body is not valid JSON. Field accessors downstream treat the null
/// mapping as empty, so a garbled body surfaces as a failed exchange at
/// the flow level rather than a decode error here.
pub async fn json_body_or_null(response: reqwest::Response) -> Result<Value> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
}

/// A social identity provider.
///
/// Implementations supply their endpoints and profile mapping; the
/// defaulted methods cover providers that follow OAuth2 conventions
/// as-is.
#[async_trait]
pub trait Provider: Send + Sync + fmt::Debug {
    /// Registry identifier (e.g. "dingtalk").
    fn identifier(&self) -> &str;

    /// The configuration injected at construction.
    fn config(&self) -> &ProviderConfig;

    /// Authorization endpoint URL.
    fn auth_endpoint(&self) -> &str;

    /// Token endpoint URL.
    fn token_endpoint(&self) -> &str;

    /// Scopes requested when the configuration carries no override.
    fn default_scopes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Character joining multiple scopes in the authorization URL.
    fn scope_separator(&self) -> &str {
        ","
    }

    /// Fixed extra query parameters for the authorization URL.
    fn additional_auth_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Extra service-config keys this provider consumes beyond the
    /// standard credential keys. Hosts that filter unknown keys before
    /// building a [`ProviderConfig`] keep the listed ones.
    fn additional_config_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Scopes for this login attempt: a non-empty config override
    /// replaces the provider defaults entirely.
    fn get_scopes(&self) -> Vec<String> {
        match &self.config().scopes {
            Some(scopes) if !scopes.is_empty() => scopes.clone(),
            _ => self.default_scopes(),
        }
    }

    /// Build the authorization URL for the given anti-forgery state.
    fn get_auth_url(&self, state: &str) -> Result<Url> {
        let scopes = self.get_scopes();
        let additional = self.additional_auth_params();
        build_authorization_url(AuthUrlParams {
            endpoint: self.auth_endpoint(),
            client_id: &self.config().client_id,
            redirect_uri: &self.config().redirect_uri,
            scopes: &scopes,
            scope_separator: self.scope_separator(),
            state,
            additional_params: &additional,
        })
    }

    /// Extract the authorization code from the callback request.
    fn get_code<'a>(&self, request: &'a CallbackRequest) -> Option<&'a str> {
        request.param("code")
    }

    /// Fields sent to the token endpoint when exchanging a code.
    fn get_token_fields(&self, code: &str) -> Vec<(String, String)> {
        standard_token_fields(self.config(), code)
    }

    /// Exchange an authorization code at the token endpoint and return
    /// the decoded response body.
    async fn get_access_token_response(&self, code: &str) -> Result<Value> {
        let fields = self.get_token_fields(code);

        tracing::debug!(provider = self.identifier(), "exchanging authorization code");
        let response = reqwest::Client::new()
            .post(self.token_endpoint())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&fields)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SocialiteError::TokenEndpoint { status, body });
        }

        json_body_or_null(response).await
    }

    /// Access token from the token response body, if present.
    fn parse_access_token(&self, body: &Value) -> Option<String> {
        json::str_field(body, "access_token")
    }

    /// Refresh token from the token response body, if present.
    fn parse_refresh_token(&self, body: &Value) -> Option<String> {
        json::str_field(body, "refresh_token")
    }

    /// Token lifetime in seconds from the token response body, if present.
    fn parse_expires_in(&self, body: &Value) -> Option<i64> {
        json::int_field(body, "expires_in")
    }

    /// Assemble a [`TokenSet`] from a token response body. An absent or
    /// empty access token is the exchange-failed signal.
    fn token_set_from_response(&self, body: Value) -> Result<TokenSet> {
        let access_token = self
            .parse_access_token(&body)
            .filter(|token| !token.is_empty())
            .ok_or(SocialiteError::MissingAccessToken)?;

        let refresh_token = self.parse_refresh_token(&body);
        let expires_in = self.parse_expires_in(&body);
        Ok(TokenSet::new(access_token, refresh_token, expires_in, body))
    }

    /// Fetch the raw profile for an access token.
    async fn get_user_by_token(&self, token: &str) -> Result<Value>;

    /// Map a raw profile onto the normalized user record. Pure, no I/O;
    /// missing source keys yield absent target fields.
    fn map_user_to_object(&self, user: &Value) -> SocialUser;

    /// Run the exchange-and-fetch tail of the flow for a known code.
    async fn user_from_code(&self, code: &str) -> Result<SocialUser> {
        let body = self.get_access_token_response(code).await?;
        let token = self.token_set_from_response(body)?;
        let profile = self.get_user_by_token(&token.access_token).await?;
        let user = self.map_user_to_object(&profile);
        Ok(user.with_token(token))
    }

    /// Run the full callback half of the flow: extract the code, exchange
    /// it, fetch the profile, and map it.
    async fn user_from_callback(&self, request: &CallbackRequest) -> Result<SocialUser> {
        let code = self
            .get_code(request)
            .ok_or(SocialiteError::MissingAuthorizationCode)?
            .to_string();

        self.user_from_code(&code).await
    }
}
