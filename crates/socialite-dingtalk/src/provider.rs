// DingTalk OAuth2 provider.
//
// DingTalk follows the authorization-code flow but deviates from OAuth2
// conventions in nearly every parameter name: the callback carries
// `authCode` instead of `code`, the token exchange wants a JSON body with
// camelCase keys, the token response uses `accessToken`/`refreshToken`/
// `expireIn`, and the userinfo call authenticates through a bespoke
// header rather than a bearer token.

use async_trait::async_trait;
use serde_json::Value;
use socialite_core::provider::json_body_or_null;
use socialite_core::{
    json, standard_token_fields, CallbackRequest, Provider, ProviderConfig, Result, SocialUser,
    SocialiteError,
};

/// Authorization endpoint.
pub const AUTH_URL: &str = "https://login.dingtalk.com/oauth2/auth";

/// User access-token endpoint. Returns a token scoped to the authorizing
/// user, not the organization-level token from the legacy `gettoken` API.
pub const TOKEN_URL: &str = "https://api.dingtalk.com/v1.0/oauth2/userAccessToken";

/// Userinfo endpoint for the `me` contact.
pub const USER_URL: &str = "https://api.dingtalk.com/v1.0/contact/users/me";

/// Header carrying the access token on userinfo requests.
const ACCESS_TOKEN_HEADER: &str = "x-acs-dingtalk-access-token";

/// Token-field renames: host-standard snake_case on the left, DingTalk's
/// camelCase on the right. An explicit table rather than a generic case
/// transform, so fields added to the host's standard set later are never
/// renamed by accident.
const TOKEN_FIELD_RENAMES: &[(&str, &str)] = &[
    ("grant_type", "grantType"),
    ("client_id", "clientId"),
    ("client_secret", "clientSecret"),
    ("redirect_uri", "redirectUri"),
    ("refresh_token", "refreshToken"),
];

/// DingTalk social provider.
#[derive(Debug, Clone)]
pub struct DingTalkProvider {
    config: ProviderConfig,
}

impl DingTalkProvider {
    /// Registry identifier for this provider.
    pub const IDENTIFIER: &'static str = "dingtalk";

    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    pub(crate) fn rename_token_fields(fields: Vec<(String, String)>) -> Vec<(String, String)> {
        fields
            .into_iter()
            .map(|(key, value)| {
                let key = TOKEN_FIELD_RENAMES
                    .iter()
                    .find(|(from, _)| *from == key)
                    .map_or(key, |(_, to)| (*to).to_string());
                (key, value)
            })
            .collect()
    }

    pub(crate) fn fields_to_json(fields: &[(String, String)]) -> Value {
        let mut body = serde_json::Map::new();
        for (key, value) in fields {
            body.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(body)
    }

    /// POST a JSON body to the token endpoint and decode the response.
    pub(crate) async fn post_token_request(&self, body: &Value) -> Result<Value> {
        let response = reqwest::Client::new()
            .post(TOKEN_URL)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SocialiteError::TokenEndpoint { status, body });
        }

        json_body_or_null(response).await
    }
}

#[async_trait]
impl Provider for DingTalkProvider {
    fn identifier(&self) -> &str {
        Self::IDENTIFIER
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn auth_endpoint(&self) -> &str {
        AUTH_URL
    }

    fn token_endpoint(&self) -> &str {
        TOKEN_URL
    }

    /// `openid` alone grants the user id; `corpid` additionally grants
    /// the organization chosen during login.
    fn default_scopes(&self) -> Vec<String> {
        vec!["openid".to_string(), "corpid".to_string()]
    }

    /// DingTalk joins scopes with a space, not the conventional comma.
    fn scope_separator(&self) -> &str {
        " "
    }

    fn additional_auth_params(&self) -> Vec<(String, String)> {
        vec![("prompt".to_string(), "consent".to_string())]
    }

    /// `scopes` must be declared even though it matches the target field
    /// name: hosts that filter service-config keys by a fixed allowlist
    /// would otherwise drop it before the config reaches this provider.
    fn additional_config_keys(&self) -> &'static [&'static str] {
        &["scopes"]
    }

    /// The callback parameter is `authCode`; a request carrying only the
    /// conventional `code` has no code as far as DingTalk is concerned.
    fn get_code<'a>(&self, request: &'a CallbackRequest) -> Option<&'a str> {
        request.param("authCode")
    }

    fn get_token_fields(&self, code: &str) -> Vec<(String, String)> {
        Self::rename_token_fields(standard_token_fields(self.config(), code))
    }

    /// The exchange is a JSON POST, not the conventional form body.
    async fn get_access_token_response(&self, code: &str) -> Result<Value> {
        let body = Self::fields_to_json(&self.get_token_fields(code));

        tracing::debug!(provider = Self::IDENTIFIER, "exchanging authorization code");
        self.post_token_request(&body).await
    }

    fn parse_access_token(&self, body: &Value) -> Option<String> {
        json::str_field(body, "accessToken")
    }

    fn parse_refresh_token(&self, body: &Value) -> Option<String> {
        json::str_field(body, "refreshToken")
    }

    fn parse_expires_in(&self, body: &Value) -> Option<i64> {
        json::int_field(body, "expireIn")
    }

    async fn get_user_by_token(&self, token: &str) -> Result<Value> {
        tracing::debug!(provider = Self::IDENTIFIER, "fetching user profile");
        let response = reqwest::Client::new()
            .get(USER_URL)
            .header(ACCESS_TOKEN_HEADER, token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SocialiteError::UserEndpoint { status, body });
        }

        json_body_or_null(response).await
    }

    /// `openId` is unique per user per application; `unionId` is stable
    /// for the user across applications of the same organization. The
    /// profile carries no display-name field beyond `nick`, so `mobile`
    /// fills the `name` slot. `stateCode` stays available through `raw`.
    fn map_user_to_object(&self, user: &Value) -> SocialUser {
        SocialUser {
            id: json::str_field(user, "openId"),
            union_id: json::str_field(user, "unionId"),
            nickname: json::str_field(user, "nick"),
            name: json::str_field(user, "mobile"),
            email: json::str_field(user, "email"),
            avatar: json::str_field(user, "avatarUrl"),
            raw: user.clone(),
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> DingTalkProvider {
        DingTalkProvider::new(ProviderConfig::new(
            "ding-client",
            "ding-secret",
            "https://app.example.com/callback",
        ))
    }

    #[test]
    fn default_scopes_unless_overridden() {
        assert_eq!(provider().get_scopes(), vec!["openid", "corpid"]);

        let overridden = DingTalkProvider::new(
            ProviderConfig::new("id", "secret", "https://app.example.com/callback")
                .with_scopes(&["openid"]),
        );
        assert_eq!(overridden.get_scopes(), vec!["openid"]);
    }

    #[test]
    fn auth_url_joins_scopes_with_space_and_prompts_consent() {
        let url = provider().get_auth_url("random-state").unwrap().to_string();

        assert!(url.starts_with("https://login.dingtalk.com/oauth2/auth?"));
        assert!(url.contains("client_id=ding-client"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback"));
        assert!(url.contains("response_type=code"));
        // space-joined and form-encoded, never comma-joined
        assert!(url.contains("scope=openid+corpid"));
        assert!(!url.contains("%2C"));
        assert!(url.contains("state=random-state"));
        assert!(url.contains("prompt=consent"));
    }

    #[test]
    fn code_is_read_from_auth_code_only() {
        let provider = provider();

        let request = CallbackRequest::from_pairs([("authCode", "ABC")]);
        assert_eq!(provider.get_code(&request), Some("ABC"));

        let request = CallbackRequest::from_pairs([("code", "ABC")]);
        assert_eq!(provider.get_code(&request), None);
    }

    #[test]
    fn token_fields_are_camel_case() {
        let fields = provider().get_token_fields("ABC");
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(
            keys,
            vec!["grantType", "clientId", "clientSecret", "code", "redirectUri"]
        );
        assert!(keys.iter().all(|key| !key.contains('_')));
        assert!(fields.contains(&("code".to_string(), "ABC".to_string())));
        assert!(fields.contains(&("grantType".to_string(), "authorization_code".to_string())));
        assert!(fields.contains(&("clientId".to_string(), "ding-client".to_string())));
    }

    #[test]
    fn token_fields_serialize_to_json_object() {
        let provider = provider();
        let body = DingTalkProvider::fields_to_json(&provider.get_token_fields("ABC"));

        assert_eq!(body["clientId"], "ding-client");
        assert_eq!(body["clientSecret"], "ding-secret");
        assert_eq!(body["grantType"], "authorization_code");
        assert_eq!(body["code"], "ABC");
        assert_eq!(body["redirectUri"], "https://app.example.com/callback");
    }

    #[test]
    fn parses_camel_case_token_response() {
        let provider = provider();
        let body = serde_json::json!({
            "accessToken": "T",
            "refreshToken": "R",
            "expireIn": 7200,
        });

        assert_eq!(provider.parse_access_token(&body), Some("T".to_string()));
        assert_eq!(provider.parse_refresh_token(&body), Some("R".to_string()));
        assert_eq!(provider.parse_expires_in(&body), Some(7200));

        let empty = serde_json::json!({});
        assert_eq!(provider.parse_access_token(&empty), None);
        assert_eq!(provider.parse_refresh_token(&empty), None);
        assert_eq!(provider.parse_expires_in(&empty), None);
    }

    #[test]
    fn token_set_keeps_corp_id_in_raw() {
        let provider = provider();
        let body = serde_json::json!({
            "accessToken": "T",
            "refreshToken": "R",
            "expireIn": 7200,
            "corpId": "corpxxxx",
        });

        let token = provider.token_set_from_response(body).unwrap();
        assert_eq!(token.access_token, "T");
        assert_eq!(token.refresh_token, Some("R".to_string()));
        assert_eq!(token.expires_in, Some(7200));
        assert_eq!(token.raw["corpId"], "corpxxxx");
    }

    #[test]
    fn maps_profile_to_normalized_user() {
        let profile = serde_json::json!({
            "openId": "123",
            "unionId": "U1",
            "nick": "zhangsan",
            "avatarUrl": "https://x",
            "mobile": "150xxxx9144",
            "email": "a@b.com",
            "stateCode": "86",
        });

        let user = provider().map_user_to_object(&profile);

        assert_eq!(user.id, Some("123".to_string()));
        assert_eq!(user.union_id, Some("U1".to_string()));
        assert_eq!(user.nickname, Some("zhangsan".to_string()));
        assert_eq!(user.avatar, Some("https://x".to_string()));
        assert_eq!(user.name, Some("150xxxx9144".to_string()));
        assert_eq!(user.email, Some("a@b.com".to_string()));
        assert_eq!(user.raw, profile);
        assert!(user.token.is_none());
    }

    #[test]
    fn maps_empty_profile_without_raising() {
        let profile = serde_json::json!({});
        let user = provider().map_user_to_object(&profile);

        assert!(user.id.is_none());
        assert!(user.union_id.is_none());
        assert!(user.nickname.is_none());
        assert!(user.name.is_none());
        assert!(user.email.is_none());
        assert!(user.avatar.is_none());
        assert_eq!(user.raw, profile);
    }

    #[tokio::test]
    async fn callback_with_conventional_code_field_is_a_failed_callback() {
        let request = CallbackRequest::from_pairs([("code", "ABC"), ("state", "xyz")]);

        let err = provider().user_from_callback(&request).await.unwrap_err();
        assert!(matches!(err, SocialiteError::MissingAuthorizationCode));
    }
}
