// Refresh-token grant against the same user access-token endpoint.
//
// `grantType` switches to `refresh_token` and the code field is replaced
// by `refreshToken`; everything else matches the code exchange, including
// the camelCase JSON body. Scheduling and storage of refreshed tokens
// stay with the host.

use serde_json::Value;
use socialite_core::{Provider, Result, TokenSet};

use crate::provider::DingTalkProvider;

impl DingTalkProvider {
    /// Fields for exchanging a refresh token for a new user token.
    pub fn refresh_token_fields(&self, refresh_token: &str) -> Vec<(String, String)> {
        Self::rename_token_fields(vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("client_id".to_string(), self.config().client_id.clone()),
            (
                "client_secret".to_string(),
                self.config().client_secret.clone(),
            ),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ])
    }

    /// Exchange a refresh token and return the decoded response body.
    pub async fn refresh_access_token_response(&self, refresh_token: &str) -> Result<Value> {
        let body = Self::fields_to_json(&self.refresh_token_fields(refresh_token));

        tracing::debug!(provider = Self::IDENTIFIER, "refreshing access token");
        self.post_token_request(&body).await
    }

    /// Exchange a refresh token and parse the response into a [`TokenSet`].
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenSet> {
        let body = self.refresh_access_token_response(refresh_token).await?;
        self.token_set_from_response(body)
    }
}

#[cfg(test)]
mod tests {
    use socialite_core::ProviderConfig;

    use super::*;

    #[test]
    fn refresh_fields_are_camel_case() {
        let provider = DingTalkProvider::new(ProviderConfig::new(
            "ding-client",
            "ding-secret",
            "https://app.example.com/callback",
        ));

        let fields = provider.refresh_token_fields("R");
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(
            keys,
            vec!["grantType", "clientId", "clientSecret", "refreshToken"]
        );
        assert!(keys.iter().all(|key| !key.contains('_')));
        assert!(fields.contains(&("grantType".to_string(), "refresh_token".to_string())));
        assert!(fields.contains(&("refreshToken".to_string(), "R".to_string())));
    }
}
