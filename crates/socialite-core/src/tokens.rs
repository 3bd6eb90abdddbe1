// Token and user records produced by a completed login flow.
//
// Both keep the provider's raw JSON body alongside the normalized fields:
// provider-specific extras (DingTalk's `corpId`, `stateCode`, ...) stay
// inspectable by the caller even after mapping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens obtained from the provider's token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub access_token: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Lifetime in seconds as reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Absolute expiry computed at parse time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Raw token response body, preserved unmodified.
    pub raw: serde_json::Value,
}

impl TokenSet {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
        raw: serde_json::Value,
    ) -> Self {
        let expires_at = expires_in.map(|secs| Utc::now() + Duration::seconds(secs));
        Self {
            access_token,
            refresh_token,
            expires_in,
            expires_at,
            raw,
        }
    }
}

/// Normalized user record returned to the application after login.
///
/// Every field degrades to `None` when the provider omits it; an empty
/// profile is the host's failure signal, not this crate's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Stable across applications of the same provider, unlike `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Complete profile response, preserved unmodified.
    pub raw: serde_json::Value,

    /// Attached by the flow driver once the exchange has succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenSet>,
}

impl SocialUser {
    pub fn with_token(mut self, token: TokenSet) -> Self {
        self.token = Some(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_set_computes_absolute_expiry() {
        let raw = serde_json::json!({"accessToken": "T", "expireIn": 7200});
        let tokens = TokenSet::new("T".to_string(), None, Some(7200), raw.clone());

        assert_eq!(tokens.access_token, "T");
        assert!(tokens.expires_at.unwrap() > Utc::now());
        assert_eq!(tokens.raw, raw);
    }

    #[test]
    fn token_set_without_expiry() {
        let tokens = TokenSet::new("T".to_string(), None, None, serde_json::Value::Null);

        assert!(tokens.expires_in.is_none());
        assert!(tokens.expires_at.is_none());
    }
}
