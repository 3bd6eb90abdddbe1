// Authorization URL assembly — the host-standard query layout every
// provider starts from: client id, redirect URI, response type, joined
// scopes, anti-forgery state, then provider-specific extras.

use url::Url;

use crate::error::Result;

/// Inputs for [`build_authorization_url`].
#[derive(Debug, Clone)]
pub struct AuthUrlParams<'a> {
    /// Authorization endpoint base URL.
    pub endpoint: &'a str,
    pub client_id: &'a str,
    pub redirect_uri: &'a str,
    /// Scopes to request, already resolved against any config override.
    pub scopes: &'a [String],
    /// Character joining multiple scopes in the `scope` parameter.
    pub scope_separator: &'a str,
    /// Host-generated anti-forgery token, forwarded verbatim.
    pub state: &'a str,
    /// Fixed extra query parameters the provider requires.
    pub additional_params: &'a [(String, String)],
}

/// Build the provider's authorization URL. Pure construction, no network.
pub fn build_authorization_url(params: AuthUrlParams<'_>) -> Result<Url> {
    let mut url = Url::parse(params.endpoint)?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("client_id", params.client_id);
        query.append_pair("redirect_uri", params.redirect_uri);
        query.append_pair("response_type", "code");

        if !params.scopes.is_empty() {
            query.append_pair("scope", &params.scopes.join(params.scope_separator));
        }

        query.append_pair("state", params.state);

        for (key, value) in params.additional_params {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}
