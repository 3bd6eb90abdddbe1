// The redirect-back request as the adapter sees it: a flat map of query
// or body parameters. The host's web layer builds one of these from the
// inbound callback before handing it to the provider.

use std::collections::HashMap;

/// Parameters of the provider's redirect back to the application.
#[derive(Debug, Clone, Default)]
pub struct CallbackRequest {
    params: HashMap<String, String>,
}

impl CallbackRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from query or form pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Read a single parameter. Absent parameters are `None`, never an
    /// error.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
