// Provider registry — the host's extension point. Adapter crates bind an
// identifier to a provider factory during the registration event at boot;
// the host later resolves the identifier a login request names.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::{Result, SocialiteError};
use crate::provider::Provider;

/// Builds a provider instance from per-attempt configuration.
pub type ProviderFactory = Arc<dyn Fn(ProviderConfig) -> Arc<dyn Provider> + Send + Sync>;

/// Identifier-to-factory registry of social providers.
#[derive(Clone, Default)]
pub struct SocialiteRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl fmt::Debug for SocialiteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialiteRegistry")
            .field("providers", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SocialiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an identifier to a provider factory. Re-registration under
    /// the same identifier replaces the previous binding.
    pub fn extend(&mut self, identifier: impl Into<String>, factory: ProviderFactory) {
        let identifier = identifier.into();
        tracing::debug!(provider = %identifier, "registering socialite provider");
        self.factories.insert(identifier, factory);
    }

    pub fn has(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Resolve an identifier into a configured provider instance.
    pub fn create(&self, identifier: &str, config: ProviderConfig) -> Result<Arc<dyn Provider>> {
        let factory = self
            .factories
            .get(identifier)
            .ok_or_else(|| SocialiteError::ProviderNotFound(identifier.to_string()))?;

        Ok(factory(config))
    }
}

/// The registration event handed to provider extension hooks at boot.
pub struct SocialiteWasCalled<'a> {
    registry: &'a mut SocialiteRegistry,
}

impl<'a> SocialiteWasCalled<'a> {
    pub fn new(registry: &'a mut SocialiteRegistry) -> Self {
        Self { registry }
    }

    /// Bind an identifier to a provider factory on the underlying
    /// registry.
    pub fn extend_socialite(&mut self, identifier: impl Into<String>, factory: ProviderFactory) {
        self.registry.extend(identifier, factory);
    }
}
