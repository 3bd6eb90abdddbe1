// Boot-time registration of the DingTalk provider.

use std::sync::Arc;

use socialite_core::{Provider, SocialiteWasCalled};

use crate::provider::DingTalkProvider;

/// Binds the `"dingtalk"` identifier to [`DingTalkProvider`] when the
/// host fires its registration event. Called once per application
/// lifetime; repeat-registration semantics are the host's concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct DingTalkExtendSocialite;

impl DingTalkExtendSocialite {
    pub fn handle(&self, event: &mut SocialiteWasCalled<'_>) {
        event.extend_socialite(
            DingTalkProvider::IDENTIFIER,
            Arc::new(|config| Arc::new(DingTalkProvider::new(config)) as Arc<dyn Provider>),
        );
    }
}
