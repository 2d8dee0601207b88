//! `FilterConfig` backed by static settings.

use crate::config::FilterSettings;
use crate::ports::outbound::{FilterConfig, PolicyManager};
use std::sync::Arc;

/// Immutable filter configuration.
///
/// A fresh value is built for every channel-configuration commit and handed
/// to `RulesVerifier::update`.
#[derive(Clone)]
pub struct StaticFilterConfig {
    settings: FilterSettings,
    policy_manager: Option<Arc<dyn PolicyManager>>,
}

impl StaticFilterConfig {
    pub fn new(settings: FilterSettings) -> Self {
        Self {
            settings,
            policy_manager: None,
        }
    }

    pub fn with_policy_manager(mut self, policy_manager: Arc<dyn PolicyManager>) -> Self {
        self.policy_manager = Some(policy_manager);
        self
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }
}

impl Default for StaticFilterConfig {
    fn default() -> Self {
        Self::new(FilterSettings::default())
    }
}

impl std::fmt::Debug for StaticFilterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticFilterConfig")
            .field("settings", &self.settings)
            .field("has_policy_manager", &self.policy_manager.is_some())
            .finish()
    }
}

impl FilterConfig for StaticFilterConfig {
    fn policy_manager(&self) -> Option<Arc<dyn PolicyManager>> {
        self.policy_manager.clone()
    }

    fn client_signature_verification_required(&self) -> bool {
        self.settings.client_signature_verification_required
    }

    fn request_max_bytes(&self) -> u64 {
        self.settings.request_max_bytes
    }
}
