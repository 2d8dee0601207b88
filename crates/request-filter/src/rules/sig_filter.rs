//! # Signature Filter
//!
//! Policy-gated signature rule: decodes the envelope, then, when client
//! signature verification is required, evaluates the signer against the
//! channel's policy.

use crate::adapters::config::StaticFilterConfig;
use crate::domain::codec::to_signed_data;
use crate::domain::entities::Request;
use crate::domain::errors::{ConfigError, FilterError};
use crate::ports::inbound::{Rule, UpdatableRule};
use crate::ports::outbound::{FilterConfig, PolicyManager};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Configuration captured from a `FilterConfig` at construction or update.
///
/// The manager and the enforcement flag live in one value so a reader can
/// never pair a new flag with a stale manager.
struct SigSnapshot {
    policy_manager: Option<Arc<dyn PolicyManager>>,
    verification_required: bool,
    generation: u64,
}

impl SigSnapshot {
    fn capture(config: &dyn FilterConfig, generation: u64) -> Result<Self, ConfigError> {
        let policy_manager = config.policy_manager();
        let verification_required = config.client_signature_verification_required();

        if verification_required && policy_manager.is_none() {
            return Err(ConfigError::MissingPolicyManager);
        }

        Ok(Self {
            policy_manager,
            verification_required,
            generation,
        })
    }
}

/// Admission rule that checks the signer against a channel policy.
pub struct SigFilter {
    policy_name: String,
    snapshot: RwLock<Arc<SigSnapshot>>,
}

impl SigFilter {
    /// Create a filter evaluating `policy_name` (typically
    /// [`CHANNEL_WRITERS`](crate::config::CHANNEL_WRITERS)).
    ///
    /// # Errors
    /// * `FilterError::InvalidConfig` - enforcement is on without a policy manager
    pub fn new(
        config: &dyn FilterConfig,
        policy_name: impl Into<String>,
    ) -> Result<Self, FilterError> {
        let snapshot = SigSnapshot::capture(config, 0)?;
        Ok(Self {
            policy_name: policy_name.into(),
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Create a filter evaluating the policy named in `config`'s settings.
    ///
    /// # Errors
    /// * `FilterError::InvalidConfig` - the settings fail validation, or
    ///   enforcement is on without a policy manager
    pub fn from_settings(config: &StaticFilterConfig) -> Result<Self, FilterError> {
        let settings = config.settings();
        settings.validate()?;
        Self::new(config, settings.policy_name.clone())
    }

    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    /// Generation of the active snapshot; starts at 0 and grows by one per
    /// accepted update.
    pub fn generation(&self) -> u64 {
        self.snapshot.read().generation
    }

    pub fn verification_required(&self) -> bool {
        self.snapshot.read().verification_required
    }
}

impl Rule for SigFilter {
    fn name(&self) -> &'static str {
        "sig_filter"
    }

    fn apply(&self, request: Option<&Request>) -> Result<(), FilterError> {
        let signed_data = to_signed_data(request)?;

        // One read for the whole call.
        let snapshot = self.snapshot.read().clone();

        if !snapshot.verification_required {
            trace!(
                channel_id = %signed_data.channel_id,
                "client signature verification disabled, admitting"
            );
            return Ok(());
        }

        let policy = snapshot
            .policy_manager
            .as_ref()
            .and_then(|pm| pm.get_policy(&signed_data.channel_id, &self.policy_name))
            .ok_or_else(|| {
                debug!(
                    channel_id = %signed_data.channel_id,
                    policy = %self.policy_name,
                    "no policy bound for channel"
                );
                FilterError::PolicyNotFound {
                    channel_id: signed_data.channel_id.clone(),
                    policy_name: self.policy_name.clone(),
                }
            })?;

        policy
            .evaluate_signed_data(&signed_data)
            .map_err(|source| {
                debug!(
                    channel_id = %signed_data.channel_id,
                    policy = %self.policy_name,
                    reason = %source,
                    "signature did not satisfy policy"
                );
                FilterError::PolicyNotSatisfied {
                    policy_name: self.policy_name.clone(),
                    source,
                }
            })
    }

    fn as_updatable(&self) -> Option<&dyn UpdatableRule> {
        Some(self)
    }
}

impl UpdatableRule for SigFilter {
    fn update(&self, config: &dyn FilterConfig) -> Result<(), FilterError> {
        // Build off to the side, then publish with a single swap.
        let mut next = SigSnapshot::capture(config, 0).map_err(|e| {
            warn!(policy = %self.policy_name, error = %e, "rejected sig filter update");
            FilterError::InvalidConfig(e)
        })?;

        let mut guard = self.snapshot.write();
        next.generation = guard.generation + 1;
        info!(
            policy = %self.policy_name,
            generation = next.generation,
            verification_required = next.verification_required,
            "sig filter config updated"
        );
        *guard = Arc::new(next);
        Ok(())
    }
}
