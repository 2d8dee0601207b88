//! # In-Memory Policy Adapters
//!
//! A map-backed `PolicyManager` and an identity allowlist evaluator. They
//! stand in for the MSP-backed policy engine during wiring and in tests;
//! neither performs any cryptographic check.

use crate::domain::entities::SignedData;
use crate::ports::outbound::{PolicyError, PolicyEvaluator, PolicyManager};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Policies keyed by channel id, then policy name.
#[derive(Default, Clone)]
pub struct InMemoryPolicyManager {
    policies: HashMap<String, HashMap<String, Arc<dyn PolicyEvaluator>>>,
}

impl InMemoryPolicyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `evaluator` to `policy_name` on `channel_id`, replacing any
    /// previous binding.
    pub fn bind(
        mut self,
        channel_id: impl Into<String>,
        policy_name: impl Into<String>,
        evaluator: Arc<dyn PolicyEvaluator>,
    ) -> Self {
        self.policies
            .entry(channel_id.into())
            .or_default()
            .insert(policy_name.into(), evaluator);
        self
    }

    /// Number of bindings across all channels.
    pub fn len(&self) -> usize {
        self.policies.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl PolicyManager for InMemoryPolicyManager {
    fn get_policy(
        &self,
        channel_id: &str,
        policy_name: &str,
    ) -> Option<Arc<dyn PolicyEvaluator>> {
        self.policies.get(channel_id)?.get(policy_name).cloned()
    }
}

/// Admits signed data whose identity is in a fixed set.
#[derive(Debug, Default, Clone)]
pub struct IdentityAllowlistPolicy {
    allowed: HashSet<Vec<u8>>,
}

impl IdentityAllowlistPolicy {
    pub fn new<I, T>(identities: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Vec<u8>>,
    {
        Self {
            allowed: identities.into_iter().map(Into::into).collect(),
        }
    }
}

impl PolicyEvaluator for IdentityAllowlistPolicy {
    fn evaluate_signed_data(&self, signed_data: &SignedData) -> Result<(), PolicyError> {
        if signed_data.signature.is_empty() {
            return Err(PolicyError::InvalidSignature);
        }
        if !self.allowed.contains(&signed_data.identity) {
            return Err(PolicyError::Unauthorized {
                reason: format!(
                    "identity {} is not a member of the policy",
                    String::from_utf8_lossy(&signed_data.identity)
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHANNEL_WRITERS;

    fn signed(identity: &[u8], signature: &[u8]) -> SignedData {
        SignedData {
            identity: identity.to_vec(),
            data: b"payload".to_vec(),
            signature: signature.to_vec(),
            channel_id: "arma".into(),
        }
    }

    #[test]
    fn test_lookup_is_channel_scoped() {
        let pm = InMemoryPolicyManager::new().bind(
            "arma",
            CHANNEL_WRITERS,
            Arc::new(IdentityAllowlistPolicy::default()),
        );

        assert!(pm.get_policy("arma", CHANNEL_WRITERS).is_some());
        assert!(pm.get_policy("other", CHANNEL_WRITERS).is_none());
        assert!(pm.get_policy("arma", "/Channel/Readers").is_none());
        assert_eq!(pm.len(), 1);
    }

    #[test]
    fn test_bind_replaces_and_counts_per_channel() {
        let pm = InMemoryPolicyManager::new()
            .bind("arma", CHANNEL_WRITERS, Arc::new(IdentityAllowlistPolicy::default()))
            .bind("arma", "/Channel/Readers", Arc::new(IdentityAllowlistPolicy::default()))
            .bind("other", CHANNEL_WRITERS, Arc::new(IdentityAllowlistPolicy::default()))
            .bind(
                "arma",
                CHANNEL_WRITERS,
                Arc::new(IdentityAllowlistPolicy::new([b"alice".to_vec()])),
            );

        assert_eq!(pm.len(), 3);
        let writers = pm.get_policy("arma", CHANNEL_WRITERS).unwrap();
        assert!(writers.evaluate_signed_data(&signed(b"alice", b"sig")).is_ok());
    }

    #[test]
    fn test_allowlist() {
        let policy = IdentityAllowlistPolicy::new([b"alice".to_vec()]);

        assert!(policy.evaluate_signed_data(&signed(b"alice", b"sig")).is_ok());
        assert!(matches!(
            policy.evaluate_signed_data(&signed(b"mallory", b"sig")),
            Err(PolicyError::Unauthorized { .. })
        ));
        assert_eq!(
            policy.evaluate_signed_data(&signed(b"alice", b"")),
            Err(PolicyError::InvalidSignature)
        );
    }
}
