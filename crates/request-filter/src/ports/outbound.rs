//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the admission rules consume. The node's configuration
//! subsystem supplies `FilterConfig`; the identity/MSP layer supplies the
//! policy manager and its evaluators.

use crate::domain::entities::SignedData;
use std::sync::Arc;
use thiserror::Error;

/// Default upper bound on a request payload (1 MiB).
pub const DEFAULT_REQUEST_MAX_BYTES: u64 = 1024 * 1024;

/// Reason a policy evaluator refused a `SignedData` tuple.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The identity is not permitted under the policy.
    #[error("identity not authorized: {reason}")]
    Unauthorized { reason: String },

    /// The signature does not verify for the identity.
    #[error("invalid signature")]
    InvalidSignature,

    /// Any other evaluator failure.
    #[error("{0}")]
    Evaluation(String),
}

/// Judges whether signed data satisfies one authorization policy.
///
/// Evaluators that perform I/O own their own timeouts.
pub trait PolicyEvaluator: Send + Sync {
    fn evaluate_signed_data(&self, signed_data: &SignedData) -> Result<(), PolicyError>;
}

/// Resolves channel-scoped policies by name.
pub trait PolicyManager: Send + Sync {
    /// Returns `None` when no policy is bound to `policy_name` on the channel.
    fn get_policy(&self, channel_id: &str, policy_name: &str)
        -> Option<Arc<dyn PolicyEvaluator>>;
}

/// Point-in-time view of the filter configuration.
///
/// Replaced wholesale on channel-configuration commits. Rules read it once
/// when constructed or updated and keep their own snapshot.
pub trait FilterConfig: Send + Sync {
    fn policy_manager(&self) -> Option<Arc<dyn PolicyManager>>;

    fn client_signature_verification_required(&self) -> bool;

    fn request_max_bytes(&self) -> u64 {
        DEFAULT_REQUEST_MAX_BYTES
    }
}
