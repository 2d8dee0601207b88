//! # Inbound Ports (Driving Ports / API)
//!
//! The rule abstraction and the admission entry point the node calls for
//! every inbound request.

use crate::domain::entities::Request;
use crate::domain::errors::FilterError;
use crate::ports::outbound::FilterConfig;
use std::sync::Arc;

/// A single admission rule.
///
/// Implementations must be thread-safe: `apply` is called concurrently by
/// every request-handling worker.
pub trait Rule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Admit (`Ok`) or reject the request.
    ///
    /// `None` models a transport that delivered no request at all.
    fn apply(&self, request: Option<&Request>) -> Result<(), FilterError>;

    /// Reconfiguration capability, if the rule has one.
    fn as_updatable(&self) -> Option<&dyn UpdatableRule> {
        None
    }
}

/// A rule whose configuration follows channel-configuration commits.
pub trait UpdatableRule: Rule {
    /// Replace the rule's configuration snapshot.
    ///
    /// An invalid config is rejected and the previous snapshot stays active.
    /// Calls to `apply` already in flight keep the snapshot they captured.
    fn update(&self, config: &dyn FilterConfig) -> Result<(), FilterError>;
}

/// Primary admission API.
///
/// This is the node's single entry point for "is this request admissible".
pub trait AdmissionVerifier: Send + Sync {
    /// Append a rule to the end of the chain.
    fn add_rule(&self, rule: Arc<dyn Rule>);

    /// Run every rule in registration order, stopping at the first failure.
    fn verify(&self, request: Option<&Request>) -> Result<(), FilterError>;

    /// Propagate a new configuration to every reconfigurable rule.
    ///
    /// Best effort: all updatable rules are attempted and the first error is
    /// returned. Rules that updated successfully keep their new snapshot.
    fn update(&self, config: &dyn FilterConfig) -> Result<(), FilterError>;

    fn rule_count(&self) -> usize;
}
