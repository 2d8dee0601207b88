//! # Rules Verifier
//!
//! Application service implementing `AdmissionVerifier`: an ordered,
//! reconfigurable chain of admission rules.
//!
//! ## Concurrency
//!
//! The chain is held as an `Arc<Vec<_>>` behind a lock that is only taken to
//! clone or replace the `Arc`. `verify` and `update` work on the captured
//! chain, so `add_rule` after go-live never disturbs a call in flight.

use crate::domain::entities::Request;
use crate::domain::errors::FilterError;
use crate::ports::inbound::{AdmissionVerifier, Rule};
use crate::ports::outbound::FilterConfig;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

type Chain = Arc<Vec<Arc<dyn Rule>>>;

/// Fail-fast chain of admission rules evaluated in registration order.
#[derive(Default)]
pub struct RulesVerifier {
    rules: RwLock<Chain>,
}

impl RulesVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verifier that starts with `rules`, in order.
    pub fn with_rules(rules: Vec<Arc<dyn Rule>>) -> Self {
        Self {
            rules: RwLock::new(Arc::new(rules)),
        }
    }

    /// Names of the registered rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.chain().iter().map(|rule| rule.name()).collect()
    }

    fn chain(&self) -> Chain {
        self.rules.read().clone()
    }
}

impl std::fmt::Debug for RulesVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesVerifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl AdmissionVerifier for RulesVerifier {
    fn add_rule(&self, rule: Arc<dyn Rule>) {
        let mut guard = self.rules.write();
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        debug!(rule = rule.name(), position = next.len(), "registering admission rule");
        next.push(rule);
        *guard = Arc::new(next);
    }

    fn verify(&self, request: Option<&Request>) -> Result<(), FilterError> {
        let chain = self.chain();
        for rule in chain.iter() {
            if let Err(err) = rule.apply(request) {
                debug!(rule = rule.name(), error = %err, "request rejected");
                return Err(err);
            }
        }
        trace!(rules = chain.len(), "request admitted");
        Ok(())
    }

    fn update(&self, config: &dyn FilterConfig) -> Result<(), FilterError> {
        let chain = self.chain();
        let mut first_err = None;
        let mut updated = 0usize;

        for rule in chain.iter() {
            let Some(updatable) = rule.as_updatable() else {
                continue;
            };
            match updatable.update(config) {
                Ok(()) => updated += 1,
                Err(err) => {
                    warn!(rule = rule.name(), error = %err, "rule update failed");
                    first_err.get_or_insert(err);
                }
            }
        }

        info!(
            updated,
            failed = first_err.is_some(),
            "propagated filter config to rules"
        );
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn rule_count(&self) -> usize {
        self.rules.read().len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
