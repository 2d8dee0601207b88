//! Fakes for the outbound ports, shared by the integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use request_filter::{
    FilterConfig, PolicyError, PolicyEvaluator, PolicyManager, Request, RequestBuilder,
    SignedData,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A structured request on channel `arma` signed by `user`.
pub fn structured_request(data: &[u8]) -> Request {
    RequestBuilder::new("arma")
        .tx_id("tx-1")
        .creator(b"user".to_vec())
        .nonce(b"nonce".to_vec())
        .data(data.to_vec())
        .signature(b"signature".to_vec())
        .build()
}

#[derive(Default)]
pub struct FakePolicyEvaluator {
    returns: Mutex<Option<PolicyError>>,
    calls: AtomicUsize,
}

impl FakePolicyEvaluator {
    pub fn evaluate_signed_data_returns(&self, result: Option<PolicyError>) {
        *self.returns.lock() = result;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PolicyEvaluator for FakePolicyEvaluator {
    fn evaluate_signed_data(&self, _signed_data: &SignedData) -> Result<(), PolicyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.returns.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct FakePolicyManager {
    returns: Mutex<Option<Arc<dyn PolicyEvaluator>>>,
    calls: AtomicUsize,
}

impl FakePolicyManager {
    pub fn get_policy_returns(&self, policy: Option<Arc<dyn PolicyEvaluator>>) {
        *self.returns.lock() = policy;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PolicyManager for FakePolicyManager {
    fn get_policy(
        &self,
        _channel_id: &str,
        _policy_name: &str,
    ) -> Option<Arc<dyn PolicyEvaluator>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.returns.lock().clone()
    }
}

#[derive(Default)]
pub struct FakeFilterConfig {
    policy_manager: Mutex<Option<Arc<dyn PolicyManager>>>,
    verification_required: Mutex<bool>,
}

impl FakeFilterConfig {
    pub fn get_policy_manager_returns(&self, pm: Arc<dyn PolicyManager>) {
        *self.policy_manager.lock() = Some(pm);
    }

    pub fn get_client_signature_verification_required_returns(&self, required: bool) {
        *self.verification_required.lock() = required;
    }
}

impl FilterConfig for FakeFilterConfig {
    fn policy_manager(&self) -> Option<Arc<dyn PolicyManager>> {
        self.policy_manager.lock().clone()
    }

    fn client_signature_verification_required(&self) -> bool {
        *self.verification_required.lock()
    }
}
