//! Concurrent `verify` against `update` and `add_rule`.
//!
//! Configs are tagged by generation. Odd generations enforce signatures with a
//! manager that admits everyone; even generations disable enforcement and
//! carry a manager that records any lookup. A verify that pairs an odd flag
//! with an even manager (a torn read) shows up as a recorded lookup.

mod common;

use common::{init_tracing, structured_request};
use request_filter::{
    AcceptRule, AdmissionVerifier, FilterConfig, PolicyError, PolicyEvaluator, PolicyManager,
    RulesVerifier, SigFilter, SignedData, CHANNEL_WRITERS,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

struct Admit;

impl PolicyEvaluator for Admit {
    fn evaluate_signed_data(&self, _signed_data: &SignedData) -> Result<(), PolicyError> {
        Ok(())
    }
}

struct TaggedManager {
    generation: u64,
    torn_reads: Arc<AtomicUsize>,
}

impl PolicyManager for TaggedManager {
    fn get_policy(
        &self,
        _channel_id: &str,
        _policy_name: &str,
    ) -> Option<Arc<dyn PolicyEvaluator>> {
        if self.generation % 2 == 0 {
            self.torn_reads.fetch_add(1, Ordering::SeqCst);
        }
        Some(Arc::new(Admit))
    }
}

struct TaggedConfig {
    generation: u64,
    torn_reads: Arc<AtomicUsize>,
}

impl FilterConfig for TaggedConfig {
    fn policy_manager(&self) -> Option<Arc<dyn PolicyManager>> {
        Some(Arc::new(TaggedManager {
            generation: self.generation,
            torn_reads: self.torn_reads.clone(),
        }))
    }

    fn client_signature_verification_required(&self) -> bool {
        self.generation % 2 == 1
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_update_is_atomic_for_concurrent_verify() {
    init_tracing();
    let torn_reads = Arc::new(AtomicUsize::new(0));
    let initial = TaggedConfig {
        generation: 1,
        torn_reads: torn_reads.clone(),
    };

    let filter = Arc::new(SigFilter::new(&initial, CHANNEL_WRITERS).unwrap());
    let verifier = Arc::new(RulesVerifier::new());
    verifier.add_rule(filter.clone());

    let stop = Arc::new(AtomicBool::new(false));
    let mut workers = Vec::new();
    for _ in 0..4 {
        let verifier = verifier.clone();
        let stop = stop.clone();
        workers.push(tokio::task::spawn_blocking(move || {
            let request = structured_request(b"data");
            let mut admitted = 0usize;
            loop {
                verifier
                    .verify(Some(&request))
                    .expect("every generation admits a well-formed request");
                admitted += 1;
                if stop.load(Ordering::Relaxed) {
                    break;
                }
            }
            admitted
        }));
    }

    let updater = {
        let verifier = verifier.clone();
        let torn_reads = torn_reads.clone();
        tokio::task::spawn_blocking(move || {
            for generation in 2..=500u64 {
                let config = TaggedConfig {
                    generation,
                    torn_reads: torn_reads.clone(),
                };
                verifier.update(&config).unwrap();
            }
        })
    };

    updater.await.unwrap();
    stop.store(true, Ordering::Relaxed);

    let mut total = 0;
    for worker in workers {
        total += worker.await.unwrap();
    }

    assert!(total > 0);
    assert_eq!(torn_reads.load(Ordering::SeqCst), 0);
    assert_eq!(filter.generation(), 499);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_add_rule_while_serving() {
    let verifier = Arc::new(RulesVerifier::new());
    verifier.add_rule(Arc::new(AcceptRule));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let verifier = verifier.clone();
            tokio::task::spawn_blocking(move || {
                let request = structured_request(b"data");
                for _ in 0..1_000 {
                    assert!(verifier.verify(Some(&request)).is_ok());
                }
            })
        })
        .collect();

    for _ in 0..100 {
        verifier.add_rule(Arc::new(AcceptRule));
    }

    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(verifier.rule_count(), 101);
}
