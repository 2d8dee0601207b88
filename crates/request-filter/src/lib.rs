//! # Request Filter
//!
//! Admission layer of the ordering node: every inbound transaction envelope
//! passes an ordered chain of rules before it may enter batching and
//! consensus.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Wire messages, envelope codec, errors
//! - **Ports Layer** (`ports/`): `Rule` / `AdmissionVerifier` and the
//!   `FilterConfig` / `PolicyManager` / `PolicyEvaluator` capabilities
//! - **Rules** (`rules/`): `SigFilter` and the supporting admission rules
//! - **Service Layer** (`service.rs`): `RulesVerifier`, the rule chain
//! - **Adapters** (`adapters/`): Static config and in-memory policies
//!
//! ## Request Flow
//!
//! ```text
//! Request ──→ RulesVerifier::verify ──→ rule 1 ──→ rule 2 ──→ ... ──→ admitted
//!                                         │          │
//!                                         └──────────┴──→ first error, returned as-is
//! ```
//!
//! ## Reconfiguration
//!
//! On a channel-configuration commit the node builds a new `FilterConfig`
//! and calls `RulesVerifier::update`. Each reconfigurable rule captures a
//! fresh snapshot and publishes it with a single swap; `apply` reads its
//! snapshot once per call, so a request never observes a mix of old and new
//! settings.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod rules;
pub mod service;

// Re-export public API
pub use adapters::config::StaticFilterConfig;
pub use adapters::policy::{IdentityAllowlistPolicy, InMemoryPolicyManager};
pub use config::{FilterSettings, CHANNEL_ADMINS, CHANNEL_READERS, CHANNEL_WRITERS};
pub use domain::codec::to_signed_data;
pub use domain::entities::{
    ChannelHeader, Header, Payload, Request, RequestBuilder, SignatureHeader, SignedData,
};
pub use domain::errors::{ConfigError, ConversionError, FilterError};
pub use ports::inbound::{AdmissionVerifier, Rule, UpdatableRule};
pub use ports::outbound::{FilterConfig, PolicyError, PolicyEvaluator, PolicyManager};
pub use rules::{AcceptRule, MaxSizeFilter, PayloadNotEmptyRule, SigFilter};
pub use service::RulesVerifier;
