//! # Admission Rules
//!
//! Concrete `Rule` implementations. New rules plug into the chain through
//! the `Rule` trait without touching `RulesVerifier`.

pub mod accept;
pub mod max_size;
pub mod payload;
pub mod sig_filter;

pub use accept::AcceptRule;
pub use max_size::MaxSizeFilter;
pub use payload::PayloadNotEmptyRule;
pub use sig_filter::SigFilter;
