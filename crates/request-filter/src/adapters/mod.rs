//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports used for wiring a node
//! and for tests.

pub mod config;
pub mod policy;
