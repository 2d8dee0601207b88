//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: the rule abstraction and the admission API
//! - **Outbound (Driven)**: configuration and policy capabilities consumed
//!   by the rules

pub mod inbound;
pub mod outbound;
