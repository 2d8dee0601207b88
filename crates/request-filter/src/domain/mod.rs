//! # Domain Layer
//!
//! Envelope structures, the envelope codec and the error taxonomy.
//! Pure logic with no I/O and no shared state.

pub mod codec;
pub mod entities;
pub mod errors;
