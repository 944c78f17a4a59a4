//! Structured logging with request context.
//!
//! Provides a request/protocol log context so every operational message
//! can be correlated back to the inbound request that caused it.

pub mod structured;

pub use structured::*;
