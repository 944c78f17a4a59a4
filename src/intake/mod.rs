//! Intake module.
//!
//! Submission workflow orchestration: validation, duplicate suppression,
//! protocol assignment, durable append and notification dispatch.

pub mod context;
pub mod dedup;
pub mod service;

pub use context::RequestContext;
pub use service::{IntakeOutcome, IntakeService, Submission};
