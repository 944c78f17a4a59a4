//! Error taxonomy for the intake core.
//!
//! Read-side degradation (missing or corrupt backing file) is handled
//! locally by the store and never surfaces here; only write failures and
//! report serialization failures are real errors. Authorization and
//! not-found results of deletion are expected outcomes, not errors.

use thiserror::Error;

/// A mutation of the backing file failed. The previous file contents are
/// intact because every rewrite goes through an atomic replace.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to rewrite backing file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of a password-gated deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// At least one record matched and the file was rewritten.
    Deleted,
    /// Password matched but no record carries the protocol id; no rewrite.
    NotFound,
    /// Password mismatch; no mutation performed.
    Unauthorized,
}

impl DeleteOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            DeleteOutcome::Deleted => "deleted",
            DeleteOutcome::NotFound => "not_found",
            DeleteOutcome::Unauthorized => "unauthorized",
        }
    }
}

/// PDF export failed while encoding or serializing the document.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize PDF report: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to write PDF report: {0}")]
    Write(#[from] std::io::Error),
}
