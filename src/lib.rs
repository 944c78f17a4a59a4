//! AquaWatch Core - complaint intake and history subsystem
//!
//! This crate provides the record store, duplicate suppression, history
//! filtering and report export behind the AquaWatch municipal
//! water-quality complaint form. The web layer and the mail transport
//! are external collaborators; they call into this crate and implement
//! the [`notify::Mailer`] boundary.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `intake` - Submission workflow orchestration
//! - `storage` - Record model and flat-file store
//! - `history` - Month/year filtering over a history snapshot
//! - `report` - Paginated PDF export
//! - `notify` - Fire-and-forget email notification worker
//! - `protocol` - Protocol id and creation-stamp generation
//! - `config` - Explicit configuration passed in at construction
//! - `error` - Error taxonomy
//! - `logging` - Structured logging with request context

pub mod config;
pub mod error;
pub mod history;
pub mod intake;
pub mod logging;
pub mod notify;
pub mod protocol;
pub mod report;
pub mod storage;

pub use config::IntakeConfig;
pub use error::{DeleteOutcome, ReportError, StoreError};
pub use intake::{IntakeOutcome, IntakeService, Submission};
pub use notify::{Mailer, Notifier, OutgoingMail};
pub use storage::{ComplaintRecord, RecordStore};

/// Initialize the process-wide logger.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
