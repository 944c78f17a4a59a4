//! Storage module.
//!
//! Complaint record model and the flat-file record store.

pub mod model;
pub mod store;

pub use model::ComplaintRecord;
pub use store::RecordStore;
