//! Report module.
//!
//! Paginated PDF export of the complaint history: a pure layout pass
//! splits records into positioned lines per page, and a thin `lopdf`
//! layer serializes those pages with the repeating header block.

pub mod layout;
pub mod pdf;

pub use pdf::render;
