//! Complaint record model.
//!
//! Field names are the backing-file schema: the JSON history is a
//! top-level array of these objects, rewritten in full on every mutation.

use serde::{Deserialize, Serialize};

/// One citizen-filed complaint in the history store.
///
/// Immutable once created; removed only via password-gated deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    /// Unique, time-ordered id assigned at creation.
    pub protocol_id: String,
    /// Display-formatted creation stamp, `DD/MM/YYYY HH:MM`.
    pub created_at: String,
    pub reporter_name: String,
    pub complaint_type: String,
    #[serde(default)]
    pub problem_subtype: String,
    pub location: String,
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
}

impl ComplaintRecord {
    /// The eight labelled lines a record contributes to the PDF report,
    /// in fixed display order.
    pub fn report_lines(&self) -> [String; 8] {
        [
            format!("Protocol: {}", self.protocol_id),
            format!("Date: {}", self.created_at),
            format!("Reporter: {}", self.reporter_name),
            format!("Type: {}", self.complaint_type),
            format!("Location: {}", self.location),
            format!("Address: {}", self.address),
            format!("Email: {}", self.contact_email),
            format!("Phone: {}", self.contact_phone),
        ]
    }
}
