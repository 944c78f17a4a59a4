//! Intake orchestration.
//!
//! Coordinates the full submission workflow:
//! 1. Required-field validation (configurable set)
//! 2. Duplicate check against the stored history
//! 3. Protocol id and creation-stamp assignment
//! 4. Durable append
//! 5. Fire-and-forget notification when an address was supplied
//!
//! Also exposes the history/delete/export operations so the web layer
//! talks to a single type.

use std::sync::Arc;

use crate::config::IntakeConfig;
use crate::error::{DeleteOutcome, ReportError, StoreError};
use crate::notify::{Mailer, Notifier, DEFAULT_QUEUE_CAPACITY};
use crate::storage::{ComplaintRecord, RecordStore};
use crate::{history, protocol, report};

use super::context::RequestContext;
use super::dedup;

/// Reporter-supplied fields of a new complaint, before a protocol id and
/// creation stamp are assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub reporter_name: String,
    pub complaint_type: String,
    pub problem_subtype: String,
    pub location: String,
    pub address: String,
    pub description: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl Submission {
    /// Look up a field by its configured name.
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "reporter_name" => Some(&self.reporter_name),
            "complaint_type" => Some(&self.complaint_type),
            "problem_subtype" => Some(&self.problem_subtype),
            "location" => Some(&self.location),
            "address" => Some(&self.address),
            "description" => Some(&self.description),
            "contact_email" => Some(&self.contact_email),
            "contact_phone" => Some(&self.contact_phone),
            _ => None,
        }
    }

    /// Whitespace-trimmed copy, applied once at the intake boundary.
    fn trimmed(&self) -> Self {
        Self {
            reporter_name: self.reporter_name.trim().to_string(),
            complaint_type: self.complaint_type.trim().to_string(),
            problem_subtype: self.problem_subtype.trim().to_string(),
            location: self.location.trim().to_string(),
            address: self.address.trim().to_string(),
            description: self.description.trim().to_string(),
            contact_email: self.contact_email.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
        }
    }
}

/// Result of one submission.
#[derive(Debug)]
pub enum IntakeOutcome {
    /// Durably recorded; notification queued when an address was given.
    Recorded(ComplaintRecord),
    /// Exact duplicate of a stored record on the key tuple. Nothing is
    /// stored; the web layer shows the same redirect as a success.
    Duplicate,
    /// Required fields missing; nothing is stored.
    Rejected { missing: Vec<String> },
}

pub struct IntakeService {
    config: IntakeConfig,
    store: RecordStore,
    notifier: Option<Notifier>,
}

impl IntakeService {
    /// Service without notification, for deployments with no mail
    /// transport configured.
    pub fn new(config: IntakeConfig) -> Self {
        let store = RecordStore::new(&config);
        Self {
            config,
            store,
            notifier: None,
        }
    }

    pub fn with_mailer(config: IntakeConfig, mailer: Arc<dyn Mailer>) -> Self {
        let store = RecordStore::new(&config);
        Self {
            config,
            store,
            notifier: Some(Notifier::new(mailer, DEFAULT_QUEUE_CAPACITY)),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Run the full intake workflow for one submission.
    pub fn submit(&self, submission: Submission) -> Result<IntakeOutcome, StoreError> {
        let ctx = RequestContext::new().log_context();
        let submission = submission.trimmed();

        log::info!(
            "{} SUBMISSION_RECEIVED type={} location={}",
            ctx,
            submission.complaint_type,
            submission.location
        );

        let missing = self.missing_required(&submission);
        if !missing.is_empty() {
            log::info!("{} SUBMISSION_REJECTED missing={:?}", ctx, missing);
            return Ok(IntakeOutcome::Rejected { missing });
        }

        let existing = self.store.load_all();
        if dedup::is_duplicate(&submission, &existing) {
            // Silently suppressed: externally indistinguishable from a
            // success, the record is just never stored.
            log::info!(
                "{} SUBMISSION_DUPLICATE reporter={}",
                ctx,
                submission.reporter_name
            );
            return Ok(IntakeOutcome::Duplicate);
        }

        let record = ComplaintRecord {
            protocol_id: protocol::generate(),
            created_at: protocol::display_timestamp(),
            reporter_name: submission.reporter_name,
            complaint_type: submission.complaint_type,
            problem_subtype: submission.problem_subtype,
            location: submission.location,
            address: submission.address,
            description: submission.description,
            contact_email: submission.contact_email,
            contact_phone: submission.contact_phone,
        };

        self.store.append(&record)?;
        let ctx = ctx.with_protocol(&record.protocol_id);
        log::info!("{} SUBMISSION_RECORDED", ctx);

        if let Some(notifier) = &self.notifier {
            notifier.notify(&record, self.config.lab_bcc.as_deref());
        }

        Ok(IntakeOutcome::Recorded(record))
    }

    /// History snapshot, optionally narrowed to a month ("MM") and year
    /// ("YYYY").
    pub fn history(&self, month: Option<&str>, year: Option<&str>) -> Vec<ComplaintRecord> {
        let records = self.store.load_all();
        history::filter_by_period(&records, month, year)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Password-gated deletion by protocol id.
    pub fn delete(
        &self,
        protocol_id: &str,
        supplied_password: &str,
    ) -> Result<DeleteOutcome, StoreError> {
        self.store.delete(protocol_id, supplied_password)
    }

    /// Full history as a downloadable PDF.
    pub fn export_pdf(&self) -> Result<Vec<u8>, ReportError> {
        report::render(&self.store.load_all())
    }

    fn missing_required(&self, submission: &Submission) -> Vec<String> {
        self.config
            .required_fields
            .iter()
            .filter(|name| match submission.field(name) {
                Some(value) => value.is_empty(),
                None => {
                    log::warn!("UNKNOWN_REQUIRED_FIELD name={}", name);
                    false
                }
            })
            .cloned()
            .collect()
    }
}
