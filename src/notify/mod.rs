//! Fire-and-forget email notification.
//!
//! The mail transport is an external collaborator behind the [`Mailer`]
//! trait; this crate ships no SMTP client. The [`Notifier`] owns a
//! bounded queue and one worker thread so intake requests never block on
//! delivery, and delivery failure is logged but never surfaced to the
//! requester.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::storage::ComplaintRecord;

/// Outbound mail transport, implemented by the embedding application
/// (SMTP, HTTP mail API, ...).
pub trait Mailer: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub bcc: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Bounded queue depth; notifications beyond this are dropped with a
/// warning rather than blocking intake.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

pub struct Notifier {
    sender: Option<SyncSender<OutgoingMail>>,
    worker: Option<JoinHandle<()>>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, capacity: usize) -> Self {
        let (sender, receiver) = sync_channel(capacity);
        let worker = thread::spawn(move || deliver_loop(mailer, receiver));
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Queue a notification for `record` if the reporter left an address.
    ///
    /// Never blocks the caller: a full queue drops the notification with
    /// a warning.
    pub fn notify(&self, record: &ComplaintRecord, bcc: Option<&str>) {
        if record.contact_email.is_empty() {
            log::debug!(
                "EMAIL_SKIPPED protocol={} reason=no_address",
                record.protocol_id
            );
            return;
        }

        let mail = OutgoingMail {
            to: record.contact_email.clone(),
            bcc: bcc.map(str::to_string),
            subject: format!("Complaint {}", record.protocol_id),
            body: notification_body(record),
        };

        let Some(sender) = &self.sender else {
            return;
        };
        match sender.try_send(mail) {
            Ok(()) => log::debug!("EMAIL_QUEUED protocol={}", record.protocol_id),
            Err(TrySendError::Full(_)) => {
                log::warn!("EMAIL_QUEUE_FULL protocol={} dropped", record.protocol_id);
            }
            Err(TrySendError::Disconnected(_)) => {
                log::warn!("EMAIL_WORKER_GONE protocol={}", record.protocol_id);
            }
        }
    }
}

impl Drop for Notifier {
    /// Close the queue and let the worker drain what it already accepted.
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn deliver_loop(mailer: Arc<dyn Mailer>, receiver: Receiver<OutgoingMail>) {
    while let Ok(mail) = receiver.recv() {
        match mailer.send(&mail) {
            Ok(()) => log::info!("EMAIL_SENT to={} subject={}", mail.to, mail.subject),
            Err(e) => log::warn!("EMAIL_SEND_FAILED to={} error={:#}", mail.to, e),
        }
    }
}

/// Plain-text body listing the record's fields in fixed order.
fn notification_body(record: &ComplaintRecord) -> String {
    format!(
        "Protocol: {}\n\
         Date: {}\n\
         Reporter: {}\n\
         Type: {}\n\
         Subtype: {}\n\
         Location: {}\n\
         Address: {}\n\
         Description: {}\n\
         Email: {}\n\
         Phone: {}\n",
        record.protocol_id,
        record.created_at,
        record.reporter_name,
        record.complaint_type,
        record.problem_subtype,
        record.location,
        record.address,
        record.description,
        record.contact_email,
        record.contact_phone,
    )
}
