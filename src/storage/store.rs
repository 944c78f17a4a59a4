//! Flat-file record store.
//!
//! Durable CRUD-lite layer over a pretty-printed JSON array. Every
//! mutation is a full read-modify-write guarded by a store-wide lock, and
//! the rewrite goes through write-to-temp-then-rename so readers observe
//! either the old or the new complete file, never a partial one.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::config::IntakeConfig;
use crate::error::{DeleteOutcome, StoreError};

use super::model::ComplaintRecord;

pub struct RecordStore {
    path: PathBuf,
    deletion_password: String,
    /// Serializes the read-modify-write cycle of append/delete so
    /// interleaved writers cannot lose updates.
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            path: config.history_path.clone(),
            deletion_password: config.deletion_password.clone(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full history in stored order.
    ///
    /// A missing backing file is an empty history, not an error. An
    /// unreadable or unparseable file also degrades to an empty history
    /// with a warning, so the intake form stays usable even when history
    /// cannot be read back.
    pub fn load_all(&self) -> Vec<ComplaintRecord> {
        if !self.path.exists() {
            return Vec::new();
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!(
                    "HISTORY_UNREADABLE path={} error={}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("HISTORY_CORRUPT path={} error={}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Append one record and durably rewrite the backing file.
    ///
    /// The record is not durable until this returns `Ok`.
    pub fn append(&self, record: &ComplaintRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();

        let mut records = self.load_all();
        records.push(record.clone());
        self.rewrite(&records)?;

        log::info!(
            "RECORD_APPENDED protocol={} total={}",
            record.protocol_id,
            records.len()
        );
        Ok(())
    }

    /// Remove every record matching `protocol_id`, gated on the configured
    /// deletion secret.
    ///
    /// Password mismatch and missing protocol id both leave the file
    /// untouched; only an actual removal triggers a rewrite.
    pub fn delete(
        &self,
        protocol_id: &str,
        supplied_password: &str,
    ) -> Result<DeleteOutcome, StoreError> {
        if supplied_password != self.deletion_password {
            log::warn!("DELETE_UNAUTHORIZED protocol={}", protocol_id);
            return Ok(DeleteOutcome::Unauthorized);
        }

        let _guard = self.write_lock.lock();

        let records = self.load_all();
        let before = records.len();
        let remaining: Vec<ComplaintRecord> = records
            .into_iter()
            .filter(|r| r.protocol_id != protocol_id)
            .collect();

        if remaining.len() == before {
            log::info!("DELETE_NOT_FOUND protocol={}", protocol_id);
            return Ok(DeleteOutcome::NotFound);
        }

        self.rewrite(&remaining)?;
        log::info!(
            "RECORD_DELETED protocol={} removed={} total={}",
            protocol_id,
            before - remaining.len(),
            remaining.len()
        );
        Ok(DeleteOutcome::Deleted)
    }

    /// Atomic full rewrite: serialize next to the backing file, then
    /// rename over it.
    fn rewrite(&self, records: &[ComplaintRecord]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
