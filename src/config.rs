//! Intake configuration.
//!
//! The core never reads global state ad hoc: the backing file path, the
//! deletion secret and the required-field set are collected into an
//! explicit struct handed to the store and the intake service at
//! construction time. `from_env` is a convenience for binaries.

use std::env;
use std::path::PathBuf;

use log::warn;

/// Submission fields that must be non-empty for a complaint to be accepted.
pub const DEFAULT_REQUIRED_FIELDS: &[&str] =
    &["reporter_name", "complaint_type", "location", "address"];

const DEFAULT_HISTORY_PATH: &str = "history.json";
const DEFAULT_DELETE_PASSWORD: &str = "change-me";

#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Flat-file JSON history store.
    pub history_path: PathBuf,
    /// Secret gating record deletion; exact match only.
    pub deletion_password: String,
    /// Names of submission fields that must be non-empty.
    pub required_fields: Vec<String>,
    /// Laboratory address blind-copied on every notification, if set.
    pub lab_bcc: Option<String>,
}

impl IntakeConfig {
    pub fn new(history_path: impl Into<PathBuf>, deletion_password: impl Into<String>) -> Self {
        Self {
            history_path: history_path.into(),
            deletion_password: deletion_password.into(),
            required_fields: DEFAULT_REQUIRED_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            lab_bcc: None,
        }
    }

    /// Load configuration from the process environment, falling back to
    /// logged defaults for anything unset.
    pub fn from_env() -> Self {
        let history_path = var_or("AQUAWATCH_HISTORY_PATH", DEFAULT_HISTORY_PATH);
        let deletion_password = var_or("AQUAWATCH_DELETE_PASSWORD", DEFAULT_DELETE_PASSWORD);
        let lab_bcc = env::var("AQUAWATCH_LAB_BCC").ok().filter(|v| !v.is_empty());

        let mut config = Self::new(history_path, deletion_password);
        config.lab_bcc = lab_bcc;
        config
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        warn!("{key} not set, using default: {default}");
        default.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_required_fields() {
        let config = IntakeConfig::new("history.json", "secret");
        assert_eq!(
            config.required_fields,
            vec!["reporter_name", "complaint_type", "location", "address"]
        );
        assert!(config.lab_bcc.is_none());
    }

    #[test]
    fn test_new_stores_path_and_password() {
        let config = IntakeConfig::new("/tmp/h.json", "s3cret");
        assert_eq!(config.history_path, PathBuf::from("/tmp/h.json"));
        assert_eq!(config.deletion_password, "s3cret");
    }
}
