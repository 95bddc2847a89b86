//! Append-only JSON event log.
//!
//! Each event is one self-contained JSON object per line, independently
//! parseable. Appends are durable but not atomic: a crash can truncate
//! the final line, which readers must tolerate.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::store::{StoreError, disk};

/// Writes one JSON line per event to a growing log file.
#[derive(Debug, Clone)]
pub struct EventLogger {
    path: PathBuf,
}

impl EventLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Durably append one pre-formatted line, adding the trailing newline
    /// if the caller left it off.
    pub fn append_line(&self, line: &str) -> Result<(), StoreError> {
        let mut payload = line.to_string();
        if !payload.ends_with('\n') {
            payload.push('\n');
        }
        disk::append(&self.path, payload.as_bytes())
    }

    /// Serialize `event` as a single JSON line and append it.
    pub fn emit(&self, event: &Value) -> Result<(), StoreError> {
        self.append_line(&event.to_string())
    }
}

/// RFC 3339 UTC timestamp for event records.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
