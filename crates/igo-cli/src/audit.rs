//! File-based audit sink.
//!
//! Flagged requests are appended as JSON lines to
//! `<dir>/request-status.jsonl`, one record per event, carrying the
//! raw request exactly as received. Write failures are logged and
//! swallowed: the gate decision must not depend on the audit store.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use serde_json::json;
use tracing::warn;

use igo_model::RequestStatus;
use igo_validate::StatusSink;

const RECORD_SCHEMA: &str = "igo-gate.request-status";
const RECORD_SCHEMA_VERSION: u32 = 1;
const STATUS_FILE: &str = "request-status.jsonl";

/// Audit sink appending JSONL records under a directory.
#[derive(Debug)]
pub struct JsonlStatusSink {
    dir: PathBuf,
}

impl JsonlStatusSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the status file this sink appends to.
    pub fn status_file(&self) -> PathBuf {
        self.dir.join(STATUS_FILE)
    }

    fn append_record(&self, request_json: &str, status: RequestStatus) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let record = json!({
            "schema": RECORD_SCHEMA,
            "schema_version": RECORD_SCHEMA_VERSION,
            "logged_at": Utc::now().to_rfc3339(),
            "status": status.as_str(),
            "request": request_json,
        });
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.status_file())?;
        writeln!(file, "{record}")
    }
}

impl StatusSink for JsonlStatusSink {
    fn log_request_status(&self, request_json: &str, status: RequestStatus) {
        if let Err(error) = self.append_record(request_json, status) {
            warn!(
                status = status.as_str(),
                dir = %self.dir.display(),
                %error,
                "failed to write audit record"
            );
        }
    }
}
