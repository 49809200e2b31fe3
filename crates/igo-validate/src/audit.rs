//! Audit-sink boundary.
//!
//! The gate reports rejected and partially filtered requests to an
//! external collaborator for later inspection. The sink always
//! receives the *original* raw payload, never the filtered output, and
//! its failures are its own concern: the trait is infallible from the
//! gate's point of view and the gate never retries.

use tracing::warn;

use igo_model::RequestStatus;

/// External collaborator that durably records request statuses.
pub trait StatusSink {
    /// Record one status event for the given raw request payload.
    fn log_request_status(&self, request_json: &str, status: RequestStatus);
}

/// Sink that only emits a tracing event. Used when no durable audit
/// store is configured.
#[derive(Debug, Default)]
pub struct LogOnlySink;

impl StatusSink for LogOnlySink {
    fn log_request_status(&self, request_json: &str, status: RequestStatus) {
        warn!(
            status = status.as_str(),
            payload_bytes = request_json.len(),
            "request flagged by validation gate"
        );
    }
}
