//! Request-level orchestration: the three-way gate decision.

use serde_json::Value;
use tracing::{debug, error, info};

use igo_model::{GateError, RequestStatus, Result};

use crate::audit::StatusSink;
use crate::fields::{is_cmo_request, resolve_request_id};
use crate::rules::{is_valid_cmo_sample, is_valid_non_cmo_sample};
use crate::{RequestDoc, SampleDoc};

/// Process-wide gate configuration, injected explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateConfig {
    /// When enabled, non-CMO requests are silently skipped. This is a
    /// routing decision, not a validation failure, and raises no audit
    /// event.
    pub cmo_requests_only: bool,
}

/// The validation gate. Stateless across invocations; concurrent calls
/// for different requests are fully independent.
pub struct RequestValidator<'a> {
    config: GateConfig,
    sink: &'a dyn StatusSink,
}

impl<'a> RequestValidator<'a> {
    pub fn new(config: GateConfig, sink: &'a dyn StatusSink) -> Self {
        Self { config, sink }
    }

    /// Filter a raw request down to its valid samples.
    ///
    /// Returns `None` when the request is rejected or skipped, the
    /// original document when every sample passes, or a copy with
    /// `samples` replaced by the valid subsequence when some fail.
    /// Exactly zero or one audit event is raised per call, always
    /// carrying the unmodified input payload.
    ///
    /// # Errors
    ///
    /// Unparseable JSON and a malformed `samples` value are fatal and
    /// propagate to the caller; nothing is audited in that case since
    /// the payload cannot be read.
    pub fn filter_valid_request(&self, request_json: &str) -> Result<Option<String>> {
        if request_json.trim().is_empty() {
            return Ok(None);
        }
        let mut doc: RequestDoc = serde_json::from_str(request_json)?;
        let is_cmo = is_cmo_request(&doc);
        let request_id = resolve_request_id(&doc);

        let Some(request_id) = request_id else {
            info!("request failed sanity checking - missing request id");
            self.sink
                .log_request_status(request_json, RequestStatus::MissingRequiredFields);
            return Ok(None);
        };

        if self.config.cmo_requests_only && !is_cmo {
            info!(
                request_id = %request_id,
                "cmo-only filter enabled - skipping non-cmo request"
            );
            return Ok(None);
        }

        let samples = extract_samples(&doc)?;
        let total = samples.len();
        let valid_samples: Vec<Value> = samples
            .into_iter()
            .filter(|sample| {
                if is_cmo {
                    is_valid_cmo_sample(sample, true)
                } else {
                    is_valid_non_cmo_sample(sample)
                }
            })
            .map(Value::Object)
            .collect();

        if valid_samples.is_empty() {
            error!(request_id = %request_id, "request failed sanity checking - no valid samples");
            self.sink
                .log_request_status(request_json, RequestStatus::FailedSanityCheck);
            return Ok(None);
        }
        if valid_samples.len() < total {
            info!(
                request_id = %request_id,
                valid = valid_samples.len(),
                total,
                "request passed sanity checking - samples were dropped"
            );
            doc.insert("samples".to_string(), Value::Array(valid_samples));
            self.sink
                .log_request_status(request_json, RequestStatus::MissingRequiredFields);
            return Ok(Some(serde_json::to_string(&doc)?));
        }
        debug!(request_id = %request_id, total, "request passed sanity checking");
        Ok(Some(serde_json::to_string(&doc)?))
    }

    /// Advisory pre-check: runs only the request-level steps, without
    /// sample filtering.
    ///
    /// Unlike [`Self::filter_valid_request`] this path is not audited;
    /// a missing request id is logged and reported as `false`. The
    /// asymmetry is deliberate (cheap pre-check vs authoritative
    /// filter).
    ///
    /// # Errors
    ///
    /// Unparseable JSON propagates to the caller.
    pub fn is_request_metadata_valid(&self, request_json: &str) -> Result<bool> {
        if request_json.trim().is_empty() {
            return Ok(false);
        }
        let doc: RequestDoc = serde_json::from_str(request_json)?;
        let is_cmo = is_cmo_request(&doc);

        let Some(request_id) = resolve_request_id(&doc) else {
            info!("request metadata check failed - missing request id");
            return Ok(false);
        };
        if self.config.cmo_requests_only && !is_cmo {
            info!(
                request_id = %request_id,
                "cmo-only filter enabled - skipping non-cmo request"
            );
            return Ok(false);
        }
        Ok(true)
    }
}

/// Pull the `samples` array out of the document as owned sample maps.
/// A missing key, a non-array value, or a non-object element is a
/// malformed request.
fn extract_samples(doc: &RequestDoc) -> Result<Vec<SampleDoc>> {
    let samples = doc
        .get("samples")
        .ok_or_else(|| GateError::Malformed("missing 'samples' field".to_string()))?;
    let entries = samples
        .as_array()
        .ok_or_else(|| GateError::Malformed("'samples' is not an array".to_string()))?;
    entries
        .iter()
        .map(|entry| {
            entry
                .as_object()
                .cloned()
                .ok_or_else(|| GateError::Malformed("sample entry is not an object".to_string()))
        })
        .collect()
}
