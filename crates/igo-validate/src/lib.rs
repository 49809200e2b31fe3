//! Validation gate for inbound sample-request documents.
//!
//! A request arrives as raw JSON from the ingestion pipeline. The gate
//! decides whether the request (and which of its samples) is complete
//! enough to publish downstream:
//!
//! - request-level checks: a resolvable request id and, optionally,
//!   the CMO-only routing filter;
//! - per-sample checks: one of two rule sets selected by the request
//!   classification (CMO requests are held to the stricter set);
//! - outcome: the untouched document, a copy with invalid samples
//!   removed, or nothing at all.
//!
//! Rejections and partial passes are reported to a [`StatusSink`] with
//! the *original* request payload so the audit trail reflects what was
//! actually received.

pub mod audit;
pub mod fields;
pub mod rules;
pub mod validator;

pub use audit::{LogOnlySink, StatusSink};
pub use fields::{is_cmo_request, resolve_request_id};
pub use rules::{
    SpecimenDecision, is_valid_cmo_sample, is_valid_non_cmo_sample, specimen_decision,
};
pub use validator::{GateConfig, RequestValidator};

/// An inbound request document: an ordered string-keyed JSON map.
pub type RequestDoc = serde_json::Map<String, serde_json::Value>;

/// A single sample entry within a request's `samples` array.
pub type SampleDoc = serde_json::Map<String, serde_json::Value>;
