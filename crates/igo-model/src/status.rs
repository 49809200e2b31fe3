//! Request status tags recorded by the audit sink.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification attached to a request when it is logged to the audit
/// sink. Only rejected or partially filtered requests are logged; a
/// fully valid request never produces a status record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// The request id could not be resolved, or one or more samples
    /// were dropped for missing required fields.
    MissingRequiredFields,

    /// No sample in the request passed validation.
    FailedSanityCheck,
}

impl RequestStatus {
    /// Returns the status code as written to audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::MissingRequiredFields => "MISSING_REQUIRED_FIELDS",
            RequestStatus::FailedSanityCheck => "FAILED_SANITY_CHECK",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
