//! Library components for the request-gate CLI.

pub mod audit;
pub mod logging;
