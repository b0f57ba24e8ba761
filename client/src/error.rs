//! Failure types for the validated-fetch pipeline.
//!
//! # Design
//! Internal error detail never reaches the end user: anything the client did
//! not anticipate collapses to [`MASKED_ERROR_MESSAGE`] before it is
//! surfaced. The types here keep the *cause* around for callers and tests —
//! [`Failure`] carries the status and the server's own message where one
//! existed, [`ValidationError`] carries the serde diagnostic for logging.

use std::fmt;

/// Generic message shown for every unexpected failure, verbatim from the
/// production UI. Internal detail is deliberately hidden behind it.
pub const MASKED_ERROR_MESSAGE: &str =
    "Oh no! Looks like something went wrong. Please try again later.";

/// Status recorded when a failure produced no HTTP response at all
/// (transport error, unparseable body).
pub const BLACK_SWAN_FALLBACK_STATUS: u16 = 500;

/// A candidate JSON value did not match the expected shape.
#[derive(Debug, Clone)]
pub struct ValidationError(pub String);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// The classified failure arm of [`Outcome`](crate::Outcome).
///
/// `status` is the HTTP status of the response when one existed, or
/// [`BLACK_SWAN_FALLBACK_STATUS`] when the failure happened before a status
/// was available. `err` is the server's declared message for 4xx envelopes
/// and the masked message for everything unexpected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub status: u16,
    pub err: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.err)
    }
}

impl std::error::Error for Failure {}

/// Contents of the black-swan slot: the one unexpected failure currently
/// being shown by the top-level error surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackSwan {
    pub status: u16,
    pub message: String,
}

/// One entry of the field-level error log, rendered next to the form or
/// action that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    pub status_code: u16,
}
