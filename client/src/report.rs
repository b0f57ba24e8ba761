//! Failure reporting collaborators.
//!
//! # Design
//! The browser client pushed failures into two process-wide reactive stores:
//! a "black swan" slot read by the top-level error page and an error log
//! rendered next to forms. Those are re-architected here as an injected
//! [`Reporter`], so the pipeline has no ambient state and tests can observe
//! classification outcomes in isolation. [`ErrorSignals`] is the concrete
//! implementation an application shares between its client and its error
//! surfaces.

use std::sync::Mutex;

use crate::error::{BlackSwan, FieldError};

/// Receives classified failures from the pipeline.
///
/// `report_unexpected` corresponds to the black-swan channel (unanticipated
/// status or malformed envelope); `report_field_error` to the 400-class
/// channel (server-declared validation message). 403/404 outcomes reach
/// neither — they are page-level concerns.
pub trait Reporter {
    fn report_unexpected(&self, status: u16, message: &str);
    fn report_field_error(&self, message: &str, status_code: u16);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report_unexpected(&self, status: u16, message: &str) {
        (**self).report_unexpected(status, message)
    }

    fn report_field_error(&self, message: &str, status_code: u16) {
        (**self).report_field_error(message, status_code)
    }
}

/// Shared failure state: an overwrite-only black-swan slot and an
/// append-only field-error log.
///
/// Interior mutability lets the client hold `&self` while error surfaces
/// read concurrently; the single-request call chain means the lock is never
/// contended in practice.
#[derive(Debug, Default)]
pub struct ErrorSignals {
    black_swan: Mutex<Option<BlackSwan>>,
    field_errors: Mutex<Vec<FieldError>>,
}

impl ErrorSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current black-swan state, `None` until an unexpected failure occurs.
    pub fn black_swan(&self) -> Option<BlackSwan> {
        self.black_swan.lock().unwrap().clone()
    }

    /// Snapshot of the field-error log, oldest first.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.field_errors.lock().unwrap().clone()
    }

    /// Drops logged field errors after the UI has rendered them.
    pub fn clear_field_errors(&self) {
        self.field_errors.lock().unwrap().clear();
    }
}

impl Reporter for ErrorSignals {
    fn report_unexpected(&self, status: u16, message: &str) {
        *self.black_swan.lock().unwrap() = Some(BlackSwan {
            status,
            message: message.to_string(),
        });
    }

    fn report_field_error(&self, message: &str, status_code: u16) {
        self.field_errors.lock().unwrap().push(FieldError {
            message: message.to_string(),
            status_code,
        });
    }
}
