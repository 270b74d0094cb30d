//! Error types for store and booking operations.

use crate::store::{AppointmentId, ContactId};

/// Failures surfaced by the appointment store and the booking flow.
///
/// None of these are fatal: callers branch on them and keep going
/// (typically by showing a message and leaving the form open).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("A contact with this {field} already exists: {value}")]
    DuplicateContact { field: &'static str, value: String },

    #[error("Contact '{0}' not found")]
    ContactNotFound(ContactId),

    #[error("Appointment '{0}' not found")]
    AppointmentNotFound(AppointmentId),
}

impl StoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        StoreError::Validation { field, message: message.into() }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
