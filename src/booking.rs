//! Booking flow: turn form input into a validated new appointment.

use crate::error::{StoreError, StoreResult};
use crate::store::{AppointmentStatus, ContactId, NewAppointment};
use crate::validation::{normalize_optional, parse_date, parse_time, require_text, validate_time_range};
use chrono::Duration;

/// Length of a booked slot unless configured otherwise.
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// Raw booking form values, as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    /// YYYY-MM-DD
    pub date: &'a str,
    /// HH:MM, interpreted in UTC
    pub time: &'a str,
    pub status: AppointmentStatus,
    pub contact_id: Option<ContactId>,
    pub internal_notes: Option<&'a str>,
    pub duration_minutes: i64,
}

impl<'a> BookingRequest<'a> {
    pub fn new(title: &'a str, date: &'a str, time: &'a str) -> Self {
        Self {
            title,
            description: None,
            date,
            time,
            status: AppointmentStatus::default(),
            contact_id: None,
            internal_notes: None,
            duration_minutes: DEFAULT_SLOT_MINUTES,
        }
    }

    /// Validate the form and build the appointment to insert.
    pub fn into_new_appointment(self) -> StoreResult<NewAppointment> {
        let title = require_text("title", self.title)?;
        let date = parse_date(self.date)?;
        let time = parse_time(self.time)?;
        if self.duration_minutes <= 0 {
            return Err(StoreError::validation("duration", "Duration must be positive"));
        }

        let start = date.and_time(time).and_utc();
        let end = Duration::try_minutes(self.duration_minutes)
            .and_then(|duration| start.checked_add_signed(duration))
            .ok_or_else(|| StoreError::validation("duration", "Duration is too long"))?;
        validate_time_range(start, end)?;

        Ok(NewAppointment {
            title: title.to_string(),
            description: normalize_optional(self.description),
            start,
            end,
            contact_id: self.contact_id,
            status: self.status,
            internal_notes: normalize_optional(self.internal_notes),
        })
    }
}
