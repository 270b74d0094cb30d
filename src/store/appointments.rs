//! Appointment operations and queries.

use super::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentStore, AppointmentUpdate, ContactId,
    NewAppointment,
};
use crate::calendar::{first_of_next_month, start_of_day};
use crate::validation::normalize_optional;
use chrono::NaiveDate;
use log::{debug, info};

impl AppointmentStore {
    /// Append an appointment. Never fails: the store does not validate
    /// appointment fields, callers do.
    pub fn add_appointment(&mut self, data: NewAppointment) -> AppointmentId {
        let id = AppointmentId::new(self.next_id());
        info!("Adding appointment '{}' at {} ({})", data.title, data.start, id);
        self.appointments.push(Appointment {
            id: id.clone(),
            title: data.title,
            description: data.description,
            start: data.start,
            end: data.end,
            contact_id: data.contact_id,
            status: data.status,
            internal_notes: data.internal_notes,
        });
        id
    }

    /// Merge `update` into the appointment with `id`. Returns `false` when
    /// there is no such appointment.
    pub fn update_appointment(&mut self, id: &AppointmentId, update: AppointmentUpdate) -> bool {
        let Some(appointment) = self.appointments.iter_mut().find(|a| &a.id == id) else {
            debug!("update_appointment: no appointment with id {}", id);
            return false;
        };

        if let Some(title) = update.title {
            appointment.title = title;
        }
        if let Some(description) = update.description {
            appointment.description = normalize_optional(Some(&description));
        }
        if let Some(start) = update.start {
            appointment.start = start;
        }
        if let Some(end) = update.end {
            appointment.end = end;
        }
        if let Some(contact_id) = update.contact_id {
            appointment.contact_id = contact_id;
        }
        if let Some(status) = update.status {
            appointment.status = status;
        }
        if let Some(notes) = update.internal_notes {
            appointment.internal_notes = normalize_optional(Some(&notes));
        }
        info!("Updated appointment {}", id);
        true
    }

    pub fn delete_appointment(&mut self, id: &AppointmentId) -> bool {
        let before = self.appointments.len();
        self.appointments.retain(|a| &a.id != id);
        let removed = self.appointments.len() != before;
        if removed {
            info!("Deleted appointment {}", id);
        } else {
            debug!("delete_appointment: no appointment with id {}", id);
        }
        removed
    }

    pub fn get_appointment(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| &a.id == id)
    }

    pub fn appointments_by_contact(&self, contact_id: &ContactId) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.contact_id.as_ref() == Some(contact_id))
            .collect()
    }

    /// Appointments starting on `date` (UTC calendar day), any time of day.
    pub fn appointments_by_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.starts_on(date)).collect()
    }

    pub fn appointments_by_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.status == status).collect()
    }

    /// Case-insensitive match on title or description.
    pub fn search_appointments(&self, query: &str) -> Vec<&Appointment> {
        let needle = query.to_lowercase();
        self.appointments.iter().filter(|a| a.mentions(&needle)).collect()
    }

    /// The upcoming feed for the month containing `reference`.
    ///
    /// Includes every appointment on `today`, plus those starting after the
    /// start of `today` and before the end of the reference month. Sorted by
    /// start; ties keep insertion order.
    pub fn upcoming_in_month(&self, reference: NaiveDate, today: NaiveDate) -> Vec<&Appointment> {
        let day_start = start_of_day(today);
        // No upper bound when the reference month is the last representable one.
        let month_end = first_of_next_month(reference).map(start_of_day);

        let mut upcoming: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| {
                a.start.date_naive() == today
                    || (a.start > day_start && month_end.map_or(true, |end| a.start < end))
            })
            .collect();
        upcoming.sort_by_key(|a| a.start);
        upcoming
    }

    /// The upcoming feed narrowed by a search box. Matches the title, or the
    /// name of the linked contact, case-insensitively. A blank query returns
    /// the whole feed.
    pub fn search_upcoming_in_month(
        &self,
        reference: NaiveDate,
        today: NaiveDate,
        query: &str,
    ) -> Vec<&Appointment> {
        let upcoming = self.upcoming_in_month(reference, today);
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return upcoming;
        }

        upcoming
            .into_iter()
            .filter(|a| {
                a.title.to_lowercase().contains(&needle)
                    || a
                        .contact_id
                        .as_ref()
                        .and_then(|id| self.get_contact(id))
                        .is_some_and(|c| c.name.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
