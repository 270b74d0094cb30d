//! In-memory repository of contacts and appointments.
//!
//! One `AppointmentStore` is constructed at startup and handed to whatever
//! needs it. Records keep insertion order, which is also the default
//! iteration order of every query except the upcoming feed.

mod appointments;
mod contacts;
mod types;

pub use types::*;

use crate::services::{Clock, IdGenerator, SystemClock, UuidGenerator};
use log::info;
use std::fmt;
use std::sync::Arc;

pub struct AppointmentStore {
    contacts: Vec<Contact>,
    appointments: Vec<Appointment>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    default_timezone: String,
}

impl AppointmentStore {
    /// Empty store using UUID ids and the system clock.
    pub fn new() -> Self {
        Self::with_services(Arc::new(UuidGenerator), Arc::new(SystemClock))
    }

    pub fn with_services(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            contacts: Vec::new(),
            appointments: Vec::new(),
            ids,
            clock,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    /// Timezone given to new contacts that don't name one.
    pub fn set_default_timezone(&mut self, timezone: &str) {
        self.default_timezone = timezone.to_string();
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Replace both collections, e.g. after hydrating from storage.
    pub fn load_records(&mut self, contacts: Vec<Contact>, appointments: Vec<Appointment>) {
        info!(
            "Loaded {} contact(s) and {} appointment(s)",
            contacts.len(),
            appointments.len()
        );
        self.contacts = contacts;
        self.appointments = appointments;
    }

    pub fn clear_all_data(&mut self) {
        info!("Clearing all contacts and appointments");
        self.contacts.clear();
        self.appointments.clear();
    }

    fn next_id(&self) -> String {
        self.ids.next_id()
    }
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppointmentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppointmentStore")
            .field("contacts", &self.contacts)
            .field("appointments", &self.appointments)
            .field("default_timezone", &self.default_timezone)
            .finish_non_exhaustive()
    }
}
