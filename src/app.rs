use crate::booking::BookingRequest;
use crate::calendar::{MonthGrid, build_month_grid};
use crate::config::Config;
use crate::error::StoreResult;
use crate::services::{Clock, SystemClock, UuidGenerator};
use crate::state::{Snapshot, SnapshotStorage, StateManager};
use crate::store::{
    AppointmentId, AppointmentStore, AppointmentUpdate, ContactId, ContactUpdate, NewContact,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

/// Wires the store to its clock, configuration and storage. Every
/// successful mutation is persisted before returning.
pub struct Application {
    config: Config,
    store: AppointmentStore,
    storage: Box<dyn SnapshotStorage>,
    clock: Arc<dyn Clock>,
}

impl Application {
    /// Load config and persisted state from the platform directories.
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let storage = match &config.storage.data_dir {
            Some(dir) => StateManager::with_dir(dir)?,
            None => StateManager::new()?,
        };
        Self::with_parts(config, Box::new(storage), Arc::new(SystemClock))
    }

    /// Build an application from explicit collaborators, hydrating the store
    /// from `storage`.
    pub fn with_parts(
        config: Config,
        storage: Box<dyn SnapshotStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut store = AppointmentStore::with_services(Arc::new(UuidGenerator), clock.clone());
        store.set_default_timezone(&config.contacts.default_timezone);

        if let Some(snapshot) = storage.load().context("Failed to load saved state")? {
            snapshot.restore_into(&mut store);
        } else {
            debug!("Starting with an empty store");
        }

        Ok(Self { config, store, storage, clock })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &AppointmentStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Month grid for the month containing `reference`, using the
    /// configured week start.
    pub fn month_grid(&self, reference: NaiveDate) -> MonthGrid {
        build_month_grid(reference, self.today(), self.config.calendar.week_starts_on)
    }

    pub fn add_contact(&mut self, data: NewContact) -> Result<StoreResult<ContactId>> {
        self.apply(|store| store.add_contact(data), |result| result.is_ok())
    }

    pub fn update_contact(
        &mut self,
        id: &ContactId,
        update: ContactUpdate,
    ) -> Result<StoreResult<bool>> {
        self.apply(|store| store.update_contact(id, update), |result| matches!(result, Ok(true)))
    }

    pub fn delete_contact(&mut self, id: &ContactId) -> Result<bool> {
        self.apply(|store| store.delete_contact(id), |removed| *removed)
    }

    /// Validate a booking form, applying the configured slot length, and
    /// insert the appointment.
    pub fn book(&mut self, mut request: BookingRequest<'_>) -> Result<StoreResult<AppointmentId>> {
        request.duration_minutes = self.config.calendar.default_duration_minutes;
        let appointment = match request.into_new_appointment() {
            Ok(appointment) => appointment,
            Err(e) => return Ok(Err(e)),
        };
        let id = self.apply(|store| store.add_appointment(appointment), |_| true)?;
        Ok(Ok(id))
    }

    pub fn update_appointment(&mut self, id: &AppointmentId, update: AppointmentUpdate) -> Result<bool> {
        self.apply(|store| store.update_appointment(id, update), |updated| *updated)
    }

    pub fn delete_appointment(&mut self, id: &AppointmentId) -> Result<bool> {
        self.apply(|store| store.delete_appointment(id), |removed| *removed)
    }

    pub fn clear_all_data(&mut self) -> Result<()> {
        self.apply(|store| store.clear_all_data(), |_| true)
    }

    /// Run a store mutation and persist it when `changed` says so. If the
    /// save fails the store is put back the way it was, so memory never
    /// runs ahead of storage.
    fn apply<T>(
        &mut self,
        mutate: impl FnOnce(&mut AppointmentStore) -> T,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T> {
        let before = Snapshot::of(&self.store);
        let outcome = mutate(&mut self.store);
        if changed(&outcome) {
            if let Err(e) = self.persist() {
                warn!("Save failed, reverting in-memory changes");
                before.restore_into(&mut self.store);
                return Err(e);
            }
        }
        Ok(outcome)
    }

    fn persist(&mut self) -> Result<()> {
        let snapshot = Snapshot::of(&self.store);
        self.storage.save(&snapshot).context("Failed to save state")?;
        info!(
            "Saved {} contact(s), {} appointment(s)",
            snapshot.state.contacts.len(),
            snapshot.state.appointments.len()
        );
        Ok(())
    }
}
