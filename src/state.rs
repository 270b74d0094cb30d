use crate::store::{Appointment, AppointmentStore, Contact};
use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Key (and file stem) of the persisted blob.
pub const STORAGE_KEY: &str = "calendar-storage";
pub const SCHEMA_VERSION: u32 = 1;
// Maximum allowed size for the state file (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const EPOCH: &str = "1970-01-01T00:00:00Z";

/// Both collections of the store, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

/// Versioned envelope: `{ "state": {...}, "version": 1 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: StoreState,
    pub version: u32,
}

impl Snapshot {
    pub fn of(store: &AppointmentStore) -> Self {
        Snapshot {
            state: StoreState {
                contacts: store.contacts().to_vec(),
                appointments: store.appointments().to_vec(),
            },
            version: SCHEMA_VERSION,
        }
    }

    /// Move the records into `store`, replacing whatever it held.
    pub fn restore_into(self, store: &mut AppointmentStore) {
        store.load_records(self.state.contacts, self.state.appointments);
    }

    /// Parse a persisted blob, migrating older schema versions.
    pub fn from_json(value: Value) -> Result<Self> {
        let version = value.get("version").and_then(Value::as_u64).unwrap_or(0);
        let version = u32::try_from(version).context("Schema version out of range")?;
        if version > SCHEMA_VERSION {
            return Err(anyhow!(
                "State was written by a newer version (schema {}, supported {})",
                version,
                SCHEMA_VERSION
            ));
        }

        let mut state = value.get("state").cloned().unwrap_or(Value::Null);
        if state.is_null() {
            state = serde_json::json!({});
        }
        if version < 1 {
            info!("Migrating state from schema {} to {}", version, SCHEMA_VERSION);
            migrate_v0(&mut state);
        }

        let state: StoreState =
            serde_json::from_value(state).map_err(|e| anyhow!("Failed to deserialize state: {}", e))?;
        Ok(Snapshot { state, version: SCHEMA_VERSION })
    }
}

/// Schema 0 contacts had neither a creation time nor a timezone.
fn migrate_v0(state: &mut Value) {
    let Some(contacts) = state.get_mut("contacts").and_then(Value::as_array_mut) else {
        return;
    };
    for contact in contacts.iter_mut().filter_map(Value::as_object_mut) {
        contact.entry("createdAt").or_insert_with(|| Value::from(EPOCH));
        contact.entry("timezone").or_insert_with(|| Value::from("UTC"));
    }
}

/// Load/save pair the application calls at startup and after mutations.
pub trait SnapshotStorage {
    fn load(&self) -> Result<Option<Snapshot>>;
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Stores the snapshot as pretty JSON in `<state_dir>/calendar-storage.json`.
pub struct StateManager {
    state_dir: PathBuf,
}

impl StateManager {
    /// Use the platform data directory.
    pub fn new() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("com", "positify", "positify")
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;
        Self::with_dir(dirs.data_dir())
    }

    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let state_dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&state_dir)
            .with_context(|| format!("Failed to create state directory {}", state_dir.display()))?;
        Ok(Self { state_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.state_dir.join(format!("{}.json", STORAGE_KEY))
    }
}

impl SnapshotStorage for StateManager {
    fn load(&self) -> Result<Option<Snapshot>> {
        let path = self.path();
        if !path.exists() {
            debug!("No state file at {}", path.display());
            return Ok(None);
        }

        let metadata = std::fs::metadata(&path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(anyhow!("State file {} exceeds size limit", path.display()));
        }

        let reader = BufReader::new(File::open(&path)?);
        let json_value: Value = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse JSON data: {}", e))?;
        let snapshot = Snapshot::from_json(json_value)?;
        debug!("Loaded state from {}", path.display());
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let path = self.path();
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(&path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, snapshot)?;
        debug!("Saved state to {}", path.display());
        Ok(())
    }
}

/// Keeps the serialized blob in memory. Serializing still happens, so
/// records go through the same round trip as on disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Snapshot>> {
        match &self.blob {
            Some(blob) => Ok(Some(Snapshot::from_json(serde_json::from_str(blob)?)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.blob = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewAppointment, NewContact};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_store() -> AppointmentStore {
        let mut store = AppointmentStore::new();
        let bob = store.add_contact(NewContact::new("Bob").email("bob@example.com")).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();
        store.add_appointment(
            NewAppointment::new("Appointment with Bob", start, start + chrono::Duration::minutes(30))
                .with_contact(bob),
        );
        store
    }

    #[test]
    fn test_state_manager_round_trip() -> Result<()> {
        let temp_dir = tempdir()?;
        let mut manager = StateManager::with_dir(temp_dir.path())?;
        assert!(manager.load()?.is_none());

        let store = sample_store();
        manager.save(&Snapshot::of(&store))?;
        assert!(manager.path().ends_with("calendar-storage.json"));

        let loaded = manager.load()?.expect("snapshot was saved");
        assert_eq!(loaded, Snapshot::of(&store));
        Ok(())
    }

    #[test]
    fn test_envelope_layout() -> Result<()> {
        let value = serde_json::to_value(Snapshot::of(&sample_store()))?;
        assert_eq!(value["version"], 1);
        assert_eq!(value["state"]["contacts"][0]["name"], "Bob");
        assert_eq!(value["state"]["appointments"][0]["end"], "2024-03-15T14:30:00Z");
        Ok(())
    }

    #[test]
    fn test_migrates_v0_contacts() -> Result<()> {
        let legacy = serde_json::json!({
            "state": {
                "contacts": [{ "id": "c1", "name": "Ann", "phone": "555-0100" }],
                "appointments": []
            },
            "version": 0
        });
        let snapshot = Snapshot::from_json(legacy)?;
        let ann = &snapshot.state.contacts[0];
        assert_eq!(ann.timezone, "UTC");
        assert_eq!(ann.created_at, Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(snapshot.version, SCHEMA_VERSION);
        Ok(())
    }

    #[test]
    fn test_rejects_newer_schema() {
        let future = serde_json::json!({ "state": {}, "version": 99 });
        assert!(Snapshot::from_json(future).is_err());
    }

    #[test]
    fn test_memory_storage() -> Result<()> {
        let mut storage = MemoryStorage::new();
        assert!(storage.load()?.is_none());
        storage.save(&Snapshot::of(&sample_store()))?;
        assert!(storage.blob().unwrap().contains("\"version\":1"));
        assert_eq!(storage.load()?.unwrap().state.appointments.len(), 1);
        Ok(())
    }
}
