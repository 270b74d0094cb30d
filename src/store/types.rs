//! Contact and appointment records.

use crate::error::StoreError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TIMEZONE: &str = "UTC";

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

macro_rules! record_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

record_id!(ContactId);
record_id!(AppointmentId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "pending" => Ok(AppointmentStatus::Pending),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            other => Err(StoreError::validation(
                "status",
                format!("Unknown status '{}'. Expected confirmed, pending or cancelled", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Weak link; cleared when the contact is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
}

impl Appointment {
    /// Whether the appointment starts on `date` (UTC calendar day).
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start.date_naive() == date
    }

    /// Case-insensitive match on title or description. `needle` must
    /// already be lowercase.
    pub fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.as_ref().is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Fields supplied when creating a contact. Id and creation time are
/// assigned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub timezone: Option<String>,
}

impl NewContact {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Default::default() }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }
}

/// Partial contact update. `None` leaves a field untouched; for the optional
/// fields, a blank string clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub contact_id: Option<ContactId>,
    pub status: AppointmentStatus,
    pub internal_notes: Option<String>,
}

impl NewAppointment {
    pub fn new(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            start,
            end,
            contact_id: None,
            status: AppointmentStatus::default(),
            internal_notes: None,
        }
    }

    pub fn with_contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Partial appointment update. `contact_id: Some(None)` detaches the contact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub contact_id: Option<Option<ContactId>>,
    pub status: Option<AppointmentStatus>,
    pub internal_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_from_str() {
        assert_eq!("Pending".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Pending);
        assert_eq!("canceled".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Cancelled);
        assert!("done".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_appointment_serializes_camel_case() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();
        let appointment = Appointment {
            id: AppointmentId::new("a-1"),
            title: "Appointment with Bob".to_string(),
            description: None,
            start,
            end: start + chrono::Duration::minutes(30),
            contact_id: Some(ContactId::new("c-1")),
            status: AppointmentStatus::Pending,
            internal_notes: Some("bring forms".to_string()),
        };

        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["contactId"], "c-1");
        assert_eq!(json["internalNotes"], "bring forms");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["start"], "2024-03-15T14:00:00Z");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_contact_timezone_defaults_to_utc() {
        let json = r#"{"id":"c-1","name":"Bob","createdAt":"2024-01-01T00:00:00Z"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.timezone, "UTC");
        assert_eq!(contact.email, None);
    }
}
