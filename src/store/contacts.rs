//! Contact operations.

use super::{AppointmentStore, Contact, ContactId, ContactUpdate, NewContact};
use crate::error::{StoreError, StoreResult};
use crate::validation::{
    normalize_optional, require_email_or_phone, require_text, validate_email, validate_timezone,
};
use log::{debug, info, warn};

impl AppointmentStore {
    /// Validate and insert a new contact.
    ///
    /// Fails with `DuplicateContact` when the (trimmed) email or phone is
    /// already used by another contact.
    pub fn add_contact(&mut self, data: NewContact) -> StoreResult<ContactId> {
        let name = require_text("name", &data.name)?.to_string();
        let email = normalize_optional(data.email.as_deref());
        let phone = normalize_optional(data.phone.as_deref());
        let timezone = normalize_optional(data.timezone.as_deref())
            .unwrap_or_else(|| self.default_timezone.clone());

        validate_reachable(email.as_deref(), phone.as_deref())?;
        validate_timezone(&timezone)?;

        if let Err(e) = self.check_unique(None, email.as_deref(), phone.as_deref()) {
            warn!("Rejected contact '{}': {}", name, e);
            return Err(e);
        }

        let id = ContactId::new(self.next_id());
        info!("Adding contact '{}' ({})", name, id);
        self.contacts.push(Contact {
            id: id.clone(),
            name,
            email,
            phone,
            timezone,
            created_at: self.clock.now(),
        });
        Ok(id)
    }

    /// Merge `update` into the contact with `id`.
    ///
    /// The merged contact is validated like a new one, including the
    /// uniqueness check against every other contact. Returns `Ok(false)`
    /// when no contact has that id.
    pub fn update_contact(&mut self, id: &ContactId, update: ContactUpdate) -> StoreResult<bool> {
        let Some(index) = self.contacts.iter().position(|c| &c.id == id) else {
            debug!("update_contact: no contact with id {}", id);
            return Ok(false);
        };

        let current = &self.contacts[index];
        let name = match update.name.as_deref() {
            Some(name) => require_text("name", name)?.to_string(),
            None => current.name.clone(),
        };
        let email = match update.email.as_deref() {
            Some(email) => normalize_optional(Some(email)),
            None => current.email.clone(),
        };
        let phone = match update.phone.as_deref() {
            Some(phone) => normalize_optional(Some(phone)),
            None => current.phone.clone(),
        };
        let timezone = match update.timezone.as_deref() {
            Some(tz) => normalize_optional(Some(tz))
                .unwrap_or_else(|| self.default_timezone.clone()),
            None => current.timezone.clone(),
        };

        validate_reachable(email.as_deref(), phone.as_deref())?;
        validate_timezone(&timezone)?;
        self.check_unique(Some(id), email.as_deref(), phone.as_deref())?;

        let contact = &mut self.contacts[index];
        contact.name = name;
        contact.email = email;
        contact.phone = phone;
        contact.timezone = timezone;
        info!("Updated contact {}", id);
        Ok(true)
    }

    /// Remove a contact and detach it from every appointment that
    /// referenced it. The appointments themselves are kept.
    pub fn delete_contact(&mut self, id: &ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| &c.id != id);
        if self.contacts.len() == before {
            debug!("delete_contact: no contact with id {}", id);
            return false;
        }

        let mut detached = 0;
        for appointment in &mut self.appointments {
            if appointment.contact_id.as_ref() == Some(id) {
                appointment.contact_id = None;
                detached += 1;
            }
        }
        info!("Deleted contact {} (detached from {} appointment(s))", id, detached);
        true
    }

    pub fn get_contact(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    /// Case-insensitive match on name or email; phone matches as typed.
    pub fn search_contacts(&self, query: &str) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.as_ref().is_some_and(|e| e.to_lowercase().contains(&needle))
                    || c.phone.as_ref().is_some_and(|p| p.contains(query))
            })
            .collect()
    }

    fn check_unique(
        &self,
        exclude: Option<&ContactId>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> StoreResult<()> {
        for other in self.contacts.iter().filter(|c| Some(&c.id) != exclude) {
            if let Some(email) = email {
                if other.email.as_deref() == Some(email) {
                    return Err(StoreError::DuplicateContact {
                        field: "email",
                        value: email.to_string(),
                    });
                }
            }
            if let Some(phone) = phone {
                if other.phone.as_deref() == Some(phone) {
                    return Err(StoreError::DuplicateContact {
                        field: "phone",
                        value: phone.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn validate_reachable(email: Option<&str>, phone: Option<&str>) -> StoreResult<()> {
    require_email_or_phone(email, phone)?;
    if let Some(email) = email {
        validate_email(email)?;
    }
    Ok(())
}
