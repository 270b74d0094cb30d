use crate::app::Application;
use crate::cli::ContactActions;
use crate::commands::render_appointment_line;
use crate::error::StoreError;
use crate::store::{Contact, ContactId, ContactUpdate, NewContact};
use anyhow::Result;

pub fn handle_contact_command(app: &mut Application, action: ContactActions) -> Result<()> {
    match action {
        ContactActions::Add { name, email, phone, timezone } => {
            let data = NewContact { name, email, phone, timezone };
            let id = app.add_contact(data)??;
            println!("✅ Contact added ({})", id);
        }
        ContactActions::List { search } => {
            let store = app.store();
            let contacts: Vec<&Contact> = match search.as_deref() {
                Some(query) => store.search_contacts(query),
                None => store.contacts().iter().collect(),
            };
            if contacts.is_empty() {
                println!("No contacts found");
            }
            for contact in contacts {
                println!("{}", render_contact_line(contact));
            }
        }
        ContactActions::Show { id } => {
            let id = ContactId::new(id);
            let store = app.store();
            let contact = store.get_contact(&id).ok_or_else(|| StoreError::ContactNotFound(id.clone()))?;
            println!("{}", render_contact_line(contact));
            println!("  timezone: {}", contact.timezone);
            println!("  added:    {}", contact.created_at.format("%Y-%m-%d %H:%M UTC"));
            let appointments = store.appointments_by_contact(&id);
            println!("  appointments: {}", appointments.len());
            for appointment in appointments {
                println!("  {}", render_appointment_line(appointment, store));
            }
        }
        ContactActions::Update { id, name, email, phone, timezone } => {
            let id = ContactId::new(id);
            let update = ContactUpdate { name, email, phone, timezone };
            if !app.update_contact(&id, update)?? {
                return Err(StoreError::ContactNotFound(id).into());
            }
            println!("✅ Contact updated");
        }
        ContactActions::Delete { id } => {
            let id = ContactId::new(id);
            if !app.delete_contact(&id)? {
                return Err(StoreError::ContactNotFound(id).into());
            }
            println!("✅ Contact deleted; their appointments were kept");
        }
    }
    Ok(())
}

/// "Name (email or phone or "no info") [id]"
pub fn render_contact_line(contact: &Contact) -> String {
    let reach = contact.email.as_deref().or(contact.phone.as_deref()).unwrap_or("no info");
    format!("{} ({}) [{}]", contact.name, reach, contact.id)
}
