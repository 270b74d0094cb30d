use crate::app::Application;
use crate::booking::BookingRequest;
use crate::cli::AppointmentActions;
use crate::commands::render_appointment_line;
use crate::error::StoreError;
use crate::store::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentStore, AppointmentUpdate, ContactId,
};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use log::warn;
use std::io::{self, Write};

/// Arguments of `positify book`.
pub struct BookArgs<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub description: Option<&'a str>,
    pub contact: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<&'a str>,
}

pub fn handle_book(app: &mut Application, args: BookArgs<'_>) -> Result<()> {
    let contact_id = args.contact.map(ContactId::new);
    if let Some(id) = &contact_id {
        if app.store().get_contact(id).is_none() {
            return Err(StoreError::ContactNotFound(id.clone()).into());
        }
    }

    let mut request = BookingRequest::new(args.title, args.date, args.time);
    request.description = args.description;
    request.status = args.status;
    request.contact_id = contact_id;
    request.internal_notes = args.notes;

    let id = app.book(request)??;
    if let Some(appointment) = app.store().get_appointment(&id) {
        println!("✅ Booked:{}", render_appointment_line(appointment, app.store()));
    }
    Ok(())
}

/// Appointments matching every given filter, in store order.
fn filter_appointments<'s>(
    store: &'s AppointmentStore,
    date: Option<NaiveDate>,
    status: Option<AppointmentStatus>,
    contact: Option<&ContactId>,
    search: Option<&str>,
) -> Vec<&'s Appointment> {
    let needle = search.map(str::to_lowercase);
    store
        .appointments()
        .iter()
        .filter(|a| date.map_or(true, |d| a.starts_on(d)))
        .filter(|a| status.map_or(true, |s| a.status == s))
        .filter(|a| contact.map_or(true, |c| a.contact_id.as_ref() == Some(c)))
        .filter(|a| needle.as_deref().map_or(true, |n| a.mentions(n)))
        .collect()
}

pub fn handle_appointment_command(app: &mut Application, action: AppointmentActions) -> Result<()> {
    match action {
        AppointmentActions::List { date, status, contact, search } => {
            let store = app.store();
            let contact = contact.map(ContactId::new);
            let appointments =
                filter_appointments(store, date, status, contact.as_ref(), search.as_deref());
            if appointments.is_empty() {
                println!("No appointments found");
            }
            for appointment in appointments {
                println!("{}", render_appointment_line(appointment, store));
            }
        }
        AppointmentActions::Show { id } => {
            let id = AppointmentId::new(id);
            let store = app.store();
            let appointment =
                store.get_appointment(&id).ok_or_else(|| StoreError::AppointmentNotFound(id.clone()))?;
            println!("{}", render_appointment_line(appointment, store));
            println!(
                "  {} - {} UTC",
                appointment.start.format("%Y-%m-%d %H:%M"),
                appointment.end.format("%H:%M")
            );
            if let Some(description) = &appointment.description {
                println!("  description: {}", description);
            }
            if let Some(notes) = &appointment.internal_notes {
                println!("  internal notes: {}", notes);
            }
        }
        AppointmentActions::Status { id, status } => {
            let id = AppointmentId::new(id);
            let update = AppointmentUpdate { status: Some(status), ..Default::default() };
            if !app.update_appointment(&id, update)? {
                return Err(StoreError::AppointmentNotFound(id).into());
            }
            println!("✅ Appointment is now {}", status);
        }
        AppointmentActions::Delete { id } => {
            let id = AppointmentId::new(id);
            if !app.delete_appointment(&id)? {
                return Err(StoreError::AppointmentNotFound(id).into());
            }
            println!("✅ Appointment deleted");
        }
    }
    Ok(())
}

pub fn handle_clear(app: &mut Application, yes: bool) -> Result<()> {
    if !yes {
        print!("Delete all contacts and appointments? This cannot be undone [y/N]: ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled");
            return Ok(());
        }
    }

    let contacts = app.store().contacts().len();
    let appointments = app.store().appointments().len();
    app.clear_all_data().map_err(|e| anyhow!("Failed to clear data: {}", e))?;
    warn!("Cleared {} contact(s) and {} appointment(s)", contacts, appointments);
    println!("✅ All data cleared");
    Ok(())
}
