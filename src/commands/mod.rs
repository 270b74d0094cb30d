//! Command handlers for the `positify` binary.

mod appointments;
mod calendar;
mod contacts;

pub use appointments::*;
pub use calendar::*;
pub use contacts::*;

use crate::app::Application;
use crate::cli::Commands;
use anyhow::Result;

pub fn run_command(app: &mut Application, command: Commands) -> Result<()> {
    log::debug!("Running command: {:?}", command);
    match command {
        Commands::Month { date, offset, week_start } => handle_month(app, date, offset, week_start),
        Commands::Upcoming { month, search } => handle_upcoming(app, month, search.as_deref()),
        Commands::Book { title, date, time, description, contact, status, notes } => handle_book(
            app,
            BookArgs {
                title: &title,
                date: &date,
                time: &time,
                description: description.as_deref(),
                contact,
                status,
                notes: notes.as_deref(),
            },
        ),
        Commands::Contact { action } => handle_contact_command(app, action),
        Commands::Appointment { action } => handle_appointment_command(app, action),
        Commands::Clear { yes } => handle_clear(app, yes),
    }
}
