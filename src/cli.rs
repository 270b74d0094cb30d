use crate::store::AppointmentStatus;
use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand};

/// Positify - book appointments and browse them on a month calendar
#[derive(Debug, Parser)]
#[command(name = "positify")]
#[command(about = "Book appointments and browse them on a month calendar", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the month grid with appointment counts
    #[command(alias = "cal")]
    Month {
        /// Any date in the month to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Months to move forward (positive) or back (negative)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,

        /// First day of the week (overrides config)
        #[arg(long)]
        week_start: Option<Weekday>,
    },

    /// List upcoming appointments for a month
    Upcoming {
        /// Any date in the month (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        month: Option<NaiveDate>,

        /// Filter by title or contact name
        #[arg(long)]
        search: Option<String>,
    },

    /// Book a new appointment
    #[command(alias = "add")]
    Book {
        /// Appointment title
        title: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM, UTC)
        time: String,

        /// Appointment description
        #[arg(long)]
        description: Option<String>,

        /// Contact id to link
        #[arg(long)]
        contact: Option<String>,

        /// confirmed, pending or cancelled
        #[arg(long, default_value = "confirmed")]
        status: AppointmentStatus,

        /// Internal notes (not shared with the contact)
        #[arg(long)]
        notes: Option<String>,
    },

    /// Manage contacts
    #[command(alias = "contacts")]
    Contact {
        #[command(subcommand)]
        action: ContactActions,
    },

    /// Manage appointments
    #[command(alias = "appointments")]
    Appointment {
        #[command(subcommand)]
        action: AppointmentActions,
    },

    /// Delete every contact and appointment
    Clear {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContactActions {
    /// Add a contact (email or phone required)
    Add {
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// IANA timezone, e.g. Europe/Berlin
        #[arg(long)]
        timezone: Option<String>,
    },

    /// List contacts, optionally filtered
    List {
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a contact and their appointments
    Show { id: String },

    /// Change contact fields (an empty value clears email/phone)
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Delete a contact; their appointments are kept
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum AppointmentActions {
    /// List appointments, optionally filtered
    List {
        /// Only appointments on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        status: Option<AppointmentStatus>,

        /// Only appointments linked to this contact id
        #[arg(long)]
        contact: Option<String>,

        /// Match title or description
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one appointment
    Show { id: String },

    /// Change an appointment's status
    Status { id: String, status: AppointmentStatus },

    /// Delete an appointment
    #[command(alias = "rm")]
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book() {
        let cli = Cli::try_parse_from([
            "positify", "book", "Appointment with Bob", "2024-03-15", "14:00", "--status", "pending",
        ])
        .unwrap();
        match cli.command {
            Commands::Book { title, status, .. } => {
                assert_eq!(title, "Appointment with Bob");
                assert_eq!(status, AppointmentStatus::Pending);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_month_offset() {
        let cli = Cli::try_parse_from(["positify", "month", "--offset", "-1", "--week-start", "mon"])
            .unwrap();
        match cli.command {
            Commands::Month { offset, week_start, date } => {
                assert_eq!(offset, -1);
                assert_eq!(week_start, Some(Weekday::Mon));
                assert_eq!(date, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["positify", "appointment", "status", "a1", "done"]).is_err());
    }
}
