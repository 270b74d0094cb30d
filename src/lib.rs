pub mod app;
pub mod booking;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize logging with the `RUST_LOG` filter, defaulting to `info`.
pub fn init_logger() {
    logger_builder("RUST_LOG").init();
}

fn logger_builder(filter_var: &str) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().filter_or(filter_var, DEFAULT_LOG_FILTER));
    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] {}",
            Local::now().format("%H:%M:%S"),
            record.level(),
            record.args()
        )
    });
    builder
}

// Re-export commonly used types
pub use app::Application;
pub use calendar::{Day, MonthGrid, Week, build_month_grid};
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use store::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentStore, Contact, ContactId,
    NewAppointment, NewContact,
};
