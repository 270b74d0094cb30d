use crate::app::Application;
use crate::calendar::{MonthGrid, build_month_grid, shift_months, weekday_labels};
use crate::store::{Appointment, AppointmentStore};
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate, Weekday};

const CELL_WIDTH: usize = 7;

/// Print the month grid for the requested month.
pub fn handle_month(
    app: &Application,
    date: Option<NaiveDate>,
    offset: i32,
    week_start: Option<Weekday>,
) -> Result<()> {
    let base = date.unwrap_or_else(|| app.today());
    let reference = shift_months(base, offset)
        .ok_or_else(|| anyhow!("Month offset {} from {} is outside the supported calendar range", offset, base))?;
    let grid = match week_start {
        Some(week_start) => build_month_grid(reference, app.today(), week_start),
        None => app.month_grid(reference),
    };
    print!("{}", render_month(&grid, app.store()));
    Ok(())
}

/// Print the upcoming feed for the month containing `month` (default: today).
pub fn handle_upcoming(app: &Application, month: Option<NaiveDate>, search: Option<&str>) -> Result<()> {
    let today = app.today();
    let reference = month.unwrap_or(today);
    let store = app.store();
    let feed = store.search_upcoming_in_month(reference, today, search.unwrap_or(""));

    if feed.is_empty() {
        match search {
            Some(query) if !query.trim().is_empty() => println!("No matching meetings found for \"{}\"", query),
            _ => println!("No upcoming meetings"),
        }
        return Ok(());
    }

    println!("Upcoming meetings ({})", feed.len());
    for appointment in feed {
        println!("{}", render_appointment_line(appointment, store));
    }
    Ok(())
}

/// Text rendition of the grid. Each cell shows the day number, `*` for
/// today, and the number of appointments that day. Days outside the
/// reference month are shown in parentheses.
pub fn render_month(grid: &MonthGrid, store: &AppointmentStore) -> String {
    let mut out = format!("{}\n", grid.title());
    for label in weekday_labels(grid.week_start) {
        out.push_str(&format!("{:<width$}", label, width = CELL_WIDTH));
    }
    out.push('\n');

    for week in &grid.weeks {
        for day in &week.days {
            let mut cell = if day.in_reference_month {
                day.date.day().to_string()
            } else {
                format!("({})", day.date.day())
            };
            if day.is_today {
                cell.push('*');
            }
            let count = store.appointments_by_date(day.date).len();
            if count > 0 {
                cell.push_str(&format!("+{}", count));
            }
            out.push_str(&format!("{:<width$}", cell, width = CELL_WIDTH));
        }
        out.push('\n');
    }
    out
}

/// One line of the upcoming list: time, date, title, contact and status.
pub fn render_appointment_line(appointment: &Appointment, store: &AppointmentStore) -> String {
    let mut line = format!(
        "  {}  {}  {}",
        appointment.start.format("%a, %b %-d"),
        appointment.start.format("%-I:%M %p"),
        appointment.title
    );
    if let Some(contact) = appointment.contact_id.as_ref().and_then(|id| store.get_contact(id)) {
        line.push_str(&format!(" with {}", contact.name));
    }
    line.push_str(&format!(" [{}] ({})", appointment.status, appointment.id));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::FixedClock;
    use crate::state::MemoryStorage;
    use crate::store::{NewAppointment, NewContact};
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    #[test]
    fn test_month_offset_outside_calendar_is_an_error() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let app = Application::with_parts(
            Config::default(),
            Box::new(MemoryStorage::new()),
            Arc::new(FixedClock::at_date(today)),
        )
        .unwrap();

        let err = handle_month(&app, None, 4_000_000, None).unwrap_err();
        assert!(err.to_string().contains("outside the supported calendar range"));
        assert!(handle_month(&app, None, i32::MIN, Some(Weekday::Mon)).is_err());
        assert!(handle_month(&app, None, -1, None).is_ok());
    }

    #[test]
    fn test_render_month_marks_today_and_counts() {
        let mut store = AppointmentStore::new();
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();
        store.add_appointment(NewAppointment::new("Call", start, start + Duration::minutes(30)));

        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let grid = build_month_grid(day, day, Weekday::Sun);
        let rendered = render_month(&grid, &store);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "March 2024");
        assert!(lines[1].starts_with("Sun    Mon"));
        assert_eq!(lines.len(), 2 + grid.weeks.len());
        assert!(rendered.contains("15*+1"));
        assert!(lines[2].starts_with("(25)"));
    }

    #[test]
    fn test_render_appointment_line_includes_contact() {
        let mut store = AppointmentStore::new();
        let bob = store.add_contact(NewContact::new("Bob").phone("555-0100")).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();
        let id = store.add_appointment(
            NewAppointment::new("Appointment with Bob", start, start + Duration::minutes(30))
                .with_contact(bob),
        );

        let line = render_appointment_line(store.get_appointment(&id).unwrap(), &store);
        assert!(line.contains("Fri, Mar 15"));
        assert!(line.contains("2:00 PM"));
        assert!(line.contains("with Bob"));
        assert!(line.contains("[confirmed]"));
    }
}
