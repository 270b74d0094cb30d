//! Month grid construction.
//!
//! A grid covers whole weeks: it starts on the week-start day on or before
//! the first of the month and ends on the last day of the week containing
//! the last of the month. That gives 4 to 6 rows of exactly 7 days.

use super::navigation::{month_end, month_start};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// One cell in the month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_reference_month: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub days: [Day; 7],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// First day of the reference month.
    pub month_start: NaiveDate,
    pub week_start: Weekday,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    /// e.g. "March 2024"
    pub fn title(&self) -> String {
        self.month_start.format("%B %Y").to_string()
    }

    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days().next().map(|d| d.date)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days().last().map(|d| d.date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.first_day(), self.last_day()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }
}

/// Build the grid for the month containing `reference`.
///
/// Any two dates in the same month produce the same grid.
pub fn build_month_grid(reference: NaiveDate, today: NaiveDate, week_start: Weekday) -> MonthGrid {
    let first = month_start(reference);
    let last = month_end(reference);
    let grid_start = start_of_week(first, week_start);
    let grid_end = start_of_week(last, week_start) + Duration::days(6);

    let total_days = (grid_end - grid_start).num_days() + 1;
    let weeks = (0..total_days / 7)
        .map(|w| {
            let week_first = grid_start + Duration::days(w * 7);
            Week {
                days: std::array::from_fn(|i| {
                    let date = week_first + Duration::days(i as i64);
                    Day {
                        date,
                        in_reference_month: date.year() == first.year()
                            && date.month() == first.month(),
                        is_today: date == today,
                    }
                }),
            }
        })
        .collect();

    MonthGrid { month_start: first, week_start, weeks }
}

/// The `week_start` day on or before `date`.
fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday() - week_start.num_days_from_sunday()) % 7;
    date - Duration::days(i64::from(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_march_2024_grid() {
        let grid = build_month_grid(date(2024, 3, 15), date(2024, 3, 15), Weekday::Sun);
        assert_eq!(grid.title(), "March 2024");
        assert_eq!(grid.weeks.len(), 6);
        assert_eq!(grid.first_day(), Some(date(2024, 2, 25)));
        assert_eq!(grid.last_day(), Some(date(2024, 4, 6)));

        let today: Vec<_> = grid.days().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2024, 3, 15));
    }

    #[test]
    fn test_four_row_month() {
        // February 2015 starts on a Sunday and has 28 days.
        let grid = build_month_grid(date(2015, 2, 1), date(2015, 1, 1), Weekday::Sun);
        assert_eq!(grid.weeks.len(), 4);
        assert!(grid.days().all(|d| d.in_reference_month));
        assert!(grid.days().all(|d| !d.is_today));
    }

    #[test]
    fn test_grid_straddles_year_boundary() {
        let grid = build_month_grid(date(2024, 12, 25), date(2025, 1, 2), Weekday::Sun);
        assert_eq!(grid.first_day(), Some(date(2024, 12, 1)));
        assert_eq!(grid.last_day(), Some(date(2025, 1, 4)));
        let jan2 = grid.days().find(|d| d.date == date(2025, 1, 2)).unwrap();
        assert!(jan2.is_today);
        assert!(!jan2.in_reference_month);
    }

    #[test]
    fn test_monday_week_start() {
        let grid = build_month_grid(date(2024, 9, 10), date(2024, 9, 10), Weekday::Mon);
        // September 1st 2024 is a Sunday, so the grid opens on August 26th.
        assert_eq!(grid.first_day(), Some(date(2024, 8, 26)));
        assert!(grid.weeks.iter().all(|w| w.days[0].date.weekday() == Weekday::Mon));
    }

    #[test]
    fn test_contains() {
        let grid = build_month_grid(date(2024, 3, 1), date(2024, 3, 1), Weekday::Sun);
        assert!(grid.contains(date(2024, 2, 25)));
        assert!(!grid.contains(date(2024, 2, 24)));
    }
}
