//! Month arithmetic and labels.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start + Duration::days(i64::from(days_in_month(start.year(), start.month())) - 1)
}

/// First day of the month after the one containing `date`, or `None` past
/// the last representable month.
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date).checked_add_months(Months::new(1))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// First day of the month `months` away from the month containing `date`.
/// Negative values move backwards. `None` when the result falls outside
/// the representable date range.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let start = month_start(date);
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        start.checked_add_months(delta)
    } else {
        start.checked_sub_months(delta)
    }
}

pub fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    shift_months(date, 1)
}

pub fn previous_month(date: NaiveDate) -> Option<NaiveDate> {
    shift_months(date, -1)
}

/// Short weekday names in column order for a week starting on `week_start`.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let mut day = week_start;
    std::array::from_fn(|_| {
        let label = short_name(day);
        day = day.succ();
        label
    })
}

fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
