use chrono::{Datelike, NaiveDate, Weekday};
use positify::build_month_grid;
use positify::calendar::{month_end, next_month, previous_month};
use test_case::test_case;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test_case(Weekday::Sun ; "sunday start")]
#[test_case(Weekday::Mon ; "monday start")]
#[test_case(Weekday::Sat ; "saturday start")]
fn every_month_is_whole_weeks_covering_the_month(week_start: Weekday) {
    let today = date(2024, 6, 1);
    for year in [1999, 2000, 2023, 2024, 2100] {
        for month in 1..=12 {
            let reference = date(year, month, 1);
            let grid = build_month_grid(reference, today, week_start);

            assert!((4..=6).contains(&grid.weeks.len()), "{}: {} rows", reference, grid.weeks.len());
            assert_eq!(grid.days().count() % 7, 0);
            assert_eq!(grid.first_day().unwrap().weekday(), week_start);

            // Contiguous, one day at a time
            let dates: Vec<NaiveDate> = grid.days().map(|d| d.date).collect();
            assert!(dates.windows(2).all(|w| (w[1] - w[0]).num_days() == 1));

            // Every day of the month exactly once, flagged in-month
            let in_month: Vec<NaiveDate> =
                grid.days().filter(|d| d.in_reference_month).map(|d| d.date).collect();
            assert_eq!(in_month.first(), Some(&reference));
            assert_eq!(in_month.last(), Some(&month_end(reference)));
            assert_eq!(in_month.len() as u32, month_end(reference).day());
            assert!(grid.days().all(|d| d.in_reference_month == (d.date.month() == month)));
        }
    }
}

#[test]
fn same_month_inputs_give_identical_grids() {
    let today = date(2024, 3, 15);
    let first = build_month_grid(date(2024, 3, 1), today, Weekday::Sun);
    for day in 2..=31 {
        assert_eq!(build_month_grid(date(2024, 3, day), today, Weekday::Sun), first);
    }
}

#[test]
fn today_highlight_only_when_visible() {
    let grid = build_month_grid(date(2024, 3, 1), date(2024, 3, 15), Weekday::Sun);
    let highlighted: Vec<NaiveDate> = grid.days().filter(|d| d.is_today).map(|d| d.date).collect();
    assert_eq!(highlighted, vec![date(2024, 3, 15)]);

    let grid = build_month_grid(date(2024, 3, 1), date(2024, 5, 15), Weekday::Sun);
    assert_eq!(grid.days().filter(|d| d.is_today).count(), 0);
}

#[test]
fn navigation_rebuilds_from_scratch() {
    let today = date(2025, 1, 10);
    let december = build_month_grid(previous_month(today).unwrap(), today, Weekday::Sun);
    assert_eq!(december.title(), "December 2024");
    // The December grid stops at January 4th, before today.
    assert_eq!(december.last_day(), Some(date(2025, 1, 4)));
    assert!(december.days().all(|d| !d.is_today));

    let back = build_month_grid(next_month(december.month_start).unwrap(), today, Weekday::Sun);
    assert_eq!(back, build_month_grid(today, today, Weekday::Sun));
}
