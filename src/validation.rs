//! Validation helpers for contact and appointment fields.
//
// Every validator returns a `StoreError::Validation` naming the offending field,
// so form layers can point at the right input.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex is valid"));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("time regex is valid"));

/// Require a non-blank value, returning it trimmed.
pub fn require_text<'a>(field: &'static str, value: &'a str) -> StoreResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation(field, format!("{} is required", field)));
    }
    Ok(trimmed)
}

/// Trim an optional value; blank strings become `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub fn validate_email(email: &str) -> StoreResult<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(StoreError::validation("email", "Please enter a valid email address"));
    }
    Ok(())
}

/// Contacts must be reachable somehow.
pub fn require_email_or_phone(email: Option<&str>, phone: Option<&str>) -> StoreResult<()> {
    if email.is_none() && phone.is_none() {
        return Err(StoreError::validation(
            "email",
            "Either email or phone number is required",
        ));
    }
    Ok(())
}

/// Check that `tz` names an IANA timezone, e.g. "Europe/Berlin" or "UTC".
pub fn validate_timezone(tz: &str) -> StoreResult<()> {
    tz.parse::<Tz>()
        .map(|_| ())
        .map_err(|_| StoreError::validation("timezone", format!("Unknown timezone '{}'", tz)))
}

/// Parse a date string of the form YYYY-MM-DD.
pub fn parse_date(date: &str) -> StoreResult<NaiveDate> {
    let date = date.trim();
    if !DATE_RE.is_match(date) {
        return Err(StoreError::validation(
            "date",
            format!("Invalid date '{}'. Expected YYYY-MM-DD", date),
        ));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| StoreError::validation("date", format!("Invalid date '{}': {}", date, e)))
}

/// Parse a wall-clock time of the form HH:MM.
pub fn parse_time(time: &str) -> StoreResult<NaiveTime> {
    let time = time.trim();
    if !TIME_RE.is_match(time) {
        return Err(StoreError::validation(
            "time",
            format!("Invalid time '{}'. Expected HH:MM", time),
        ));
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| StoreError::validation("time", format!("Invalid time '{}': {}", time, e)))
}

/// Appointments may not end before they start.
pub fn validate_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> StoreResult<()> {
    if end < start {
        return Err(StoreError::validation("end", "Appointment cannot end before it starts"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("bob@example.com", true ; "plain address")]
    #[test_case("bob.smith+tag@mail.example.org", true ; "tagged address")]
    #[test_case("bob@example", false ; "missing tld")]
    #[test_case("bob example@mail.com", false ; "contains space")]
    #[test_case("@example.com", false ; "missing local part")]
    fn test_validate_email(email: &str, valid: bool) {
        assert_eq!(validate_email(email).is_ok(), valid);
    }

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("name", "  Bob ").unwrap(), "Bob");
        assert!(matches!(
            require_text("name", "   "),
            Err(StoreError::Validation { field: "name", .. })
        ));
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  a@b.co ")), Some("a@b.co".to_string()));
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn test_require_email_or_phone() {
        assert!(require_email_or_phone(Some("a@b.co"), None).is_ok());
        assert!(require_email_or_phone(None, Some("555-0100")).is_ok());
        assert!(require_email_or_phone(None, None).is_err());
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(validate_timezone("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-15").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("14:00").unwrap(), NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(parse_time("9:05").unwrap(), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert!(parse_time("24:30").is_err());
        assert!(parse_time("14:60").is_err());
        assert!(parse_time("2pm").is_err());
    }
}
