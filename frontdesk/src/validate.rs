//! Validation engine for incoming reservation and table data.
//!
//! Pure functions, no I/O. Every rule that fails is reported, so a caller can
//! render the complete violation set in one round trip instead of fixing
//! problems one at a time.
//!
//! Business rules are fixed: the restaurant is closed on Tuesdays and takes
//! parties between 10:30 and 21:30 inclusive, minute precision.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MOBILE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("valid regex"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid regex"));

/// Raw reservation fields as the request layer received them. Everything is
/// optional here; presence is one of the things being validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    /// Kept as raw JSON so a fractional or wrong-typed value reaches the
    /// validator (and its accumulated error list) instead of failing
    /// deserialization.
    pub people: Option<serde_json::Value>,
    pub status: Option<String>,
}

/// Reservation fields after validation, parsed into their real types.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i64,
}

/// Raw table fields as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableInput {
    pub table_name: Option<String>,
    pub capacity: Option<serde_json::Value>,
}

/// Table fields after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTable {
    pub table_name: String,
    pub capacity: i64,
}

fn required(field: Option<&str>, message: &str, errors: &mut Vec<String>) -> bool {
    match field {
        Some(value) if !value.trim().is_empty() => true,
        _ => {
            errors.push(message.to_string());
            false
        }
    }
}

fn integer_at_least_one(value: Option<&serde_json::Value>, missing: &str, invalid: &str, errors: &mut Vec<String>) -> Option<i64> {
    let Some(value) = value else {
        errors.push(missing.to_string());
        return None;
    };
    if value.is_null() {
        errors.push(missing.to_string());
        return None;
    }
    // as_i64 is None for fractional numbers and non-numeric JSON values
    match value.as_i64() {
        Some(n) if n >= 1 => Some(n),
        _ => {
            errors.push(invalid.to_string());
            None
        }
    }
}

/// Validate reservation fields against shape and business rules.
///
/// `now` is the instant the validation runs; a reservation at or before it is
/// rejected. All violated rules are returned, not just the first.
pub fn validate_reservation(input: &ReservationInput, now: NaiveDateTime) -> Result<ValidatedReservation, Vec<String>> {
    let mut errors = Vec::new();

    let has_first = required(input.first_name.as_deref(), "First name is required.", &mut errors);
    let has_last = required(input.last_name.as_deref(), "Last name is required.", &mut errors);
    let has_mobile = required(input.mobile_number.as_deref(), "Mobile number is required.", &mut errors);
    let has_date = required(input.reservation_date.as_deref(), "Reservation date is required.", &mut errors);
    let has_time = required(input.reservation_time.as_deref(), "Reservation time is required.", &mut errors);

    if has_mobile {
        let mobile = input.mobile_number.as_deref().unwrap_or_default();
        if !MOBILE_NUMBER_RE.is_match(mobile) {
            errors.push("Mobile number must match XXX-XXX-XXXX.".to_string());
        }
    }

    let date = if has_date {
        let raw = input.reservation_date.as_deref().unwrap_or_default();
        let parsed = DATE_RE.is_match(raw).then(|| raw.parse::<NaiveDate>().ok()).flatten();
        if parsed.is_none() {
            errors.push("Reservation date must be a valid YYYY-MM-DD date.".to_string());
        }
        parsed
    } else {
        None
    };

    let time = if has_time {
        let raw = input.reservation_time.as_deref().unwrap_or_default();
        let parsed = TIME_RE
            .is_match(raw)
            .then(|| NaiveTime::parse_from_str(raw, "%H:%M").ok())
            .flatten();
        if parsed.is_none() {
            errors.push("Reservation time must be a valid HH:MM time.".to_string());
        }
        parsed
    } else {
        None
    };

    let people = integer_at_least_one(
        input.people.as_ref(),
        "Number of people is required.",
        "Number of people must be a whole number of at least 1.",
        &mut errors,
    );

    if let (Some(date), Some(time)) = (date, time) {
        if date.and_time(time) <= now {
            errors.push("Reservation must be in the future.".to_string());
        }
        if date.weekday() == Weekday::Tue {
            errors.push("The restaurant is closed on Tuesdays.".to_string());
        }
        // Minute-level inclusive bounds, not a duration window
        let minute_of_day = (time.hour(), time.minute());
        if minute_of_day < (10, 30) || minute_of_day > (21, 30) {
            errors.push("Reservation time must be between 10:30 and 21:30.".to_string());
        }
    }

    match input.status.as_deref() {
        None | Some("booked") => {}
        Some(status @ ("seated" | "finished" | "cancelled")) => {
            errors.push(format!("A new reservation cannot be created with status '{status}'."));
        }
        Some(status) => {
            errors.push(format!("Status '{status}' is not a recognized status."));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Presence and parse checks passed for everything below
    Ok(ValidatedReservation {
        first_name: input.first_name.clone().unwrap_or_default(),
        last_name: input.last_name.clone().unwrap_or_default(),
        mobile_number: input.mobile_number.clone().unwrap_or_default(),
        reservation_date: date.unwrap_or_default(),
        reservation_time: time.unwrap_or_default(),
        people: people.unwrap_or_default(),
    })
}

/// Validate table fields: a name of at least two characters and a positive
/// integer capacity. Accumulates like reservation validation.
pub fn validate_table(input: &TableInput) -> Result<ValidatedTable, Vec<String>> {
    let mut errors = Vec::new();

    let table_name = input.table_name.as_deref().unwrap_or_default().trim();
    if table_name.chars().count() < 2 {
        errors.push("Table name must be at least 2 characters long.".to_string());
    }

    let capacity = integer_at_least_one(
        input.capacity.as_ref(),
        "Capacity is required.",
        "Capacity must be a whole number of at least 1.",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedTable {
        table_name: table_name.to_string(),
        capacity: capacity.unwrap_or_default(),
    })
}
