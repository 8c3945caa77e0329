//! Database models for reservations.

use crate::types::ReservationId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a reservation.
///
/// `Finished` and `Cancelled` are terminal: a reservation that reaches either
/// can never be mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
}

impl ReservationStatus {
    /// Whether any further mutation of the reservation is permitted.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReservationStatus::Finished | ReservationStatus::Cancelled)
    }

    /// The full set of legal lifecycle edges. Every write path consults this
    /// table, so the legality rule is defined exactly once.
    pub fn transition_allowed(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!((self, next), (Booked, Seated) | (Booked, Cancelled) | (Seated, Finished))
    }

    /// The subset of edges a bare status update may drive. The seating edges
    /// (`booked -> seated`, `seated -> finished`) belong to the seating
    /// engine, which performs them together with the table-side write.
    pub fn direct_transition_allowed(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!((self, next), (Booked, Cancelled))
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationStatus::Booked => write!(f, "booked"),
            ReservationStatus::Seated => write!(f, "seated"),
            ReservationStatus::Finished => write!(f, "finished"),
            ReservationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "booked" => Ok(ReservationStatus::Booked),
            "seated" => Ok(ReservationStatus::Seated),
            "finished" => Ok(ReservationStatus::Finished),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Status '{s}' is not a recognized status.")),
        }
    }
}

/// Reservation record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: ReservationId,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i64,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new reservation.
///
/// Fields are already validated and parsed; new reservations always start as
/// `booked`.
#[derive(Debug, Clone)]
pub struct ReservationCreateDBRequest {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i64,
}

/// Database request for a full-record reservation update. The status is not
/// part of the request; status changes go through their own paths.
#[derive(Debug, Clone)]
pub struct ReservationUpdateDBRequest {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i64,
}
