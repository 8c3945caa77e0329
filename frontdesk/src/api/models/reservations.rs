//! API request/response models for reservations.
//!
//! Create and update bodies are deserialized into
//! [`crate::validate::ReservationInput`] directly; the validation engine owns
//! the shape rules, so the API layer doesn't duplicate them here.

use crate::db::models::reservations::{Reservation, ReservationStatus};
use crate::types::ReservationId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for listing reservations. Exactly one of the two is
/// expected; a phone fragment wins if both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct ListReservationsQuery {
    /// Dashboard date to list
    pub date: Option<NaiveDate>,
    /// Phone fragment to search for (punctuation ignored)
    pub mobile_number: Option<String>,
}

/// Request body for a status-only update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Full reservation details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
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

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            first_name: reservation.first_name,
            last_name: reservation.last_name,
            mobile_number: reservation.mobile_number,
            reservation_date: reservation.reservation_date,
            reservation_time: reservation.reservation_time,
            people: reservation.people,
            status: reservation.status,
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
        }
    }
}
