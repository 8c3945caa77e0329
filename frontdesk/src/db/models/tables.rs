//! Database models for dining tables.

use crate::types::{ReservationId, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dining table record as stored.
///
/// `reservation_id` is the current occupant, present only while that
/// reservation is seated. Listing tables therefore carries enough to derive
/// Free/Occupied without a second query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiningTable {
    pub id: TableId,
    pub table_name: String,
    pub capacity: i64,
    pub reservation_id: Option<ReservationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new table. Tables are created free.
#[derive(Debug, Clone)]
pub struct TableCreateDBRequest {
    pub table_name: String,
    pub capacity: i64,
}
