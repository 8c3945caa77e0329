//! API request/response models for dining tables.

use crate::db::models::tables::DiningTable;
use crate::types::{ReservationId, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for seating a reservation at a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRequest {
    /// Optional so a missing field produces the accumulated-validation shape
    /// rather than a deserialization rejection
    pub reservation_id: Option<ReservationId>,
}

/// Full table details returned by the API. `reservation_id` present means
/// occupied, absent means free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    pub id: TableId,
    pub table_name: String,
    pub capacity: i64,
    pub reservation_id: Option<ReservationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DiningTable> for TableResponse {
    fn from(table: DiningTable) -> Self {
        Self {
            id: table.id,
            table_name: table.table_name,
            capacity: table.capacity,
            reservation_id: table.reservation_id,
            created_at: table.created_at,
            updated_at: table.updated_at,
        }
    }
}
