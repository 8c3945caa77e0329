//! Database record structures matching the table schemas.

pub mod reservations;
pub mod tables;
