//! API request and response data models.
//!
//! These structures define the public HTTP contract. They are distinct from
//! the database models so either side can evolve independently.

pub mod reservations;
pub mod tables;
