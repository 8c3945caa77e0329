//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed operations over one table, and returns domain models from
//! [`crate::db::models`]. Repositories created from a transaction share that
//! transaction's snapshot, which is what the seating engine relies on for its
//! read-check-write sequences.
//!
//! ```ignore
//! use frontdesk::db::handlers::{Repository, Reservations};
//!
//! async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Reservations::new(&mut tx);
//!     let reservation = repo.get_by_id(id).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod repository;
pub mod reservations;
pub mod tables;

pub use repository::Repository;
pub use reservations::{ReservationFilter, Reservations};
pub use tables::Tables;
