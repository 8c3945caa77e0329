//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx over SQLite,
//! following the repository pattern:
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! Repositories work with SQLx transactions to ensure ACID properties. The
//! seating engine always creates its repositories from one transaction so its
//! multi-statement sequences commit or roll back as a unit; single-row
//! operations may use a plain pooled connection.
//!
//! Migrations live in the `migrations/` directory and are embedded via
//! [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
