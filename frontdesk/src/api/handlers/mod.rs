//! HTTP request handlers, organized by resource.
//!
//! Each handler deserializes the request, runs the validation engine where
//! input is involved, executes the operation via the repositories or the
//! seating engine, and serializes the result. Handlers return
//! [`crate::errors::Error`], which converts to the right HTTP status and
//! JSON body automatically.

pub mod reservations;
pub mod tables;
