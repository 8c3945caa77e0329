//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response data structures
//!
//! The HTTP layer is deliberately thin: no business rule lives here. Routes
//! mirror the dashboard's needs — reservation CRUD plus the two seating
//! routes on tables.

pub mod handlers;
pub mod models;

use crate::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reservations", get(handlers::reservations::list_reservations))
        .route("/reservations", post(handlers::reservations::create_reservation))
        .route("/reservations/{id}", get(handlers::reservations::get_reservation))
        .route("/reservations/{id}", put(handlers::reservations::update_reservation))
        .route("/reservations/{id}/status", put(handlers::reservations::update_reservation_status))
        .route("/tables", get(handlers::tables::list_tables))
        .route("/tables", post(handlers::tables::create_table))
        .route("/tables/{id}/seat", put(handlers::tables::seat_table))
        .route("/tables/{id}/seat", delete(handlers::tables::unseat_table))
        .with_state(state)
}
