//! HTTP handlers for table resources, including the seating routes.

use crate::api::models::reservations::ReservationResponse;
use crate::api::models::tables::{SeatRequest, TableResponse};
use crate::db::handlers::{Repository, Tables};
use crate::db::models::tables::TableCreateDBRequest;
use crate::errors::{Error, Result};
use crate::types::TableId;
use crate::validate::{TableInput, validate_table};
use crate::{AppState, queries, seating};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List every table by name, with current occupancy.
#[tracing::instrument(skip_all)]
pub async fn list_tables(State(state): State<AppState>) -> Result<Json<Vec<TableResponse>>> {
    let tables = queries::all_tables(&state.db).await?;
    Ok(Json(tables.into_iter().map(TableResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn create_table(State(state): State<AppState>, Json(input): Json<TableInput>) -> Result<(StatusCode, Json<TableResponse>)> {
    let validated = validate_table(&input).map_err(Error::Validation)?;

    let mut conn = state.db.acquire().await?;
    let created = Tables::new(&mut conn)
        .create(&TableCreateDBRequest {
            table_name: validated.table_name,
            capacity: validated.capacity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Seat a reservation at this table.
#[tracing::instrument(skip_all)]
pub async fn seat_table(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(body): Json<SeatRequest>,
) -> Result<Json<ReservationResponse>> {
    let reservation_id = body
        .reservation_id
        .ok_or_else(|| Error::Validation(vec!["A reservation_id is required.".to_string()]))?;

    let seated = seating::seat(&state.db, table_id, reservation_id).await?;
    Ok(Json(seated.into()))
}

/// Finish the seated reservation and free the table.
#[tracing::instrument(skip_all)]
pub async fn unseat_table(State(state): State<AppState>, Path(table_id): Path<TableId>) -> Result<StatusCode> {
    seating::unseat(&state.db, table_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
