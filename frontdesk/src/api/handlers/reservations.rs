//! HTTP handlers for reservation resources.

use crate::api::models::reservations::{ListReservationsQuery, ReservationResponse, StatusUpdate};
use crate::db::handlers::{Repository, Reservations};
use crate::db::models::reservations::{ReservationCreateDBRequest, ReservationStatus, ReservationUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::ReservationId;
use crate::validate::{ReservationInput, validate_reservation};
use crate::{AppState, queries};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;

/// List reservations for a dashboard date, or search by phone fragment.
#[tracing::instrument(skip_all)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<Vec<ReservationResponse>>> {
    let reservations = if let Some(fragment) = &query.mobile_number {
        queries::reservations_by_phone(&state.db, fragment).await?
    } else if let Some(date) = query.date {
        queries::reservations_on(&state.db, date).await?
    } else {
        return Err(Error::Validation(vec![
            "Either a date or a mobile_number query parameter is required.".to_string(),
        ]));
    };

    Ok(Json(reservations.into_iter().map(ReservationResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(input): Json<ReservationInput>,
) -> Result<(StatusCode, Json<ReservationResponse>)> {
    let validated = validate_reservation(&input, Utc::now().naive_utc()).map_err(Error::Validation)?;

    let mut conn = state.db.acquire().await?;
    let created = Reservations::new(&mut conn)
        .create(&ReservationCreateDBRequest {
            first_name: validated.first_name,
            last_name: validated.last_name,
            mobile_number: validated.mobile_number,
            reservation_date: validated.reservation_date,
            reservation_time: validated.reservation_time,
            people: validated.people,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[tracing::instrument(skip_all)]
pub async fn get_reservation(State(state): State<AppState>, Path(id): Path<ReservationId>) -> Result<Json<ReservationResponse>> {
    let mut conn = state.db.acquire().await?;
    let reservation = Reservations::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Reservation", id))?;

    Ok(Json(reservation.into()))
}

/// Full-record update. Runs the same validation as creation; terminal
/// reservations are immutable.
#[tracing::instrument(skip_all)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<ReservationId>,
    Json(input): Json<ReservationInput>,
) -> Result<Json<ReservationResponse>> {
    let validated = validate_reservation(&input, Utc::now().naive_utc()).map_err(Error::Validation)?;

    let mut tx = state.db.begin().await?;
    let mut repo = Reservations::new(&mut tx);

    let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Reservation", id))?;
    if current.status.is_terminal() {
        return Err(Error::conflict(format!("A {} reservation cannot be updated.", current.status)));
    }

    let updated = repo
        .update_fields(
            id,
            &ReservationUpdateDBRequest {
                first_name: validated.first_name,
                last_name: validated.last_name,
                mobile_number: validated.mobile_number,
                reservation_date: validated.reservation_date,
                reservation_time: validated.reservation_time,
                people: validated.people,
            },
        )
        .await?;
    tx.commit().await?;

    Ok(Json(updated.into()))
}

/// Status-only update. Only edges the lifecycle table marks as directly
/// writable are accepted; the seating edges go through the seating routes.
#[tracing::instrument(skip_all)]
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<ReservationId>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<ReservationResponse>> {
    let next: ReservationStatus = body.status.parse().map_err(|message| Error::Validation(vec![message]))?;

    let mut tx = state.db.begin().await?;
    let mut repo = Reservations::new(&mut tx);

    let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Reservation", id))?;
    if !current.status.direct_transition_allowed(next) {
        return Err(Error::conflict(format!(
            "Status cannot change from '{}' to '{next}'.",
            current.status
        )));
    }

    let updated = repo.set_status(id, next).await?;
    tx.commit().await?;

    Ok(Json(updated.into()))
}
