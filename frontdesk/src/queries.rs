//! Dashboard projections over the store adapters.
//!
//! Thin read-only entry points the request layer calls for listings; each
//! delegates to a repository on a pooled connection.

use crate::db::{
    handlers::{Repository, ReservationFilter, Reservations, Tables},
    models::{reservations::Reservation, tables::DiningTable},
};
use crate::errors::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::instrument;

/// Reservations for one date, excluding `finished`, ordered by time.
#[instrument(skip(pool), err)]
pub async fn reservations_on(pool: &SqlitePool, date: NaiveDate) -> Result<Vec<Reservation>> {
    let mut conn = pool.acquire().await?;
    let reservations = Reservations::new(&mut conn).list(&ReservationFilter::Date(date)).await?;
    Ok(reservations)
}

/// Reservations whose mobile number contains the fragment, digits-only
/// comparison on both sides, ordered by date.
#[instrument(skip(pool, fragment), err)]
pub async fn reservations_by_phone(pool: &SqlitePool, fragment: &str) -> Result<Vec<Reservation>> {
    let mut conn = pool.acquire().await?;
    let reservations = Reservations::new(&mut conn)
        .list(&ReservationFilter::Phone(fragment.to_string()))
        .await?;
    Ok(reservations)
}

/// Every table ordered by name, each carrying its current occupant (if any)
/// so Free/Occupied is derivable without a second query.
#[instrument(skip(pool), err)]
pub async fn all_tables(pool: &SqlitePool) -> Result<Vec<DiningTable>> {
    let mut conn = pool.acquire().await?;
    let tables = Tables::new(&mut conn).list(&()).await?;
    Ok(tables)
}
