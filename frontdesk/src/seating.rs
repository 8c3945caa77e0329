//! Seating engine: the only writer allowed to touch a reservation and a
//! table within one logical operation.
//!
//! `seat` and `unseat` are the two compound operations in the system. Each
//! runs its whole read-check-write sequence inside a single transaction, so
//! the checks and the writes see the same snapshot: two concurrent attempts
//! to seat the same table cannot both succeed, the loser observes the
//! winner's committed assignment and fails with a conflict. Any failure path
//! drops the transaction un-committed, leaving both rows untouched.

use crate::db::{
    handlers::{Repository, Reservations, Tables},
    models::reservations::{Reservation, ReservationStatus},
};
use crate::errors::{Error, Result};
use crate::types::{ReservationId, TableId, abbrev_uuid};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

/// Atomically bind a booked reservation to a free table with sufficient
/// capacity, transitioning the reservation to `seated`.
#[instrument(skip(pool), fields(table_id = %abbrev_uuid(&table_id), reservation_id = %abbrev_uuid(&reservation_id)), err)]
pub async fn seat(pool: &SqlitePool, table_id: TableId, reservation_id: ReservationId) -> Result<Reservation> {
    let mut tx = pool.begin().await?;

    let reservation = Reservations::new(&mut tx)
        .get_by_id(reservation_id)
        .await?
        .ok_or_else(|| Error::not_found("Reservation", reservation_id))?;
    if reservation.status == ReservationStatus::Seated {
        return Err(Error::conflict(format!("Reservation {reservation_id} is already seated.")));
    }
    if !reservation.status.transition_allowed(ReservationStatus::Seated) {
        return Err(Error::conflict(format!(
            "Reservation {reservation_id} cannot be seated while {}.",
            reservation.status
        )));
    }

    let table = Tables::new(&mut tx)
        .get_by_id(table_id)
        .await?
        .ok_or_else(|| Error::not_found("Table", table_id))?;
    if table.capacity < reservation.people {
        return Err(Error::conflict(
            "Table does not have sufficient capacity for the number of people in the reservation.",
        ));
    }
    if table.reservation_id.is_some() {
        return Err(Error::conflict(format!("Table {} is already occupied.", table.table_name)));
    }

    // Claim guarded on the table still being free; a racing seat that
    // committed first makes this a no-op and the attempt fails.
    let claimed = sqlx::query("UPDATE tables SET reservation_id = ?, updated_at = ? WHERE id = ? AND reservation_id IS NULL")
        .bind(reservation_id)
        .bind(Utc::now())
        .bind(table_id)
        .execute(&mut *tx)
        .await?;
    if claimed.rows_affected() == 0 {
        return Err(Error::conflict(format!("Table {} is already occupied.", table.table_name)));
    }

    let seated = Reservations::new(&mut tx).set_status(reservation_id, ReservationStatus::Seated).await?;
    tx.commit().await?;

    Ok(seated)
}

/// Atomically release a table's assignment, transitioning the occupying
/// reservation to `finished`.
#[instrument(skip(pool), fields(table_id = %abbrev_uuid(&table_id)), err)]
pub async fn unseat(pool: &SqlitePool, table_id: TableId) -> Result<Reservation> {
    let mut tx = pool.begin().await?;

    let table = Tables::new(&mut tx)
        .get_by_id(table_id)
        .await?
        .ok_or_else(|| Error::not_found("Table", table_id))?;
    let Some(occupant_id) = table.reservation_id else {
        return Err(Error::conflict("Table is not occupied."));
    };

    let occupant = Reservations::new(&mut tx)
        .get_by_id(occupant_id)
        .await?
        .ok_or_else(|| Error::not_found("Reservation", occupant_id))?;
    if !occupant.status.transition_allowed(ReservationStatus::Finished) {
        return Err(Error::conflict(format!(
            "Reservation {occupant_id} cannot be finished while {}.",
            occupant.status
        )));
    }

    let finished = Reservations::new(&mut tx).set_status(occupant_id, ReservationStatus::Finished).await?;
    sqlx::query("UPDATE tables SET reservation_id = NULL, updated_at = ? WHERE id = ? AND reservation_id = ?")
        .bind(Utc::now())
        .bind(table_id)
        .bind(occupant_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(finished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::reservations::ReservationCreateDBRequest;
    use crate::db::models::tables::{DiningTable, TableCreateDBRequest};
    use uuid::Uuid;

    async fn create_reservation(pool: &SqlitePool, people: i64) -> Reservation {
        let mut conn = pool.acquire().await.unwrap();
        Reservations::new(&mut conn)
            .create(&ReservationCreateDBRequest {
                first_name: "Rick".to_string(),
                last_name: "Sanchez".to_string(),
                mobile_number: "202-555-0101".to_string(),
                reservation_date: "2030-05-03".parse().unwrap(),
                reservation_time: chrono::NaiveTime::parse_from_str("19:00", "%H:%M").unwrap(),
                people,
            })
            .await
            .unwrap()
    }

    async fn create_table(pool: &SqlitePool, table_name: &str, capacity: i64) -> DiningTable {
        let mut conn = pool.acquire().await.unwrap();
        Tables::new(&mut conn)
            .create(&TableCreateDBRequest {
                table_name: table_name.to_string(),
                capacity,
            })
            .await
            .unwrap()
    }

    async fn fetch_reservation(pool: &SqlitePool, id: ReservationId) -> Reservation {
        let mut conn = pool.acquire().await.unwrap();
        Reservations::new(&mut conn).get_by_id(id).await.unwrap().unwrap()
    }

    async fn fetch_table(pool: &SqlitePool, id: TableId) -> DiningTable {
        let mut conn = pool.acquire().await.unwrap();
        Tables::new(&mut conn).get_by_id(id).await.unwrap().unwrap()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn seats_a_booked_reservation(pool: SqlitePool) {
        let reservation = create_reservation(&pool, 4).await;
        let table = create_table(&pool, "T2", 6).await;

        let seated = seat(&pool, table.id, reservation.id).await.unwrap();
        assert_eq!(seated.status, ReservationStatus::Seated);
        assert_eq!(fetch_table(&pool, table.id).await.reservation_id, Some(reservation.id));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn seat_fails_not_found_for_missing_parties(pool: SqlitePool) {
        let reservation = create_reservation(&pool, 2).await;
        let table = create_table(&pool, "T1", 4).await;

        let err = seat(&pool, table.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "Reservation", .. }));

        let err = seat(&pool, Uuid::new_v4(), reservation.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "Table", .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn insufficient_capacity_makes_no_mutation(pool: SqlitePool) {
        let reservation = create_reservation(&pool, 4).await;
        let table = create_table(&pool, "T1", 2).await;

        let err = seat(&pool, table.id, reservation.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        assert_eq!(fetch_reservation(&pool, reservation.id).await.status, ReservationStatus::Booked);
        assert!(fetch_table(&pool, table.id).await.reservation_id.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn second_seat_of_the_same_table_conflicts(pool: SqlitePool) {
        let first = create_reservation(&pool, 2).await;
        let second = create_reservation(&pool, 2).await;
        let table = create_table(&pool, "T1", 4).await;

        seat(&pool, table.id, first.id).await.unwrap();
        let err = seat(&pool, table.id, second.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        // The first assignment is untouched and the loser stays booked
        assert_eq!(fetch_table(&pool, table.id).await.reservation_id, Some(first.id));
        assert_eq!(fetch_reservation(&pool, second.id).await.status, ReservationStatus::Booked);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn capacity_is_checked_before_occupancy(pool: SqlitePool) {
        let first = create_reservation(&pool, 2).await;
        let big_party = create_reservation(&pool, 4).await;
        let table = create_table(&pool, "T1", 2).await;

        seat(&pool, table.id, first.id).await.unwrap();

        // The table is both occupied and too small; the capacity conflict is
        // the one reported
        let err = seat(&pool, table.id, big_party.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        assert!(err.to_string().contains("sufficient capacity"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn an_already_seated_reservation_cannot_be_seated_again(pool: SqlitePool) {
        let reservation = create_reservation(&pool, 2).await;
        let first = create_table(&pool, "T1", 4).await;
        let second = create_table(&pool, "T2", 4).await;

        seat(&pool, first.id, reservation.id).await.unwrap();
        let err = seat(&pool, second.id, reservation.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        assert!(fetch_table(&pool, second.id).await.reservation_id.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn cancelled_reservations_cannot_be_seated(pool: SqlitePool) {
        let reservation = create_reservation(&pool, 2).await;
        let table = create_table(&pool, "T1", 4).await;

        {
            let mut conn = pool.acquire().await.unwrap();
            Reservations::new(&mut conn)
                .set_status(reservation.id, ReservationStatus::Cancelled)
                .await
                .unwrap();
        }

        let err = seat(&pool, table.id, reservation.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        assert!(fetch_table(&pool, table.id).await.reservation_id.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn unseat_requires_an_occupied_table(pool: SqlitePool) {
        let table = create_table(&pool, "T1", 4).await;

        let err = unseat(&pool, table.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        let err = unseat(&pool, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "Table", .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn unseat_finishes_the_reservation_and_frees_the_table(pool: SqlitePool) {
        let reservation = create_reservation(&pool, 2).await;
        let table = create_table(&pool, "T1", 4).await;
        seat(&pool, table.id, reservation.id).await.unwrap();

        let finished = unseat(&pool, table.id).await.unwrap();
        assert_eq!(finished.status, ReservationStatus::Finished);
        assert!(fetch_table(&pool, table.id).await.reservation_id.is_none());

        // The table is free to seat again
        let next = create_reservation(&pool, 2).await;
        seat(&pool, table.id, next.id).await.unwrap();
    }

    /// Create a 4-top on a Friday evening, bounce off a 2-seat table, land on
    /// a 6-seat table, then finish.
    #[sqlx::test]
    #[test_log::test]
    async fn seat_and_finish_walkthrough(pool: SqlitePool) {
        let reservation = create_reservation(&pool, 4).await;
        assert_eq!(reservation.status, ReservationStatus::Booked);

        let small = create_table(&pool, "T1", 2).await;
        let err = seat(&pool, small.id, reservation.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        let big = create_table(&pool, "T2", 6).await;
        seat(&pool, big.id, reservation.id).await.unwrap();
        assert_eq!(fetch_reservation(&pool, reservation.id).await.status, ReservationStatus::Seated);
        assert_eq!(fetch_table(&pool, big.id).await.reservation_id, Some(reservation.id));

        unseat(&pool, big.id).await.unwrap();
        assert_eq!(fetch_reservation(&pool, reservation.id).await.status, ReservationStatus::Finished);
        assert!(fetch_table(&pool, big.id).await.reservation_id.is_none());
    }
}
