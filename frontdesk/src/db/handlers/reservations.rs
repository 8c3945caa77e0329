//! Database repository for reservations.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::reservations::{Reservation, ReservationCreateDBRequest, ReservationStatus, ReservationUpdateDBRequest},
};
use crate::types::{ReservationId, abbrev_uuid};
use chrono::{NaiveDate, Utc};
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing reservations: either a dashboard date or a phone
/// fragment, never both.
#[derive(Debug, Clone)]
pub enum ReservationFilter {
    /// Reservations for one date, excluding `finished`, by time ascending.
    Date(NaiveDate),
    /// Reservations whose digits-only mobile number contains the digits-only
    /// fragment, by date ascending.
    Phone(String),
}

pub struct Reservations<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Reservations<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Full-record update; refreshes `updated_at`. Status is untouched.
    #[instrument(skip(self, request), fields(reservation_id = %abbrev_uuid(&id)), err)]
    pub async fn update_fields(&mut self, id: ReservationId, request: &ReservationUpdateDBRequest) -> Result<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET
                first_name = ?,
                last_name = ?,
                mobile_number = ?,
                reservation_date = ?,
                reservation_time = ?,
                people = ?,
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.mobile_number)
        .bind(request.reservation_date)
        .bind(request.reservation_time)
        .bind(request.people)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(reservation)
    }

    /// Status-only update; refreshes `updated_at`. Legality of the transition
    /// is the caller's concern, checked against the same snapshot.
    #[instrument(skip(self), fields(reservation_id = %abbrev_uuid(&id), status = %status), err)]
    pub async fn set_status(&mut self, id: ReservationId, status: ReservationStatus) -> Result<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET
                status = ?,
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(reservation)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Reservations<'c> {
    type CreateRequest = ReservationCreateDBRequest;
    type Response = Reservation;
    type Id = ReservationId;
    type Filter = ReservationFilter;

    #[instrument(skip(self, request), fields(date = %request.reservation_date), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let now = Utc::now();
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations
                (id, first_name, last_name, mobile_number, reservation_date, reservation_time, people, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.mobile_number)
        .bind(request.reservation_date)
        .bind(request.reservation_time)
        .bind(request.people)
        .bind(ReservationStatus::Booked)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(reservation)
    }

    #[instrument(skip(self), fields(reservation_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(reservation)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let reservations = match filter {
            ReservationFilter::Date(date) => {
                sqlx::query_as::<_, Reservation>(
                    r#"
                    SELECT * FROM reservations
                    WHERE reservation_date = ? AND status <> 'finished'
                    ORDER BY reservation_time
                    "#,
                )
                .bind(date)
                .fetch_all(&mut *self.db)
                .await?
            }
            ReservationFilter::Phone(fragment) => {
                // Both sides are reduced to digits so formatting punctuation
                // never affects matching.
                let digits: String = fragment.chars().filter(|c| c.is_ascii_digit()).collect();
                sqlx::query_as::<_, Reservation>(
                    r#"
                    SELECT * FROM reservations
                    WHERE REPLACE(REPLACE(REPLACE(REPLACE(mobile_number, '-', ''), ' ', ''), '(', ''), ')', '') LIKE ?
                    ORDER BY reservation_date
                    "#,
                )
                .bind(format!("%{digits}%"))
                .fetch_all(&mut *self.db)
                .await?
            }
        };

        Ok(reservations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use sqlx::SqlitePool;

    fn request(first_name: &str, mobile_number: &str, date: &str, time: &str) -> ReservationCreateDBRequest {
        ReservationCreateDBRequest {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            mobile_number: mobile_number.to_string(),
            reservation_date: date.parse::<NaiveDate>().unwrap(),
            reservation_time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            people: 2,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn create_then_get_round_trips(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let created = repo.create(&request("Rick", "202-555-0101", "2030-05-03", "19:00")).await.unwrap();
        assert_eq!(created.status, ReservationStatus::Booked);
        assert_eq!(created.people, 2);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn get_by_id_absent_is_none(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn date_listing_orders_by_time_and_skips_finished(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let late = repo.create(&request("Late", "202-555-0101", "2030-05-03", "20:30")).await.unwrap();
        let early = repo.create(&request("Early", "202-555-0102", "2030-05-03", "11:00")).await.unwrap();
        let done = repo.create(&request("Done", "202-555-0103", "2030-05-03", "12:00")).await.unwrap();
        repo.set_status(done.id, ReservationStatus::Finished).await.unwrap();
        // Different date, must not appear
        repo.create(&request("Other", "202-555-0104", "2030-05-04", "11:00")).await.unwrap();

        let listed = repo
            .list(&ReservationFilter::Date("2030-05-03".parse().unwrap()))
            .await
            .unwrap();

        let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn phone_search_ignores_punctuation(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let hit = repo.create(&request("Hit", "202-555-0199", "2030-05-03", "19:00")).await.unwrap();
        repo.create(&request("Miss", "808-555-0100", "2030-05-03", "19:30")).await.unwrap();

        // Fragment carries punctuation the stored value doesn't
        let listed = repo.list(&ReservationFilter::Phone("(555) 01".to_string())).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
        assert!(ids.contains(&hit.id));

        let listed = repo.list(&ReservationFilter::Phone("5550199".to_string())).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, hit.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn phone_search_orders_by_date(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let later = repo.create(&request("Later", "202-555-0101", "2030-06-01", "19:00")).await.unwrap();
        let sooner = repo.create(&request("Sooner", "202-555-0101", "2030-05-01", "19:00")).await.unwrap();

        let listed = repo.list(&ReservationFilter::Phone("2025550101".to_string())).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn update_fields_rewrites_record_and_refreshes_updated_at(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let created = repo.create(&request("Rick", "202-555-0101", "2030-05-03", "19:00")).await.unwrap();

        let updated = repo
            .update_fields(
                created.id,
                &ReservationUpdateDBRequest {
                    first_name: "Richard".to_string(),
                    last_name: created.last_name.clone(),
                    mobile_number: created.mobile_number.clone(),
                    reservation_date: created.reservation_date,
                    reservation_time: NaiveTime::parse_from_str("20:00", "%H:%M").unwrap(),
                    people: 5,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Richard");
        assert_eq!(updated.people, 5);
        assert_eq!(updated.status, ReservationStatus::Booked);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn updates_on_missing_rows_are_not_found(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let err = repo.set_status(Uuid::new_v4(), ReservationStatus::Cancelled).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }
}
