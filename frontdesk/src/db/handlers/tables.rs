//! Database repository for dining tables.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::tables::{DiningTable, TableCreateDBRequest},
};
use crate::types::{TableId, abbrev_uuid};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Tables<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Tables<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Tables<'c> {
    type CreateRequest = TableCreateDBRequest;
    type Response = DiningTable;
    type Id = TableId;
    type Filter = ();

    #[instrument(skip(self, request), fields(table_name = %request.table_name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let now = Utc::now();
        let table = sqlx::query_as::<_, DiningTable>(
            r#"
            INSERT INTO tables (id, table_name, capacity, reservation_id, created_at, updated_at)
            VALUES (?, ?, ?, NULL, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.table_name)
        .bind(request.capacity)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(table)
    }

    #[instrument(skip(self), fields(table_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM tables WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(table)
    }

    #[instrument(skip_all, err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let tables = sqlx::query_as::<_, DiningTable>("SELECT * FROM tables ORDER BY table_name")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn create_then_get_round_trips(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Tables::new(&mut conn);

        let created = repo
            .create(&TableCreateDBRequest {
                table_name: "Bar #1".to_string(),
                capacity: 4,
            })
            .await
            .unwrap();
        assert!(created.reservation_id.is_none());

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn list_orders_by_table_name(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Tables::new(&mut conn);

        for name in ["Patio 2", "Bar #1", "Main 10"] {
            repo.create(&TableCreateDBRequest {
                table_name: name.to_string(),
                capacity: 2,
            })
            .await
            .unwrap();
        }

        let names: Vec<_> = repo.list(&()).await.unwrap().into_iter().map(|t| t.table_name).collect();
        assert_eq!(names, vec!["Bar #1", "Main 10", "Patio 2"]);
    }
}
