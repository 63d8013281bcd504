use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoredDocument};

/// Postgres-backed store. Every collection shares the `documents` table with
/// a JSONB payload; `adjust_number` is a single guarded UPDATE, so concurrent
/// writers can never drive a counter below its floor.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn document_from_row(row: PgRow) -> Result<StoredDocument, StoreError> {
        let data: Value = row.try_get("data")?;
        let Value::Object(data) = data else {
            return Err(StoreError::Malformed("document payload is not an object".into()));
        };
        Ok(StoredDocument {
            id: row.try_get("id")?,
            data,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let row = sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             RETURNING id, data, created_at, updated_at",
        )
        .bind(collection)
        .bind(Uuid::new_v4())
        .bind(Value::Object(fields))
        .fetch_one(&self.pool)
        .await?;

        Self::document_from_row(row)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query(
            "SELECT id, data, created_at, updated_at FROM documents \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::document_from_row).transpose()
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, data, created_at, updated_at FROM documents \
             WHERE collection = $1 ORDER BY created_at",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::document_from_row).collect()
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, data, created_at, updated_at FROM documents \
             WHERE collection = $1 AND data -> $2 = $3 ORDER BY created_at",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::document_from_row).collect()
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let row = sqlx::query(
            "UPDATE documents SET data = data || $3, updated_at = now() \
             WHERE collection = $1 AND id = $2 \
             RETURNING id, data, created_at, updated_at",
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(fields))
        .fetch_optional(&self.pool)
        .await?;

        Self::document_from_row(row.ok_or(StoreError::NotFound)?)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn adjust_number(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        delta: i64,
        floor: i64,
    ) -> Result<i64, StoreError> {
        let row = sqlx::query(
            "UPDATE documents \
             SET data = jsonb_set(data, ARRAY[$3], to_jsonb((data ->> $3)::bigint + $4)), \
                 updated_at = now() \
             WHERE collection = $1 AND id = $2 AND (data ->> $3)::bigint + $4 >= $5 \
             RETURNING (data ->> $3)::bigint AS value",
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .bind(delta)
        .bind(floor)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(row.try_get("value")?);
        }

        // Distinguish a rejected guard from a missing document.
        let current = sqlx::query(
            "SELECT (data ->> $3)::bigint AS value FROM documents \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .fetch_optional(&self.pool)
        .await?;

        match current {
            Some(row) => Err(StoreError::Guard { current: row.try_get("value")? }),
            None => Err(StoreError::NotFound),
        }
    }
}
