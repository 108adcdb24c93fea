//! Document store backed by a single PostgreSQL JSONB table.

use super::{new_object_id, DocumentStore, SortOrder, StoreError, StoredDocument};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

/// A document store that keeps every collection in the `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connects to `database_url` and creates the `documents` table if it is missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        // `seq` records insertion order; NULL unique keys never collide.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                seq BIGSERIAL NOT NULL,
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                unique_key TEXT,
                created_at TIMESTAMPTZ NOT NULL,
                body JSONB NOT NULL,
                UNIQUE (collection, unique_key)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_collection_created_idx
             ON documents (collection, created_at DESC, seq DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn row_to_document(row: PgRow) -> Result<StoredDocument, StoreError> {
    let id: String = row.try_get("id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let body: JsonValue = row.try_get("body")?;
    Ok(StoredDocument { id, created_at, body })
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        unique_key: Option<&str>,
        body: JsonValue,
    ) -> Result<StoredDocument, StoreError> {
        let created_at = Utc::now();
        let id = new_object_id(created_at);

        let row = sqlx::query(
            "INSERT INTO documents (id, collection, unique_key, created_at, body)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (collection, unique_key) DO NOTHING
             RETURNING id, created_at, body",
        )
        .bind(&id)
        .bind(collection)
        .bind(unique_key)
        .bind(created_at)
        .bind(&body)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_document(row),
            None => Err(StoreError::Duplicate {
                collection: collection.to_string(),
                key: unique_key.unwrap_or_default().to_string(),
            }),
        }
    }

    async fn list(&self, collection: &str, order: SortOrder) -> Result<Vec<StoredDocument>, StoreError> {
        let sql = match order {
            SortOrder::NewestFirst => {
                "SELECT id, created_at, body FROM documents
                 WHERE collection = $1 ORDER BY created_at DESC, seq DESC"
            }
            SortOrder::ReverseInsertion => {
                "SELECT id, created_at, body FROM documents
                 WHERE collection = $1 ORDER BY seq DESC"
            }
        };

        let rows = sqlx::query(sql).bind(collection).fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query(
            "SELECT id, created_at, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(row_to_document).transpose()
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query(
            "DELETE FROM documents WHERE collection = $1 AND id = $2
             RETURNING id, created_at, body",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(row_to_document).transpose()
    }

    async fn push_capped(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        item: JsonValue,
        cap: usize,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let cap = i64::try_from(cap).unwrap_or(i64::MAX);

        // One statement: the row lock serialises concurrent pushes, and the subquery is
        // re-evaluated against the latest row version.
        let row = sqlx::query(
            "UPDATE documents
             SET body = jsonb_set(
                 body,
                 ARRAY[$3::text],
                 (
                     SELECT COALESCE(jsonb_agg(kept.item ORDER BY kept.ord), '[]'::jsonb)
                     FROM (
                         SELECT t.item, t.ord
                         FROM jsonb_array_elements(
                             COALESCE(documents.body -> $3::text, '[]'::jsonb)
                                 || jsonb_build_array($4::jsonb)
                         ) WITH ORDINALITY AS t(item, ord)
                         ORDER BY t.ord DESC
                         LIMIT $5
                     ) AS kept
                 ),
                 true
             )
             WHERE collection = $1 AND id = $2
             RETURNING id, created_at, body",
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .bind(&item)
        .bind(cap)
        .fetch_optional(&self.pool)
        .await?;
        row.map(row_to_document).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
