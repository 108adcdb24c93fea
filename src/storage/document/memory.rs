//! In-process document store.
//!
//! Used for local development (`DATABASE_URL=memory://`) and by the test suites.

use super::{keep_last, new_object_id, DocumentStore, SortOrder, StoreError, StoredDocument};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tokio::sync::RwLock;

struct Row {
    seq: u64,
    unique_key: Option<String>,
    document: StoredDocument,
}

#[derive(Default)]
struct Collections {
    next_seq: u64,
    rows: HashMap<String, Vec<Row>>,
}

#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Collections>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently stored in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let inner = self.inner.read().await;
        inner.rows.get(collection).map(Vec::len).unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        unique_key: Option<&str>,
        body: JsonValue,
    ) -> Result<StoredDocument, StoreError> {
        let mut inner = self.inner.write().await;

        if let Some(key) = unique_key {
            let taken = inner
                .rows
                .get(collection)
                .is_some_and(|rows| rows.iter().any(|r| r.unique_key.as_deref() == Some(key)));
            if taken {
                return Err(StoreError::Duplicate {
                    collection: collection.to_string(),
                    key: key.to_string(),
                });
            }
        }

        let created_at = Utc::now();
        let document = StoredDocument {
            id: new_object_id(created_at),
            created_at,
            body,
        };

        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.rows.entry(collection.to_string()).or_default().push(Row {
            seq,
            unique_key: unique_key.map(str::to_owned),
            document: document.clone(),
        });

        Ok(document)
    }

    async fn list(&self, collection: &str, order: SortOrder) -> Result<Vec<StoredDocument>, StoreError> {
        let inner = self.inner.read().await;
        let Some(rows) = inner.rows.get(collection) else {
            return Ok(Vec::new());
        };

        let mut sorted: Vec<&Row> = rows.iter().collect();
        match order {
            SortOrder::NewestFirst => sorted.sort_by(|a, b| {
                b.document
                    .created_at
                    .cmp(&a.document.created_at)
                    .then(b.seq.cmp(&a.seq))
            }),
            SortOrder::ReverseInsertion => sorted.sort_by(|a, b| b.seq.cmp(&a.seq)),
        }

        Ok(sorted.into_iter().map(|r| r.document.clone()).collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .get(collection)
            .and_then(|rows| rows.iter().find(|r| r.document.id == id))
            .map(|r| r.document.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(rows) = inner.rows.get_mut(collection) else {
            return Ok(None);
        };
        let position = rows.iter().position(|r| r.document.id == id);
        Ok(position.map(|idx| rows.remove(idx).document))
    }

    async fn push_capped(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        item: JsonValue,
        cap: usize,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner
            .rows
            .get_mut(collection)
            .and_then(|rows| rows.iter_mut().find(|r| r.document.id == id))
        else {
            return Ok(None);
        };

        let Some(body) = row.document.body.as_object_mut() else {
            return Err(StoreError::Encoding(serde::de::Error::custom(format!(
                "document {id} in {collection} is not an object"
            ))));
        };

        let mut items = match body.remove(field) {
            Some(JsonValue::Array(items)) => items,
            _ => Vec::new(),
        };
        items.push(item);
        keep_last(&mut items, cap);
        body.insert(field.to_string(), JsonValue::Array(items));

        Ok(Some(row.document.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
