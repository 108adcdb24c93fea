//! Document store abstraction.
//!
//! Every entity is stored as a JSON body inside a named collection. The store owns id
//! generation, creation timestamps, ordering, per-collection uniqueness and the capped
//! array push used for reviews.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde_json::Value as JsonValue;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A persisted document as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub body: JsonValue,
}

/// List ordering supported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest `created_at` first; ties broken by reverse insertion.
    NewestFirst,
    /// Reverse insertion order regardless of timestamps.
    ReverseInsertion,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate key `{key}` in collection `{collection}`")]
    Duplicate { collection: String, key: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `body` into `collection`, assigning an id and creation time.
    ///
    /// When `unique_key` is set, a second insert with the same key in the same collection
    /// fails with [`StoreError::Duplicate`] and leaves the first document untouched.
    async fn insert(
        &self,
        collection: &str,
        unique_key: Option<&str>,
        body: JsonValue,
    ) -> Result<StoredDocument, StoreError>;

    async fn list(&self, collection: &str, order: SortOrder) -> Result<Vec<StoredDocument>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Removes the document and returns what was stored, or `None` if nothing matched.
    async fn delete(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Appends `item` to the array at `field` and keeps only the last `cap` entries.
    ///
    /// The append and the trim happen as one atomic step against the document, so
    /// concurrent pushes to the same document are never lost to each other.
    async fn push_capped(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        item: JsonValue,
        cap: usize,
    ) -> Result<Option<StoredDocument>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases connections held by the store.
    async fn close(&self) {}
}

/// Opens the store described by `url`.
///
/// `memory://` selects the in-process store; anything else is treated as a Postgres URL.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Arc<dyn DocumentStore>> {
    if url.starts_with("memory://") {
        tracing::warn!("using the in-memory document store; data is lost on restart");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    }
    let store = PgDocumentStore::connect(url, max_connections).await?;
    Ok(Arc::new(store))
}

/// Generates a 24-hex-char id: 4 bytes of big-endian unix seconds followed by 8 random bytes.
pub fn new_object_id(now: DateTime<Utc>) -> String {
    let mut bytes = [0u8; 12];
    let secs = u32::try_from(now.timestamp().max(0)).unwrap_or(u32::MAX);
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    rand::thread_rng().fill_bytes(&mut bytes[4..]);
    hex::encode(bytes)
}

/// Keeps the last `cap` entries of `items`, preserving their order.
pub fn keep_last<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        let excess = items.len() - cap;
        items.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn object_ids_start_with_the_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let id = new_object_id(now);
        assert_eq!(id.len(), 24);
        assert_eq!(&id[..8], format!("{:08x}", now.timestamp()));
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_object_id(now));
    }

    #[test]
    fn keep_last_drops_the_oldest_entries() {
        let mut items: Vec<u32> = (1..=8).collect();
        keep_last(&mut items, 5);
        assert_eq!(items, vec![4, 5, 6, 7, 8]);

        let mut short = vec![1, 2];
        keep_last(&mut short, 5);
        assert_eq!(short, vec![1, 2]);
    }
}
