//! Typed access to one document collection.

use super::review::{Review, Reviewable, MAX_REVIEWS, REVIEWS_FIELD};
use super::{Document, Record, WriteError};
use crate::storage::document::{DocumentStore, StoreError};
use std::marker::PhantomData;

/// Binds a [`Document`] type to a store so callers work with typed records.
pub struct Collection<'a, T> {
    store: &'a dyn DocumentStore,
    _doc: PhantomData<T>,
}

impl<'a, T: Document> Collection<'a, T> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _doc: PhantomData,
        }
    }

    /// Validates and stores `doc`.
    pub async fn insert(&self, doc: T) -> Result<Record<T>, WriteError> {
        doc.validate()?;
        let unique_key = doc.unique_key();
        let body = serde_json::to_value(&doc).map_err(StoreError::from)?;
        let stored = self
            .store
            .insert(T::COLLECTION, unique_key.as_deref(), body)
            .await?;
        Ok(Record {
            id: stored.id,
            created_at: stored.created_at,
            doc,
        })
    }

    /// All documents in the collection's natural order.
    pub async fn list(&self) -> Result<Vec<Record<T>>, StoreError> {
        self.store
            .list(T::COLLECTION, T::ORDER)
            .await?
            .into_iter()
            .map(Record::from_stored)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Record<T>>, StoreError> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(Record::from_stored)
            .transpose()
    }

    pub async fn delete(&self, id: &str) -> Result<Option<Record<T>>, StoreError> {
        self.store
            .delete(T::COLLECTION, id)
            .await?
            .map(Record::from_stored)
            .transpose()
    }
}

impl<'a, T: Reviewable> Collection<'a, T> {
    /// Appends `review`, keeping only the newest [`MAX_REVIEWS`] entries.
    pub async fn push_review(&self, id: &str, review: &Review) -> Result<Option<Record<T>>, StoreError> {
        let item = serde_json::to_value(review)?;
        self.store
            .push_capped(T::COLLECTION, id, REVIEWS_FIELD, item, MAX_REVIEWS)
            .await?
            .map(Record::from_stored)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Product, ProductDraft, ReviewDraft, ReviewTarget};
    use crate::storage::document::MemoryDocumentStore;
    use chrono::NaiveDate;
    use serde_json::json;

    fn product() -> Product {
        Product::try_from(ProductDraft {
            name: Some("Gown".to_string()),
            description: Some("Sterile surgical gown".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn invalid_documents_never_reach_the_store() {
        let store = MemoryDocumentStore::new();
        let products = Collection::<Product>::new(&store);

        let mut bad = product();
        bad.name.clear();
        assert!(matches!(products.insert(bad).await, Err(WriteError::Invalid(_))));
        assert_eq!(store.count(Product::COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn reviews_are_capped_at_the_newest_five() {
        let store = MemoryDocumentStore::new();
        let products = Collection::<Product>::new(&store);
        let created = products.insert(product()).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for n in 1..=7 {
            let review = ReviewDraft {
                name: Some(format!("reviewer {n}")),
                rating: Some(json!(3)),
                ..Default::default()
            }
            .into_review(ReviewTarget::Product, today)
            .unwrap();
            products.push_review(&created.id, &review).await.unwrap();
        }

        let stored = products.get(&created.id).await.unwrap().unwrap();
        let names: Vec<_> = stored.doc.reviews.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["reviewer 3", "reviewer 4", "reviewer 5", "reviewer 6", "reviewer 7"]
        );
    }
}
