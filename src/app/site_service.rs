//! The site service.
//!
//! Sits between the HTTP handlers and the store. It is responsible for:
//! 1.  Validating and persisting documents through typed collections.
//! 2.  Writing uploaded files before a record is stored and removing them again when the
//!     record is rejected or deleted.
//! 3.  Triggering transactional mail, synchronously or detached depending on the entity.
//!
//! Entity-specific operations live in `catalog.rs`, `content.rs` and `leads.rs`.

use crate::app::error::ServiceError;
use crate::domain::mail::MailDispatcher;
use crate::domain::model::{Collection, Document, Record};
use crate::storage::document::DocumentStore;
use crate::storage::uploads::{PendingUpload, UploadStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct SiteService {
    store: Arc<dyn DocumentStore>,
    uploads: Arc<UploadStore>,
    mailer: MailDispatcher,
}

impl SiteService {
    pub fn new(store: Arc<dyn DocumentStore>, uploads: Arc<UploadStore>, mailer: MailDispatcher) -> Self {
        Self {
            store,
            uploads,
            mailer,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub(crate) fn mailer(&self) -> &MailDispatcher {
        &self.mailer
    }

    pub(crate) fn collection<T: Document>(&self) -> Collection<'_, T> {
        Collection::new(self.store.as_ref())
    }

    pub async fn list<T: Document>(&self) -> Result<Vec<Record<T>>, ServiceError> {
        Ok(self.collection::<T>().list().await?)
    }

    pub async fn fetch<T: Document>(&self, id: &str) -> Result<Record<T>, ServiceError> {
        self.collection::<T>()
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(T::LABEL))
    }

    /// Writes every upload, returning their public paths in order.
    ///
    /// If any write fails, the files already written are removed again.
    pub(crate) async fn persist_uploads(&self, files: Vec<PendingUpload>) -> Result<Vec<String>, ServiceError> {
        let mut saved = Vec::with_capacity(files.len());
        for file in files {
            match self.uploads.save(&file.original_name, &file.bytes).await {
                Ok(path) => saved.push(path),
                Err(e) => {
                    tracing::error!(field = %file.field, error = %e, "upload write failed");
                    self.uploads.remove_all(saved.iter().map(String::as_str)).await;
                    return Err(e.into());
                }
            }
        }
        Ok(saved)
    }

    /// Inserts `doc`, cleaning up its uploaded files if the store rejects it.
    pub(crate) async fn insert_owning_uploads<T: Document>(&self, doc: T) -> Result<Record<T>, ServiceError> {
        let paths: Vec<String> = doc.upload_paths().into_iter().map(str::to_owned).collect();
        match self.collection::<T>().insert(doc).await {
            Ok(record) => {
                tracing::info!(collection = T::COLLECTION, id = %record.id, "document created");
                Ok(record)
            }
            Err(e) => {
                self.uploads.remove_all(paths.iter().map(String::as_str)).await;
                Err(e.into())
            }
        }
    }

    /// Deletes the record, then makes a best-effort pass over its uploaded files.
    ///
    /// The two steps are not transactional: a crash in between leaves orphaned files.
    pub async fn delete<T: Document>(&self, id: &str) -> Result<Record<T>, ServiceError> {
        let record = self
            .collection::<T>()
            .delete(id)
            .await?
            .ok_or(ServiceError::NotFound(T::LABEL))?;

        self.uploads.remove_all(record.doc.upload_paths()).await;
        tracing::info!(collection = T::COLLECTION, id, "document deleted");
        Ok(record)
    }
}
