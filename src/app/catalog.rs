//! Product and service catalog operations.

use crate::app::error::ServiceError;
use crate::app::site_service::SiteService;
use crate::domain::model::{
    Document, Product, ProductDraft, Record, ReviewDraft, Reviewable, Service, ServiceDraft,
};
use crate::storage::uploads::PendingUpload;
use chrono::Utc;

impl SiteService {
    pub async fn create_product(
        &self,
        draft: ProductDraft,
        images: Vec<PendingUpload>,
    ) -> Result<Record<Product>, ServiceError> {
        let mut product = Product::try_from(draft)?;
        // Reject before anything touches the disk.
        product.validate()?;
        product.images = self.persist_uploads(images).await?;
        self.insert_owning_uploads(product).await
    }

    pub async fn create_service(
        &self,
        draft: ServiceDraft,
        images: Vec<PendingUpload>,
        brochure: Option<PendingUpload>,
    ) -> Result<Record<Service>, ServiceError> {
        let mut service = Service::try_from(draft)?;
        service.validate()?;

        service.images = self.persist_uploads(images).await?;
        if let Some(brochure) = brochure {
            match self.persist_uploads(vec![brochure]).await {
                Ok(mut saved) => service.brochure = saved.pop().unwrap_or_default(),
                Err(e) => {
                    self.uploads()
                        .remove_all(service.images.iter().map(String::as_str))
                        .await;
                    return Err(e);
                }
            }
        }

        self.insert_owning_uploads(service).await
    }

    /// Appends a review to a product or service, dated today (UTC).
    ///
    /// The store applies the append and the five-review cap atomically.
    pub async fn add_review<T: Reviewable>(&self, id: &str, draft: ReviewDraft) -> Result<Record<T>, ServiceError> {
        let review = draft.into_review(T::TARGET, Utc::now().date_naive())?;
        let record = self
            .collection::<T>()
            .push_review(id, &review)
            .await?
            .ok_or(ServiceError::NotFound(T::LABEL))?;
        tracing::info!(collection = T::COLLECTION, id, rating = review.rating, "review added");
        Ok(record)
    }
}
