use crate::app::error::ServiceError;
use crate::app::site_service::SiteService;
use crate::domain::model::{Blog, BlogDraft, Document, HospitalCard, HospitalDraft, Record};
use crate::storage::uploads::PendingUpload;

impl SiteService {
    pub async fn create_blog(&self, draft: BlogDraft, image: Option<PendingUpload>) -> Result<Record<Blog>, ServiceError> {
        let mut blog = Blog::from(draft);
        blog.validate()?;
        if let Some(image) = image {
            blog.image = self.persist_uploads(vec![image]).await?.pop().unwrap_or_default();
        }
        self.insert_owning_uploads(blog).await
    }

    pub async fn create_hospital(&self, draft: HospitalDraft) -> Result<Record<HospitalCard>, ServiceError> {
        self.insert_owning_uploads(HospitalCard::from(draft)).await
    }
}
