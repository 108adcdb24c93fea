//! Lead capture and newsletter operations.

use crate::app::error::ServiceError;
use crate::app::site_service::SiteService;
use crate::domain::mail::MailTemplate;
use crate::domain::model::{
    AskQuery, AskQueryDraft, BroadcastDraft, Contact, ContactDraft, NewsletterDraft, Quote,
    QuoteDraft, Record, Subscriber, WriteError,
};
use crate::infra::mail::is_valid_address;
use crate::storage::document::StoreError;
use chrono::Utc;

impl SiteService {
    /// Stores the contact request, then sends the acknowledgement before returning.
    ///
    /// A relay failure fails the call even though the contact is already stored.
    pub async fn submit_contact(&self, draft: ContactDraft) -> Result<Record<Contact>, ServiceError> {
        let record = self.collection::<Contact>().insert(Contact::from(draft)).await?;
        tracing::info!(id = %record.id, "contact request stored");

        self.mailer()
            .send(MailTemplate::ContactAck {
                name: record.doc.name.clone(),
                email: record.doc.email.clone(),
                phone: record.doc.phone.clone(),
            })
            .await?;
        Ok(record)
    }

    /// Same delivery semantics as [`SiteService::submit_contact`].
    pub async fn submit_quote(&self, draft: QuoteDraft) -> Result<Record<Quote>, ServiceError> {
        let record = self.collection::<Quote>().insert(Quote::from(draft)).await?;
        tracing::info!(id = %record.id, product = %record.doc.product, "quote request stored");

        self.mailer()
            .send(MailTemplate::QuoteAck {
                name: record.doc.name.clone(),
                email: record.doc.email.clone(),
                phone: record.doc.phone.clone(),
                product: record.doc.product.clone(),
                message: record.doc.quote_message.clone(),
            })
            .await?;
        Ok(record)
    }

    pub async fn submit_query(&self, draft: AskQueryDraft) -> Result<Record<AskQuery>, ServiceError> {
        let record = self.collection::<AskQuery>().insert(AskQuery::from(draft)).await?;
        tracing::info!(id = %record.id, "query stored");
        Ok(record)
    }

    /// Adds a newsletter subscriber and schedules the welcome mail in the background.
    pub async fn subscribe(&self, draft: NewsletterDraft) -> Result<Record<Subscriber>, ServiceError> {
        let subscriber = Subscriber::from_draft(draft, Utc::now());

        let record = match self.collection::<Subscriber>().insert(subscriber).await {
            Ok(record) => record,
            Err(WriteError::Store(StoreError::Duplicate { .. })) => {
                return Err(ServiceError::Conflict("Email already subscribed".to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(id = %record.id, "newsletter subscription stored");

        self.mailer().send_detached(MailTemplate::Welcome {
            email: record.doc.email.clone(),
        });
        Ok(record)
    }

    /// Sends one message to every subscriber as blind copies.
    ///
    /// Returns the number of recipients; with no subscribers nothing is sent.
    pub async fn broadcast_newsletter(&self, draft: BroadcastDraft) -> Result<usize, ServiceError> {
        let (subject, message) = draft.into_parts()?;

        let mut recipients: Vec<String> = Vec::new();
        for record in self.list::<Subscriber>().await? {
            // Rows stored before address checks existed may not be deliverable.
            if is_valid_address(&record.doc.email) {
                recipients.push(record.doc.email);
            } else {
                tracing::warn!(id = %record.id, "skipping subscriber with undeliverable address");
            }
        }
        if recipients.is_empty() {
            tracing::info!("newsletter skipped: no subscribers");
            return Ok(0);
        }

        let count = recipients.len();
        self.mailer()
            .send(MailTemplate::BulkNewsletter {
                recipients,
                subject,
                message,
            })
            .await?;
        Ok(count)
    }
}
