use super::{require, trimmed, Document, ValidationError};
use crate::infra::mail::is_valid_address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewsletterDraft {
    pub email: Option<String>,
}

impl Subscriber {
    pub fn from_draft(draft: NewsletterDraft, now: DateTime<Utc>) -> Self {
        Self {
            email: trimmed(draft.email),
            subscribed_at: now,
        }
    }
}

/// A newsletter issue to send to every subscriber.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BroadcastDraft {
    pub subject: Option<String>,
    /// Body text; rendered as a single HTML paragraph.
    pub message: Option<String>,
}

impl BroadcastDraft {
    /// Returns the trimmed `(subject, message)` pair.
    pub fn into_parts(self) -> Result<(String, String), ValidationError> {
        let subject = trimmed(self.subject);
        let message = trimmed(self.message);
        require("subject", &subject)?;
        require("message", &message)?;
        Ok((subject, message))
    }
}

impl Document for Subscriber {
    const COLLECTION: &'static str = "newsletters";
    const LABEL: &'static str = "Subscriber";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if !is_valid_address(&self.email) {
            return Err(ValidationError::Malformed {
                field: "email",
                reason: "Invalid email address".to_string(),
            });
        }
        Ok(())
    }

    /// Addresses differing only in case count as the same subscriber.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_an_at_sign() {
        let subscriber = Subscriber::from_draft(
            NewsletterDraft {
                email: Some("nobody".to_string()),
            },
            Utc::now(),
        );
        assert!(matches!(
            subscriber.validate(),
            Err(ValidationError::Malformed { field: "email", .. })
        ));
    }

    #[test]
    fn email_must_be_a_deliverable_address() {
        for email in ["x@", "a b@x.com", "@example.com"] {
            let subscriber = Subscriber::from_draft(
                NewsletterDraft {
                    email: Some(email.to_string()),
                },
                Utc::now(),
            );
            assert!(subscriber.validate().is_err(), "{email} accepted");
        }
    }

    #[test]
    fn broadcast_needs_subject_and_message() {
        let draft = BroadcastDraft {
            subject: Some("Launch".to_string()),
            message: Some("  ".to_string()),
        };
        assert_eq!(draft.into_parts(), Err(ValidationError::MissingField("message")));
    }

    #[test]
    fn unique_key_is_case_insensitive() {
        let subscriber = Subscriber::from_draft(
            NewsletterDraft {
                email: Some(" Reader@Example.com ".to_string()),
            },
            Utc::now(),
        );
        assert_eq!(subscriber.email, "Reader@Example.com");
        assert_eq!(subscriber.unique_key().as_deref(), Some("reader@example.com"));
    }
}
