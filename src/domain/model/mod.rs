//! Domain model definitions for the site's document collections.

use crate::storage::document::{SortOrder, StoreError, StoredDocument};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

pub mod blog;
pub mod collection;
pub mod hospital;
pub mod leads;
pub mod newsletter;
pub mod product;
pub mod review;
pub mod service;

pub use blog::{Blog, BlogDraft};
pub use collection::Collection;
pub use hospital::{HospitalCard, HospitalDraft};
pub use leads::{AskQuery, AskQueryDraft, Contact, ContactDraft, Quote, QuoteDraft};
pub use newsletter::{BroadcastDraft, NewsletterDraft, Subscriber};
pub use product::{Product, ProductDraft, Reusable, MAX_PRODUCT_IMAGES};
pub use review::{Review, ReviewDraft, ReviewTarget, Reviewable, MAX_REVIEWS};
pub use service::{Service, ServiceDraft, ServiceSpec, MAX_BROCHURES, MAX_SERVICE_IMAGES};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be one of: {allowed}")]
    NotAllowed {
        field: &'static str,
        allowed: &'static str,
    },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },
    #[error("unexpected file field `{0}`")]
    UnexpectedFile(String),
    #[error("too many files for `{field}` (max {max})")]
    TooManyFiles { field: String, max: usize },
}

/// Failure of a typed write: either the document was invalid or the store refused it.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Contract every stored entity implements.
///
/// The collection name, list ordering, validation and the set of uploaded files the
/// document owns are all decided here, so the service layer can treat entities uniformly.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the collection the documents live in.
    const COLLECTION: &'static str;

    /// Human-readable entity name used in error messages.
    const LABEL: &'static str;

    const ORDER: SortOrder = SortOrder::NewestFirst;

    /// Checks required fields, enumerations and ranges before a write.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Key that must be unique within the collection, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Public `/uploads/...` paths referenced by this document.
    fn upload_paths(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// A stored document together with its store-assigned id and creation time.
#[derive(Debug, Clone, Serialize)]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub doc: T,
}

impl<T: Document> Record<T> {
    pub fn from_stored(stored: StoredDocument) -> Result<Self, StoreError> {
        let mut body = stored.body;
        // Older rows may carry the envelope fields inside the body.
        if let JsonValue::Object(map) = &mut body {
            map.remove("_id");
            map.remove("createdAt");
        }
        Ok(Self {
            id: stored.id,
            created_at: stored.created_at,
            doc: serde_json::from_value(body)?,
        })
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Trims an optional form value, defaulting to the empty string.
pub(crate) fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Reads a number sent either as a JSON number or as a numeric string.
///
/// Blank strings and `null` count as absent.
pub(crate) fn number_field(
    field: &'static str,
    value: Option<&JsonValue>,
) -> Result<Option<f64>, ValidationError> {
    let malformed = |got: &JsonValue| ValidationError::Malformed {
        field,
        reason: format!("expected a number, got {got}"),
    };

    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| malformed(&JsonValue::String(s.clone()))),
        Some(other) => Err(malformed(other)),
    }
}

pub(crate) fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}
