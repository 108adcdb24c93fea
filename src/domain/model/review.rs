//! Reviews embedded in products and services.
//!
//! Both catalogs share one review shape; the target decides which fields are kept.

use super::{check_range, number_field, require, trimmed, Document, Product, Service, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Reviews kept per product or service; older ones are evicted first.
pub const MAX_REVIEWS: usize = 5;

/// Field name of the embedded review array.
pub const REVIEWS_FIELD: &str = "reviews";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    /// Submission day, `YYYY-MM-DD`.
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    Product,
    Service,
}

impl ReviewTarget {
    fn keeps_email(self) -> bool {
        matches!(self, ReviewTarget::Product)
    }
}

/// Documents that embed a capped review list.
pub trait Reviewable: Document {
    const TARGET: ReviewTarget;
}

impl Reviewable for Product {
    const TARGET: ReviewTarget = ReviewTarget::Product;
}

impl Reviewable for Service {
    const TARGET: ReviewTarget = ReviewTarget::Service;
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ReviewDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub comment: Option<String>,
    /// 1 to 5; a number or a numeric string.
    #[schema(value_type = Option<f64>)]
    pub rating: Option<JsonValue>,
}

impl ReviewDraft {
    /// Validates the draft for `target` and stamps it with `today`.
    pub fn into_review(self, target: ReviewTarget, today: NaiveDate) -> Result<Review, ValidationError> {
        let name = trimmed(self.name);
        require("name", &name)?;

        let rating = number_field("rating", self.rating.as_ref())?
            .ok_or(ValidationError::MissingField("rating"))?;
        check_range("rating", rating, 1.0, 5.0)?;
        if rating.fract() != 0.0 {
            return Err(ValidationError::Malformed {
                field: "rating",
                reason: "expected a whole number".to_string(),
            });
        }

        let email = if target.keeps_email() {
            Some(trimmed(self.email)).filter(|e| !e.is_empty())
        } else {
            None
        };

        Ok(Review {
            name,
            email,
            rating: rating as u8,
            comment: trimmed(self.comment),
            date: today.format("%Y-%m-%d").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn draft(rating: JsonValue) -> ReviewDraft {
        ReviewDraft {
            name: Some("  Asha ".to_string()),
            email: Some("asha@example.com".to_string()),
            comment: Some("Solid build".to_string()),
            rating: Some(rating),
        }
    }

    #[test]
    fn product_reviews_keep_email_and_get_dated() {
        let review = draft(json!("4")).into_review(ReviewTarget::Product, today()).unwrap();
        assert_eq!(review.name, "Asha");
        assert_eq!(review.email.as_deref(), Some("asha@example.com"));
        assert_eq!(review.rating, 4);
        assert_eq!(review.date, "2024-05-17");
    }

    #[test]
    fn service_reviews_drop_email() {
        let review = draft(json!(5)).into_review(ReviewTarget::Service, today()).unwrap();
        assert_eq!(review.email, None);
        let encoded = serde_json::to_value(&review).unwrap();
        assert!(encoded.get("email").is_none());
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        for bad in [json!(0), json!(6), json!("2.5")] {
            assert!(draft(bad).into_review(ReviewTarget::Product, today()).is_err());
        }
    }

    #[test]
    fn name_and_rating_are_required() {
        let missing_name = ReviewDraft {
            rating: Some(json!(3)),
            ..Default::default()
        };
        assert_eq!(
            missing_name.into_review(ReviewTarget::Service, today()),
            Err(ValidationError::MissingField("name"))
        );

        let missing_rating = ReviewDraft {
            name: Some("Ravi".to_string()),
            ..Default::default()
        };
        assert_eq!(
            missing_rating.into_review(ReviewTarget::Service, today()),
            Err(ValidationError::MissingField("rating"))
        );
    }
}
