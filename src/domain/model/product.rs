//! Product catalog entries.

use super::review::Review;
use super::{check_range, number_field, require, trimmed, Document, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub const DEFAULT_CATEGORY: &str = "Surgical Equipment";

/// Maximum images attached to one product.
pub const MAX_PRODUCT_IMAGES: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reusable {
    #[default]
    Yes,
    No,
}

impl Reusable {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "" | "Yes" => Ok(Reusable::Yes),
            "No" => Ok(Reusable::No),
            _ => Err(ValidationError::NotAllowed {
                field: "reusable",
                allowed: "Yes, No",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    /// Overall rating shown on the listing, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    pub description: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub ventilation: String,
    #[serde(default)]
    pub reusable: Reusable,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Text fields of the product upload form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub rating: Option<JsonValue>,
    pub description: Option<String>,
    pub details: Option<String>,
    pub material: Option<String>,
    pub dimensions: Option<String>,
    pub ventilation: Option<String>,
    pub reusable: Option<String>,
}

impl TryFrom<ProductDraft> for Product {
    type Error = ValidationError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let category = Some(trimmed(draft.category))
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Self {
            name: trimmed(draft.name),
            category,
            rating: number_field("rating", draft.rating.as_ref())?.unwrap_or(0.0),
            description: trimmed(draft.description),
            details: trimmed(draft.details),
            material: trimmed(draft.material),
            dimensions: trimmed(draft.dimensions),
            ventilation: trimmed(draft.ventilation),
            reusable: Reusable::parse(&trimmed(draft.reusable))?,
            images: Vec::new(),
            reviews: Vec::new(),
        })
    }
}

impl Document for Product {
    const COLLECTION: &'static str = "products";
    const LABEL: &'static str = "Product";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        check_range("rating", self.rating, 0.0, 5.0)?;
        if self.images.len() > MAX_PRODUCT_IMAGES {
            return Err(ValidationError::TooManyFiles {
                field: "images".to_string(),
                max: MAX_PRODUCT_IMAGES,
            });
        }
        Ok(())
    }

    fn upload_paths(&self) -> Vec<&str> {
        self.images.iter().map(String::as_str).collect()
    }
}
