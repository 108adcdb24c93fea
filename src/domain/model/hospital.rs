use super::{require, trimmed, Document, ValidationError};
use crate::storage::document::SortOrder;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference card for a hospital the company has supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalCard {
    pub name: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub more_link: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HospitalDraft {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub more_link: Option<String>,
}

impl From<HospitalDraft> for HospitalCard {
    fn from(draft: HospitalDraft) -> Self {
        Self {
            name: trimmed(draft.name),
            location: trimmed(draft.location),
            description: trimmed(draft.description),
            more_link: trimmed(draft.more_link),
        }
    }
}

impl Document for HospitalCard {
    const COLLECTION: &'static str = "hospital_cards";
    const LABEL: &'static str = "Hospital card";
    const ORDER: SortOrder = SortOrder::ReverseInsertion;

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("location", &self.location)?;
        require("description", &self.description)
    }
}
