//! Service catalog entries (cleanroom, gas pipeline and similar offerings).

use super::review::Review;
use super::{require, trimmed, Document, ValidationError};
use serde::{Deserialize, Serialize};

pub const MAX_SERVICE_IMAGES: usize = 10;
pub const MAX_BROCHURES: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// `""` or `/uploads/<file>`.
    #[serde(default)]
    pub brochure: String,
    #[serde(default)]
    pub specs: Vec<ServiceSpec>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Text fields of the service upload form.
///
/// `specs` and `features` arrive as JSON-encoded strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServiceDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub specs: Option<String>,
    pub features: Option<String>,
}

fn parse_json_list<T: serde::de::DeserializeOwned>(
    field: &'static str,
    raw: Option<String>,
) -> Result<Vec<T>, ValidationError> {
    let raw = trimmed(raw);
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|e| ValidationError::Malformed {
        field,
        reason: e.to_string(),
    })
}

impl TryFrom<ServiceDraft> for Service {
    type Error = ValidationError;

    fn try_from(draft: ServiceDraft) -> Result<Self, Self::Error> {
        let specs: Vec<ServiceSpec> = parse_json_list("specs", draft.specs)?;
        let features: Vec<String> = parse_json_list("features", draft.features)?;

        Ok(Self {
            title: trimmed(draft.title),
            description: trimmed(draft.description),
            images: Vec::new(),
            brochure: String::new(),
            specs: specs
                .into_iter()
                .filter(|s| !(s.title.trim().is_empty() && s.value.trim().is_empty()))
                .collect(),
            features: features
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            reviews: Vec::new(),
        })
    }
}

impl Document for Service {
    const COLLECTION: &'static str = "services";
    const LABEL: &'static str = "Service";

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        if self.images.len() > MAX_SERVICE_IMAGES {
            return Err(ValidationError::TooManyFiles {
                field: "images".to_string(),
                max: MAX_SERVICE_IMAGES,
            });
        }
        Ok(())
    }

    fn upload_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.images.iter().map(String::as_str).collect();
        if !self.brochure.is_empty() {
            paths.push(&self.brochure);
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_and_features_are_decoded_from_json_strings() {
        let service = Service::try_from(ServiceDraft {
            title: Some("Modular OT".to_string()),
            specs: Some(r#"[{"title":"Class","value":"ISO 7"},{"title":"","value":""}]"#.to_string()),
            features: Some(r#"["HEPA filters", " ", "Laminar flow"]"#.to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            service.specs,
            vec![ServiceSpec {
                title: "Class".to_string(),
                value: "ISO 7".to_string()
            }]
        );
        assert_eq!(service.features, vec!["HEPA filters", "Laminar flow"]);
    }

    #[test]
    fn malformed_specs_are_a_validation_error() {
        let err = Service::try_from(ServiceDraft {
            title: Some("Gas pipeline".to_string()),
            specs: Some("[not json".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::Malformed { field: "specs", .. }));
    }

    #[test]
    fn brochure_counts_as_an_owned_upload() {
        let service = Service {
            title: "Cleanroom".to_string(),
            description: String::new(),
            images: vec!["/uploads/1-a.png".to_string()],
            brochure: "/uploads/2-b.pdf".to_string(),
            specs: Vec::new(),
            features: Vec::new(),
            reviews: Vec::new(),
        };
        assert_eq!(service.upload_paths(), vec!["/uploads/1-a.png", "/uploads/2-b.pdf"]);
    }
}
