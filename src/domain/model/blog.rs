use super::{require, trimmed, Document, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    /// Free-form event date/time as entered by the editor.
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub map_link: String,
    /// `""` or `/uploads/<file>`.
    #[serde(default)]
    pub image: String,
}

/// Text fields of the blog upload form.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogDraft {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub map_link: Option<String>,
}

impl From<BlogDraft> for Blog {
    fn from(draft: BlogDraft) -> Self {
        Self {
            title: trimmed(draft.title),
            tagline: trimmed(draft.tagline),
            date_time: trimmed(draft.date_time),
            location: trimmed(draft.location),
            map_link: trimmed(draft.map_link),
            image: String::new(),
        }
    }
}

impl Document for Blog {
    const COLLECTION: &'static str = "blogs";
    const LABEL: &'static str = "Blog";

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }

    fn upload_paths(&self) -> Vec<&str> {
        if self.image.is_empty() {
            Vec::new()
        } else {
            vec![self.image.as_str()]
        }
    }
}
