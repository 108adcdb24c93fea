//! Buffered multipart form parsing for the upload endpoints.

use crate::app::ServiceError;
use crate::domain::model::ValidationError;
use crate::storage::uploads::{PendingUpload, UploadError};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

/// A file field a form accepts, with its maximum file count.
#[derive(Debug, Clone, Copy)]
pub struct FileLimit {
    pub field: &'static str,
    pub max: usize,
}

impl FileLimit {
    pub const fn new(field: &'static str, max: usize) -> Self {
        Self { field, max }
    }
}

/// Text fields and files of one request, fully read into memory.
///
/// Nothing is written to disk here; that happens only after validation.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: Map<String, JsonValue>,
    files: Vec<PendingUpload>,
}

fn read_error(e: MultipartError) -> ServiceError {
    UploadError::Multipart(e.body_text()).into()
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart, limits: &[FileLimit]) -> Result<Self, ServiceError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(read_error)? {
            let name = field.name().unwrap_or_default().to_string();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let text = field.text().await.map_err(read_error)?;
                form.fields.insert(name, JsonValue::String(text));
                continue;
            };

            let bytes = field.bytes().await.map_err(read_error)?;
            // Browsers send an empty part for a file input left blank.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }

            let limit = limits
                .iter()
                .find(|l| l.field == name)
                .ok_or_else(|| ValidationError::UnexpectedFile(name.clone()))?;
            if form.files.iter().filter(|f| f.field == name).count() >= limit.max {
                return Err(ValidationError::TooManyFiles {
                    field: name,
                    max: limit.max,
                }
                .into());
            }

            form.files.push(PendingUpload {
                field: name,
                original_name: file_name,
                bytes: bytes.to_vec(),
            });
        }

        Ok(form)
    }

    /// Deserializes the text fields into a draft type.
    pub fn draft<T: DeserializeOwned>(&self) -> Result<T, ServiceError> {
        serde_json::from_value(JsonValue::Object(self.fields.clone())).map_err(|e| {
            ValidationError::Malformed {
                field: "form",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Removes and returns the files sent under `field`, in upload order.
    pub fn take_files(&mut self, field: &str) -> Vec<PendingUpload> {
        let (taken, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|f| f.field == field);
        self.files = rest;
        taken
    }
}
