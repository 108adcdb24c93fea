//! Local-disk storage for uploaded files.
//!
//! Files land in one shared directory as `<unix-millis>-<original-name>` and are only ever
//! handed out as `/uploads/<file>` paths.

use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// URL prefix under which the uploads directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

const FALLBACK_NAME: &str = "upload.bin";

/// A file received in a request, not yet written to disk.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub field: String,
    pub original_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("uploads directory {} is not usable: {source}", path.display())]
    Directory { path: PathBuf, source: io::Error },
    #[error("failed to write upload {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to read multipart upload: {0}")]
    Multipart(String),
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Creates the directory if needed and checks that files can be written into it.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let dir = dir.into();
        let directory_error = |source| UploadError::Directory {
            path: dir.clone(),
            source,
        };

        tokio::fs::create_dir_all(&dir).await.map_err(directory_error)?;
        let metadata = tokio::fs::metadata(&dir).await.map_err(directory_error)?;
        if !metadata.is_dir() {
            return Err(directory_error(io::Error::other("not a directory")));
        }

        let marker = dir.join(format!(".write-check-{}", std::process::id()));
        tokio::fs::write(&marker, b"").await.map_err(directory_error)?;
        let _ = tokio::fs::remove_file(&marker).await;

        let dir = dir.canonicalize().unwrap_or(dir);
        tracing::info!(dir = %dir.display(), "uploads directory ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a fresh timestamped name and returns its public path.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        let name = sanitize_file_name(original_name);
        let mut stamp = Utc::now().timestamp_millis();

        loop {
            let file_name = format!("{stamp}-{name}");
            let path = self.dir.join(&file_name);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            let mut file = match opened {
                Ok(file) => file,
                // Same name within the same millisecond: move to the next stamp.
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    stamp += 1;
                    continue;
                }
                Err(source) => return Err(UploadError::Write { path, source }),
            };

            let written = async {
                file.write_all(bytes).await?;
                file.flush().await
            }
            .await;
            if let Err(source) = written {
                drop(file);
                let _ = tokio::fs::remove_file(&path).await;
                return Err(UploadError::Write { path, source });
            }

            tracing::debug!(file = %file_name, size = bytes.len(), "stored upload");
            return Ok(format!("{PUBLIC_PREFIX}/{file_name}"));
        }
    }

    /// Maps a public `/uploads/<file>` path back to a file inside the uploads directory.
    ///
    /// Returns `None` for anything that is not a plain file name under the prefix.
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(public_path);

        let is_plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\\');
        is_plain.then(|| self.dir.join(name))
    }

    /// Best-effort removal; failures are logged and otherwise ignored.
    pub async fn remove(&self, public_path: &str) {
        if public_path.is_empty() {
            return;
        }
        let Some(path) = self.resolve(public_path) else {
            tracing::warn!(path = public_path, "refusing to remove path outside uploads");
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = public_path, "removed upload"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = public_path, error = %e, "failed to remove upload"),
        }
    }

    pub async fn remove_all<'a>(&self, public_paths: impl IntoIterator<Item = &'a str>) {
        for path in public_paths {
            self.remove(path).await;
        }
    }
}

/// Reduces a client-supplied file name to a safe final path component.
pub fn sanitize_file_name(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}
