//! Local filesystem storage for uploaded images.
//!
//! Files are written under the configured upload directory and recorded in
//! the database by their public path, `images/<file name>`, which is also
//! the URL path they are served from.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::AppError;

/// URL prefix (and stored path prefix) of uploaded files.
pub const PUBLIC_PREFIX: &str = "images";

#[derive(Debug, Clone)]
pub struct UploadStore {
    base_dir: PathBuf,
}

impl UploadStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write `data` as `file_name` and return its public path.
    ///
    /// `file_name` must already be a bare name (see [`sanitize_file_name`]).
    pub async fn save(&self, file_name: &str, data: &[u8]) -> Result<String, AppError> {
        fs::create_dir_all(&self.base_dir).await?;

        let path = self.base_dir.join(file_name);
        fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), size = data.len(), "Stored upload");

        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }
}

/// Reduce a client-supplied file name to its last path component.
///
/// Returns `None` for names that would not produce a regular file inside
/// the upload directory (empty, `.`, `..`).
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next()?.trim();

    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}
