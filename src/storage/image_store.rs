//! Directory-backed object storage for event images.
//!
//! Objects live under `<root>/<bucket>/<path>` and are served read-only by
//! the HTTP layer, so the public URL of an object is simply
//! `<public_base_url>/<bucket>/<path>`.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use crate::error::DeskError;

/// Prefix under which submission images are stored.
pub const EVENT_IMAGE_PREFIX: &str = "event-images";

/// Object store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl ImageStore {
    /// Creates a store. `public_base_url` is the externally visible URL of
    /// `root`, without a trailing slash.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Directory served at the public base URL.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Builds a fresh object path for an event image:
    /// `event-images/<unix-millis>-<8 hex>.<ext>`.
    #[must_use]
    pub fn object_path_for(extension: &str, now: DateTime<Utc>) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let short = suffix.get(..8).unwrap_or(&suffix);
        format!(
            "{EVENT_IMAGE_PREFIX}/{}-{short}.{extension}",
            now.timestamp_millis()
        )
    }

    /// Writes `bytes` to `path` inside the bucket.
    ///
    /// # Errors
    ///
    /// - [`DeskError::InvalidRequest`] if `path` escapes the bucket.
    /// - [`DeskError::ObjectExists`] if an object is already stored there.
    /// - [`DeskError::UploadFailed`] on any I/O failure.
    pub async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), DeskError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DeskError::UploadFailed(e.to_string()))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => DeskError::ObjectExists(path.to_string()),
                _ => DeskError::UploadFailed(e.to_string()),
            })?;
        file.write_all(bytes)
            .await
            .map_err(|e| DeskError::UploadFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| DeskError::UploadFailed(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, path, len = bytes.len(), "object stored");
        Ok(())
    }

    /// Deletes the object at `path`. A missing object is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::InvalidRequest`] if `path` escapes the bucket,
    /// or [`DeskError::Internal`] on any other I/O failure.
    pub async fn remove(&self, path: &str) -> Result<(), DeskError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeskError::Internal(e.to_string())),
        }
    }

    /// Public URL of the object at `path`.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, path)
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, DeskError> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(DeskError::InvalidRequest(format!(
                "invalid object path: {path}"
            )));
        }
        Ok(self.root.join(&self.bucket).join(relative))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> ImageStore {
        ImageStore::new(dir.path(), "images", "http://localhost:3000/storage/")
    }

    #[tokio::test]
    async fn upload_writes_under_bucket() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = store(&dir);
        let result = store.upload("event-images/1.png", b"png-bytes").await;
        assert!(result.is_ok());

        let written = tokio::fs::read(dir.path().join("images/event-images/1.png")).await;
        assert_eq!(written.ok(), Some(b"png-bytes".to_vec()));
    }

    #[tokio::test]
    async fn upload_refuses_overwrite() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = store(&dir);
        assert!(store.upload("a.gif", b"1").await.is_ok());
        let Err(err) = store.upload("a.gif", b"2").await else {
            panic!("second upload must fail");
        };
        assert!(matches!(err, DeskError::ObjectExists(_)));
    }

    #[tokio::test]
    async fn upload_rejects_escaping_paths() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = store(&dir);
        for path in ["../x.png", "/etc/x.png", "", "a/../../b.png"] {
            let Err(err) = store.upload(path, b"1").await else {
                panic!("{path} must be rejected");
            };
            assert!(matches!(err, DeskError::InvalidRequest(_)));
        }
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = store(&dir);
        assert!(store.upload("b.png", b"1").await.is_ok());
        assert!(store.remove("b.png").await.is_ok());
        assert!(store.remove("b.png").await.is_ok());
        assert!(store.upload("b.png", b"2").await.is_ok());
    }

    #[test]
    fn public_url_joins_bucket_and_path() {
        let store = ImageStore::new("/tmp/x", "images", "http://cdn.test/storage/");
        assert_eq!(
            store.public_url("event-images/1.png"),
            "http://cdn.test/storage/images/event-images/1.png"
        );
    }

    #[test]
    fn object_paths_are_unique_and_prefixed() {
        let now = Utc::now();
        let a = ImageStore::object_path_for("png", now);
        let b = ImageStore::object_path_for("png", now);
        assert_ne!(a, b);
        assert!(a.starts_with("event-images/"));
        assert!(a.ends_with(".png"));
        assert!(a.contains(&now.timestamp_millis().to_string()));
    }
}
