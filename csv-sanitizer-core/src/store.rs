use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::contract::{ObjectStore, StorageError};

/// Object store backed by a local directory.
///
/// Layout is `<root>/<bucket>/<key>`, with `/` in keys mapped to subdirectories.
/// Intended for running the sanitizer outside a cloud environment and for tests.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem path of an object. Refuses names that would escape the bucket.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        let mut path = self.root.join(checked_segment(bucket, "bucket")?);
        for segment in key.split('/') {
            path.push(checked_segment(segment, "key")?);
        }
        Ok(path)
    }
}

fn checked_segment<'a>(segment: &'a str, what: &str) -> Result<&'a str, StorageError> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
        return Err(format!("invalid {what} segment {segment:?}").into());
    }
    Ok(segment)
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(bucket, key)?;
        debug!(path = %path.display(), "Reading object from local store");
        tokio::fs::read(&path).await.map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to read object");
            StorageError::from(format!("failed to read {}: {e}", path.display()))
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), StorageError> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                error!(error = ?e, path = %parent.display(), "Failed to create object directory");
                StorageError::from(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        debug!(path = %path.display(), size = body.len(), "Writing object to local store");
        tokio::fs::write(&path, body).await.map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to write object");
            StorageError::from(format!("failed to write {}: {e}", path.display()))
        })
    }
}
