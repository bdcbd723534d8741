//! File storage backends.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// File storage backend trait.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write data to storage at the given URI.
    async fn write(&self, uri: &str, data: &[u8]) -> Result<()>;

    /// Read data from storage at the given URI.
    async fn read(&self, uri: &str) -> Result<Vec<u8>>;

    /// Delete a file from storage.
    async fn delete(&self, uri: &str) -> Result<()>;

    /// Check if a file exists.
    async fn exists(&self, uri: &str) -> Result<bool>;

    /// Get the public URL for a file.
    fn public_url(&self, uri: &str) -> String;
}

/// Local filesystem storage.
pub struct LocalFileStorage {
    /// Base path for file storage.
    base_path: PathBuf,

    /// Base URL for public file access.
    base_url: String,
}

impl LocalFileStorage {
    /// Create a new local file storage.
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
        }
    }

    /// Parse a local:// URI to get the relative path.
    ///
    /// Rejects paths containing `..` components to prevent directory
    /// traversal.
    fn parse_uri(&self, uri: &str) -> Result<PathBuf> {
        let path = uri
            .strip_prefix("local://")
            .context("invalid local URI, must start with local://")?;

        if path.split('/').any(|component| component == "..") {
            anyhow::bail!("URI contains directory traversal");
        }

        Ok(self.base_path.join(path))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn write(&self, uri: &str, data: &[u8]) -> Result<()> {
        let path = self.parse_uri(uri)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("failed to create storage directory")?;
        }

        let mut file = fs::File::create(&path)
            .await
            .with_context(|| format!("failed to create file {}", path.display()))?;
        file.write_all(data)
            .await
            .context("failed to write file data")?;
        file.flush().await.context("failed to flush file")?;

        debug!(uri, bytes = data.len(), "stored file");
        Ok(())
    }

    async fn read(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.parse_uri(uri)?;

        fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))
    }

    async fn delete(&self, uri: &str) -> Result<()> {
        let path = self.parse_uri(uri)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(uri, "delete of missing file ignored");
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("failed to delete {}", path.display())),
        }
    }

    async fn exists(&self, uri: &str) -> Result<bool> {
        let path = self.parse_uri(uri)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn public_url(&self, uri: &str) -> String {
        let path = uri.strip_prefix("local://").unwrap_or(uri);
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_uri_rejects_traversal() {
        let storage = LocalFileStorage::new("/tmp/uploads", "/files");
        assert!(storage.parse_uri("local://../etc/passwd").is_err());
        assert!(storage.parse_uri("local://a/../../b.pdf").is_err());
        assert!(storage.parse_uri("local://worksheets/a.pdf").is_ok());
    }

    #[test]
    fn parse_uri_requires_scheme() {
        let storage = LocalFileStorage::new("/tmp/uploads", "/files");
        assert!(storage.parse_uri("worksheets/a.pdf").is_err());
    }

    #[test]
    fn public_url_joins_base() {
        let storage = LocalFileStorage::new("/tmp/uploads", "/files/");
        assert_eq!(
            storage.public_url("local://worksheets/a.pdf"),
            "/files/worksheets/a.pdf"
        );
    }
}
