//! Worksheet PDF uploads.
//!
//! Validates an uploaded document (size cap, sniffed MIME type) and hands it
//! to the storage backend under a sanitized filename.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use super::storage::FileStorage;

/// Maximum upload size (10 MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Service for storing and removing worksheet PDFs.
pub struct FileService {
    storage: Arc<dyn FileStorage>,
}

impl FileService {
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self { storage }
    }

    /// Validate and store an uploaded PDF. Returns the stored filename.
    ///
    /// The MIME type is sniffed from the file content, not taken from the
    /// client; anything other than a PDF is rejected.
    pub async fn store_pdf(&self, original_name: &str, data: &[u8]) -> Result<String> {
        if data.is_empty() {
            bail!("uploaded file is empty");
        }
        if data.len() > MAX_FILE_SIZE {
            bail!(
                "uploaded file is too large: {} bytes (maximum {})",
                data.len(),
                MAX_FILE_SIZE
            );
        }

        let Some(kind) = infer::get(data) else {
            bail!("could not determine uploaded file type");
        };
        if kind.mime_type() != "application/pdf" {
            bail!("unsupported file type: {}", kind.mime_type());
        }

        let filename = sanitize_filename(original_name);
        if filename.is_empty() {
            bail!("uploaded file has no usable name");
        }

        self.storage
            .write(&format!("local://worksheets/{filename}"), data)
            .await
            .context("failed to store worksheet PDF")?;

        info!(filename, bytes = data.len(), "worksheet PDF stored");
        Ok(filename)
    }

    /// Load a stored PDF for serving. `None` when it does not exist.
    pub async fn load_pdf(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        let filename = sanitize_filename(filename);
        if filename.is_empty() {
            return Ok(None);
        }

        let uri = format!("local://worksheets/{filename}");
        if !self.storage.exists(&uri).await? {
            return Ok(None);
        }

        let data = self
            .storage
            .read(&uri)
            .await
            .context("failed to read worksheet PDF")?;

        Ok(Some(data))
    }

    /// Remove a previously stored PDF. Missing files are tolerated.
    pub async fn remove_pdf(&self, filename: &str) -> Result<()> {
        let filename = sanitize_filename(filename);
        if filename.is_empty() {
            return Ok(());
        }

        self.storage
            .delete(&format!("local://worksheets/{filename}"))
            .await
            .context("failed to remove worksheet PDF")
    }

    /// The public URL for a stored PDF.
    pub fn pdf_url(&self, filename: &str) -> String {
        self.storage
            .public_url(&format!("local://worksheets/{filename}"))
    }
}

/// Reduce a client-supplied filename to a safe flat name: path components
/// stripped, anything outside `[A-Za-z0-9._-]` replaced with `_`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.');

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Storage fake recording written URIs.
    #[derive(Default)]
    struct RecordingStorage {
        written: Mutex<Vec<String>>,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FileStorage for RecordingStorage {
        async fn write(&self, uri: &str, _data: &[u8]) -> Result<()> {
            self.written.lock().unwrap().push(uri.to_string());
            Ok(())
        }

        async fn read(&self, _uri: &str) -> Result<Vec<u8>> {
            Ok(pdf_bytes())
        }

        async fn delete(&self, uri: &str) -> Result<()> {
            self.deleted.lock().unwrap().push(uri.to_string());
            Ok(())
        }

        async fn exists(&self, _uri: &str) -> Result<bool> {
            Ok(true)
        }

        fn public_url(&self, uri: &str) -> String {
            uri.to_string()
        }
    }

    fn pdf_bytes() -> Vec<u8> {
        let mut data = b"%PDF-1.4\n".to_vec();
        data.extend_from_slice(&[0u8; 64]);
        data
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("trig.pdf"), "trig.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\sheet one.pdf"), "sheet_one.pdf");
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
    }

    #[tokio::test]
    async fn store_pdf_accepts_pdf_content() {
        let storage = Arc::new(RecordingStorage::default());
        let service = FileService::new(storage.clone());

        let filename = service.store_pdf("trig.pdf", &pdf_bytes()).await.unwrap();
        assert_eq!(filename, "trig.pdf");
        assert_eq!(
            storage.written.lock().unwrap().as_slice(),
            ["local://worksheets/trig.pdf"]
        );
    }

    #[tokio::test]
    async fn store_pdf_rejects_non_pdf_content() {
        let service = FileService::new(Arc::new(RecordingStorage::default()));

        // PNG magic bytes
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let err = service.store_pdf("fake.pdf", &png).await.unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[tokio::test]
    async fn store_pdf_rejects_empty_upload() {
        let service = FileService::new(Arc::new(RecordingStorage::default()));
        assert!(service.store_pdf("empty.pdf", &[]).await.is_err());
    }

    #[tokio::test]
    async fn load_pdf_round_trips_stored_content() {
        let service = FileService::new(Arc::new(RecordingStorage::default()));

        let data = service.load_pdf("trig.pdf").await.unwrap();
        assert_eq!(data, Some(pdf_bytes()));
    }

    #[tokio::test]
    async fn load_pdf_with_empty_name_is_none() {
        let service = FileService::new(Arc::new(RecordingStorage::default()));
        assert_eq!(service.load_pdf("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_pdf_targets_stored_uri() {
        let storage = Arc::new(RecordingStorage::default());
        let service = FileService::new(storage.clone());

        service.remove_pdf("trig.pdf").await.unwrap();
        assert_eq!(
            storage.deleted.lock().unwrap().as_slice(),
            ["local://worksheets/trig.pdf"]
        );
    }
}
