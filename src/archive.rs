//! Module archive loading
//!
//! A [`ModuleArchive`] is the zip bundle handed to the registry's upload procedure.
//! It is read fully into memory before any remote call is made.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Archive formats accepted by the upload procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArchiveFormat {
    #[default]
    #[serde(rename = "ARCHIVE_FORMAT_ZIP")]
    Zip,
}

#[derive(Debug, Clone)]
pub struct ModuleArchive {
    pub module_id: String,
    pub content: Vec<u8>,
    pub format: ArchiveFormat,
}

impl ModuleArchive {
    pub fn new(module_id: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            module_id: module_id.into(),
            content,
            format: ArchiveFormat::Zip,
        }
    }

    /// Read the archive from disk
    pub async fn from_file(module_id: &str, path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path).await.map_err(|e| {
            RegistryError::Io(format!("Failed to read zip file {}: {}", path.display(), e))
        })?;
        Ok(Self::new(module_id, content))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// `sha256:<hex>` digest of the raw content
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(&self.content);
        format!("sha256:{}", hex::encode(hash))
    }

    /// Cheap signature check; the registry stays the authority on validity
    pub fn looks_like_zip(&self) -> bool {
        self.content.starts_with(ZIP_MAGIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_of_empty_content() {
        let archive = ModuleArchive::new("acme/http", Vec::new());
        assert_eq!(
            archive.digest(),
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(archive.size(), 0);
        assert_eq!(archive.format, ArchiveFormat::Zip);
    }

    #[test]
    fn test_zip_signature() {
        let zip = ModuleArchive::new("acme/http", b"PK\x03\x04rest".to_vec());
        assert!(zip.looks_like_zip());

        let tar = ModuleArchive::new("acme/http", b"ustar".to_vec());
        assert!(!tar.looks_like_zip());
    }

    #[test]
    fn test_format_wire_name() {
        let json = serde_json::to_string(&ArchiveFormat::Zip).unwrap();
        assert_eq!(json, "\"ARCHIVE_FORMAT_ZIP\"");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = ModuleArchive::from_file("acme/http", Path::new("/nonexistent/module.zip"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Io(_)));
        assert!(err.to_string().contains("Failed to read zip file"));
    }
}
