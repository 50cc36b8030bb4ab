pub mod extraction;
pub mod storage;

use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService {
    /// Persists certificate bytes under `file_name` and returns the public
    /// url path the file is served from.
    async fn save_certificate(&self, file_name: &str, body: Vec<u8>) -> anyhow::Result<String>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtractionService {
    async fn extract_certificate(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<extraction::ExtractedCertFields, extraction::ExtractionError>;
}

pub type ImplStorageService = Box<dyn StorageService>;
pub type ImplExtractionService = Box<dyn ExtractionService>;
