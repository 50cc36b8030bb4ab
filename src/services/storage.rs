use crate::consts;
use async_trait::async_trait;
use std::path::PathBuf;

/// Stores certificate images on the local filesystem, in the flat directory
/// served verbatim at `/uploads`. Stored files are never cleaned up, not
/// even when a later step of the ingestion fails.
#[derive(Clone)]
pub struct LocalStorageHandler {
    pub uploads_dir: PathBuf,
}

#[async_trait]
impl crate::services::StorageService for LocalStorageHandler {
    async fn save_certificate(&self, file_name: &str, body: Vec<u8>) -> anyhow::Result<String> {
        tokio::fs::write(self.uploads_dir.join(file_name), body).await?;

        Ok(format!(
            "{prefix}/{file_name}",
            prefix = consts::UPLOADS_URL_PREFIX
        ))
    }
}
