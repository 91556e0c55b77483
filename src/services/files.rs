//! Reading captured screenshots back for upload

use super::FileReader;
use crate::error::Result;
use crate::utils::path_from_uri;
use async_trait::async_trait;
use base64::Engine;
use tracing::debug;

/// Reads `file://` URIs (or plain paths) from the local filesystem
#[derive(Default)]
pub struct FsReader;

#[async_trait]
impl FileReader for FsReader {
    async fn read_base64(&self, reference: &str) -> Result<String> {
        let path = path_from_uri(reference);
        let bytes = tokio::fs::read(&path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Read screenshot");
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}
