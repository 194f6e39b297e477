//! The two operations the client consumes from the service.

use async_trait::async_trait;

use crate::api::types::VideoInfo;
use crate::error::Result;

/// Metadata/download service seam.
///
/// [`ServiceClient`](crate::api::ServiceClient) talks HTTP; tests substitute
/// their own implementations to script responses.
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Retrieve title, thumbnail and duration without the media itself.
    async fn fetch_metadata(&self, url: &str) -> Result<VideoInfo>;

    /// Retrieve the transcoded file as raw bytes.
    async fn fetch_download(&self, url: &str) -> Result<Vec<u8>>;
}
