//! Byte-fetch capability handed to the downstream update stage.

use anyhow::Result;
use async_trait::async_trait;

/// Anything that can fetch the bytes behind a URL.
///
/// Handed through to the update manager so the download stage can use a
/// caller-provided transport instead of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileDownloader: Send + Sync {
    async fn download_bytes(&self, url: &str) -> Result<Vec<u8>>;
}
