//! Retrieval of the full release list from a resolved endpoint.

use async_trait::async_trait;
use log::debug;

use crate::endpoint::ReleaseEndpoint;
use crate::error::DiscoveryError;
use crate::http::{HttpClient, default_user_agent};
use crate::release::Release;

/// Everything a fetch needs: where to ask and which credential to present.
#[derive(Clone, PartialEq, Eq)]
pub struct ReleaseQuery {
    pub endpoint: ReleaseEndpoint,
    pub access_token: Option<String>,
}

impl ReleaseQuery {
    pub fn new(endpoint: ReleaseEndpoint) -> Self {
        Self {
            endpoint,
            access_token: None,
        }
    }

    pub fn access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }
}

impl std::fmt::Debug for ReleaseQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseQuery")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchReleases: Send + Sync {
    /// Fetches every release the endpoint lists, in the order returned.
    async fn fetch_releases(&self, query: &ReleaseQuery) -> Result<Vec<Release>, DiscoveryError>;
}

/// Fetches releases over HTTP from a GitHub-compatible API.
///
/// Each call builds its own client and drops it before returning.
pub struct GitHubFetcher {
    user_agent: String,
}

impl GitHubFetcher {
    pub fn new() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }

    /// Identifies requests as `<product>/<version>` instead of this crate.
    pub fn with_user_agent(product: &str, version: &str) -> Self {
        Self {
            user_agent: format!("{}/{}", product, version),
        }
    }
}

impl Default for GitHubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchReleases for GitHubFetcher {
    #[tracing::instrument(skip(self, query), fields(url = %query.endpoint.releases_url()))]
    async fn fetch_releases(&self, query: &ReleaseQuery) -> Result<Vec<Release>, DiscoveryError> {
        let client = HttpClient::build(&self.user_agent, query.access_token.as_deref())?;
        let url = query.endpoint.releases_url();

        let body = client.get_text(&url).await?;
        let releases = decode_releases(&body)?;

        debug!("Fetched {} releases from {}", releases.len(), url);
        Ok(releases)
    }
}

/// Decodes a releases payload (a JSON array of release objects).
pub fn decode_releases(body: &str) -> Result<Vec<Release>, DiscoveryError> {
    serde_json::from_str(body).map_err(DiscoveryError::MalformedReleasePayload)
}
