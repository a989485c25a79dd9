//! The end-to-end discovery call: resolve, fetch, select, construct.

use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

use crate::downloader::FileDownloader;
use crate::endpoint;
use crate::error::DiscoveryError;
use crate::fetcher::{FetchReleases, GitHubFetcher, ReleaseQuery};
use crate::http::normalize_token;
use crate::manager::UpdateManager;
use crate::release::Release;
use crate::selector::select_release;

/// Caller-supplied inputs to a discovery call besides the repository URL.
#[derive(Clone, Default)]
pub struct DiscoveryOptions {
    pub application_name: Option<String>,
    pub root_directory: Option<PathBuf>,
    pub downloader: Option<Arc<dyn FileDownloader>>,
    /// Opt in to prereleases. Off by default.
    pub prerelease: bool,
    pub access_token: Option<String>,
    /// Explicit API root, replacing the one derived from the repository host.
    pub api_url: Option<String>,
}

impl DiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn root_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.root_directory = Some(dir.into());
        self
    }

    pub fn downloader(mut self, downloader: Arc<dyn FileDownloader>) -> Self {
        self.downloader = Some(downloader);
        self
    }

    pub fn prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }
}

impl std::fmt::Debug for DiscoveryOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryOptions")
            .field("application_name", &self.application_name)
            .field("root_directory", &self.root_directory)
            .field("downloader", &self.downloader.as_ref().map(|_| "<custom>"))
            .field("prerelease", &self.prerelease)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Discovers the release to update to and wraps it in an [`UpdateManager`].
///
/// Returns `Ok(None)` when the repository has no releases or none pass the
/// prerelease policy.
pub async fn github_update_manager(
    repo_url: &str,
    options: DiscoveryOptions,
) -> Result<Option<UpdateManager>, DiscoveryError> {
    github_update_manager_with(&GitHubFetcher::new(), repo_url, options).await
}

/// Same as [`github_update_manager`], fetching through `fetcher`.
#[tracing::instrument(skip(fetcher, options))]
pub async fn github_update_manager_with<F: FetchReleases + ?Sized>(
    fetcher: &F,
    repo_url: &str,
    options: DiscoveryOptions,
) -> Result<Option<UpdateManager>, DiscoveryError> {
    let release = latest_release(
        fetcher,
        repo_url,
        options.prerelease,
        options.access_token.as_deref(),
        options.api_url.as_deref(),
    )
    .await?;

    let Some(release) = release else {
        info!("No release found for {}", repo_url);
        return Ok(None);
    };

    info!("Selected release {}", release.html_url());
    debug!("Release has {} assets", release.assets().len());

    Ok(Some(UpdateManager::for_release(
        release,
        options.application_name,
        options.root_directory,
        options.downloader,
        options.access_token,
    )))
}

/// Resolves, fetches, and selects, returning the chosen release itself.
#[tracing::instrument(skip(fetcher, access_token))]
pub async fn latest_release<F: FetchReleases + ?Sized>(
    fetcher: &F,
    repo_url: &str,
    prerelease: bool,
    access_token: Option<&str>,
    api_url: Option<&str>,
) -> Result<Option<Release>, DiscoveryError> {
    let mut endpoint = endpoint::resolve(repo_url)?;
    if let Some(api_url) = api_url {
        endpoint = endpoint.with_base(api_url)?;
    }

    let query = ReleaseQuery::new(endpoint)
        .access_token(normalize_token(access_token).map(str::to_string));
    let releases = fetcher.fetch_releases(&query).await?;

    debug!(
        "{} releases fetched, prereleases {}",
        releases.len(),
        if prerelease { "included" } else { "excluded" }
    );

    Ok(select_release(&releases, prerelease).cloned())
}
