//! Maps a repository root URL to the releases API that serves it.

use reqwest::Url;
use std::fmt;

use crate::error::DiscoveryError;

/// API root of the public hosting service.
pub const PUBLIC_API_ROOT: &str = "https://api.github.com/";

/// Hosts with this suffix are served by [`PUBLIC_API_ROOT`].
const PUBLIC_HOST_SUFFIX: &str = "github.com";

/// Enterprise installations expose the API under this path on their own host.
const ENTERPRISE_API_PATH: &str = "api/v3/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Public,
    Enterprise,
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostKind::Public => write!(f, "public"),
            HostKind::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// Resolved location of a repository's release list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEndpoint {
    base: Url,
    releases_path: String,
    kind: HostKind,
}

impl ReleaseEndpoint {
    /// API root; always ends with `/`.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Path relative to [`base`](Self::base), e.g. `repos/owner/repo/releases`.
    pub fn releases_path(&self) -> &str {
        &self.releases_path
    }

    pub fn kind(&self) -> HostKind {
        self.kind
    }

    pub fn releases_url(&self) -> String {
        format!("{}{}", self.base, self.releases_path)
    }

    /// Points the same release list at an explicit API root.
    pub fn with_base(mut self, api_url: &str) -> Result<Self, DiscoveryError> {
        let mut normalized = api_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base = Url::parse(&normalized)
            .map_err(|_| DiscoveryError::InvalidApiUrl(api_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(DiscoveryError::InvalidApiUrl(api_url.to_string()));
        }

        self.base = base;
        Ok(self)
    }
}

/// Resolves `https://host/owner/repo` into the releases API endpoint.
#[tracing::instrument]
pub fn resolve(repo_url: &str) -> Result<ReleaseEndpoint, DiscoveryError> {
    let url = Url::parse(repo_url)
        .map_err(|e| DiscoveryError::invalid_url(repo_url, e.to_string()))?;

    let host = url
        .host_str()
        .ok_or_else(|| DiscoveryError::invalid_url(repo_url, "URL has no host"))?;

    let path = url.path();
    let segments = segment_count(path);
    if segments != 3 {
        return Err(DiscoveryError::invalid_url(
            repo_url,
            format!("expected 3 path segments, found {}", segments),
        ));
    }

    let repo_path = path.trim_end_matches('/');
    let mut parts = repo_path.trim_start_matches('/').split('/');
    let owner = parts.next().unwrap_or_default();
    let repo = parts.next().unwrap_or_default();
    if owner.is_empty() || repo.is_empty() {
        return Err(DiscoveryError::invalid_url(
            repo_url,
            "owner and repository name must not be empty",
        ));
    }

    let (base, kind) = if host.to_ascii_lowercase().ends_with(PUBLIC_HOST_SUFFIX) {
        let base = Url::parse(PUBLIC_API_ROOT)
            .map_err(|e| DiscoveryError::invalid_url(repo_url, e.to_string()))?;
        (base, HostKind::Public)
    } else {
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let base = Url::parse(&format!(
            "{}://{}/{}",
            url.scheme(),
            authority,
            ENTERPRISE_API_PATH
        ))
        .map_err(|e| DiscoveryError::invalid_url(repo_url, e.to_string()))?;
        (base, HostKind::Enterprise)
    };

    let releases_path = format!("repos{}/releases", repo_path);

    log::debug!(
        "Resolved {} to {} host, releases at {}{}",
        repo_url,
        kind,
        base,
        releases_path
    );

    Ok(ReleaseEndpoint {
        base,
        releases_path,
        kind,
    })
}

/// Counts path segments the way a root URL decomposes: `/`, `owner/`, `repo`.
fn segment_count(path: &str) -> usize {
    let rest = path.strip_prefix('/').unwrap_or(path);
    1 + rest.split_inclusive('/').count()
}
