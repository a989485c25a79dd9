use reqwest::StatusCode;
use thiserror::Error;

/// Failures that abort a discovery call.
///
/// "No release found" is not an error: the pipeline returns `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(
        "invalid repository URL '{url}': {reason}. Pass the root URL of the repository, e.g. https://github.com/myuser/myrepo"
    )]
    InvalidRepositoryUrl { url: String, reason: String },

    #[error("invalid API URL '{0}'")]
    InvalidApiUrl(String),

    #[error("release request to {url} failed with HTTP {status}")]
    UpstreamRequestFailed { status: StatusCode, url: String },

    #[error("failed to decode release list: {0}")]
    MalformedReleasePayload(#[source] serde_json::Error),

    #[error("failed to send release request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("access token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl DiscoveryError {
    pub(crate) fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        DiscoveryError::InvalidRepositoryUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status of an upstream failure, if that is what this error is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DiscoveryError::UpstreamRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
