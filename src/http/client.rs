//! HTTP client scoped to a single discovery call.

use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::error::DiscoveryError;

/// Authorization scheme the releases API expects for personal tokens.
const TOKEN_SCHEME: &str = "token";

/// `<product>/<version>` identification sent with every request.
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Returns the token if it has any non-whitespace content.
pub fn normalize_token(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}

/// Thin wrapper over a reqwest `Client` carrying identification and auth headers.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client that sends `user_agent` and, when a usable token is
    /// given, `Authorization: token <token>` on every request.
    pub fn build(user_agent: &str, token: Option<&str>) -> Result<Self, DiscoveryError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = normalize_token(token) {
            let mut auth_value = HeaderValue::from_str(&format!("{} {}", TOKEN_SCHEME, token))
                .map_err(|_| DiscoveryError::InvalidToken)?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("HTTP client configured with authentication");
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(DiscoveryError::ClientBuild)?;

        Ok(Self::new(client))
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and returns the full body as text.
    /// Non-2xx responses fail with the upstream status.
    #[tracing::instrument(skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String, DiscoveryError> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(DiscoveryError::Request)?;

        let status = response.status();
        debug!("GET {} returned {}", url, status);
        if !status.is_success() {
            return Err(DiscoveryError::UpstreamRequestFailed {
                status,
                url: url.to_string(),
            });
        }

        response.text().await.map_err(DiscoveryError::Request)
    }
}
