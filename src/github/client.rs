//! # GitHub Client
//!
//! Executes `Resource` descriptors against a base URL through a `Transport`.
//!
//! ```text
//! Resource<A> ──► base_url + encoded segments + query ──► TokenAuth::decorate
//!             ──► Transport::send ──► status check ──► JSON decode ──► parse
//! ```
//!
//! Two entry points:
//! - `execute` returns `Result<A, RequestError>` and keeps the failure cause.
//! - `request` returns `Option<A>`: every failure is logged and collapses to
//!   `None`, which is what list screens consume.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::resource::Resource;
use super::transport::{HttpRequest, RequestError, Transport};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "ghissues";
const GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";

/// Adds `Authorization: token <value>` to every outgoing request.
#[derive(Clone)]
pub struct TokenAuth {
    token: String,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn decorate(&self, headers: &mut HeaderMap) -> Result<(), RequestError> {
        let mut value = HeaderValue::from_str(&format!("token {}", self.token))
            .map_err(|_| RequestError::Config("token contains invalid header characters".to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

// Never print the token.
impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenAuth(***)")
    }
}

pub struct GithubClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    auth: TokenAuth,
    user_agent: String,
}

impl GithubClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: &str,
        auth: TokenAuth,
        user_agent: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RequestError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::Config(format!("base URL {base_url} cannot take a path")));
        }
        Ok(Self {
            transport,
            base_url,
            auth,
            user_agent: user_agent.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends the resource's path segments and query to the base URL.
    ///
    /// Segments are percent-encoded one by one. A leading run of segments
    /// equal to the base URL's own path is dropped, so paths copied from
    /// URLs the API returned (`repos_url`) are not prefixed twice.
    fn url_for<A>(&self, resource: &Resource<A>) -> Result<Url, RequestError> {
        let segments = resource.segments();
        if let Some(bad) = segments.iter().find(|s| matches!(s.as_str(), "" | "." | "..")) {
            return Err(RequestError::Config(format!(
                "invalid path segment {bad:?} in {}",
                resource.path()
            )));
        }

        let base: Vec<&str> = self
            .base_url
            .path_segments()
            .map(|parts| parts.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let relative = match segments.get(..base.len()) {
            Some(prefix) if !base.is_empty() && prefix.iter().zip(&base).all(|(a, b)| a == b) => {
                &segments[base.len()..]
            }
            _ => segments,
        };

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RequestError::Config(format!("base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(relative);
        if !resource.query().is_empty() {
            url.query_pairs_mut().extend_pairs(resource.query());
        }
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_JSON));
        let agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| RequestError::Config(format!("invalid user agent {:?}", self.user_agent)))?;
        headers.insert(USER_AGENT, agent);
        self.auth.decorate(&mut headers)?;
        Ok(headers)
    }

    pub async fn execute<A>(&self, resource: &Resource<A>) -> Result<A, RequestError> {
        self.execute_with_progress(resource, |_| ()).await
    }

    /// Like `execute`, reporting download progress in `0.0..=1.0`.
    pub async fn execute_with_progress<A, P>(
        &self,
        resource: &Resource<A>,
        on_progress: P,
    ) -> Result<A, RequestError>
    where
        P: Fn(f32) + Send + Sync,
    {
        let request = HttpRequest {
            method: resource.method().clone(),
            url: self.url_for(resource)?,
            headers: self.headers()?,
        };

        let response = self.transport.send(request, &on_progress).await?;
        if !response.is_success() {
            return Err(RequestError::Api {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let json: Value =
            serde_json::from_slice(&response.body).map_err(|e| RequestError::Decode(e.to_string()))?;
        let value = resource.parse(&json).ok_or(RequestError::Unparseable)?;
        debug!("Parsed response for {} via {}", resource.path(), self.transport.name());
        Ok(value)
    }

    /// Executes the resource, logging and discarding any failure.
    pub async fn request<A>(&self, resource: &Resource<A>) -> Option<A> {
        match self.execute(resource).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Request {} {} failed: {}", resource.method(), resource.path(), e);
                None
            }
        }
    }
}
