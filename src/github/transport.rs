//! # HTTP Transport
//!
//! The seam between typed resources and the network. A `Transport` moves
//! bytes: it knows nothing about GitHub, JSON, or parsing. `GithubClient`
//! builds the `HttpRequest` and interprets the `HttpResponse`.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};

/// Errors that can occur while executing a resource.
#[derive(Debug)]
pub enum RequestError {
    /// Client misconfigured (bad base URL, unusable token).
    Config(String),
    /// Network-level failure (DNS, connection refused, broken body stream).
    Network(String),
    /// The API answered with a non-2xx status.
    Api { status: u16, body: String },
    /// The body was not valid JSON.
    Decode(String),
    /// The body was JSON but did not have the expected shape.
    Unparseable,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Config(msg) => write!(f, "config error: {msg}"),
            RequestError::Network(msg) => write!(f, "network error: {msg}"),
            RequestError::Api { status, body } => write!(f, "API error (HTTP {status}): {body}"),
            RequestError::Decode(msg) => write!(f, "decode error: {msg}"),
            RequestError::Unparseable => write!(f, "response did not match the expected shape"),
        }
    }
}

impl std::error::Error for RequestError {}

/// A fully-resolved outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

/// Raw status and body, before any decoding.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Sends the request and collects the whole body, reporting download
    /// progress in `0.0..=1.0` when the length is known.
    async fn send(
        &self,
        request: HttpRequest,
        on_progress: &(dyn Fn(f32) + Send + Sync),
    ) -> Result<HttpResponse, RequestError>;
}

/// `reqwest`-backed transport. Redirects are followed by reqwest itself.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn send(
        &self,
        request: HttpRequest,
        on_progress: &(dyn Fn(f32) + Send + Sync),
    ) -> Result<HttpResponse, RequestError> {
        info!("{} {}", request.method, request.url);

        let mut response = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let total = response.content_length().filter(|len| *len > 0);
        debug!("Response status: {status}, content length: {total:?}");

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?
        {
            body.extend_from_slice(&chunk);
            if let Some(total) = total {
                on_progress((body.len() as f32 / total as f32).min(1.0));
            }
        }

        debug!("Received {} body bytes", body.len());
        Ok(HttpResponse { status, body })
    }
}
