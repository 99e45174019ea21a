//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::github::{HttpRequest, HttpResponse, RequestError, Transport};

/// A transport that answers every request with the same canned response
/// and remembers what it was asked to send.
pub struct StaticTransport {
    status: u16,
    body: String,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StaticTransport {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().ok()?.last().cloned()
    }
}

#[async_trait]
impl Transport for StaticTransport {
    fn name(&self) -> &str {
        "static"
    }

    async fn send(
        &self,
        request: HttpRequest,
        on_progress: &(dyn Fn(f32) + Send + Sync),
    ) -> Result<HttpResponse, RequestError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        if !self.body.is_empty() {
            on_progress(1.0);
        }
        Ok(HttpResponse {
            status: self.status,
            body: self.body.as_bytes().to_vec(),
        })
    }
}
