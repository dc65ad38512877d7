//! The seam between the API client and the network
//!
//! `HttpTransport` talks to the real API over reqwest. Anything else that
//! implements `Transport` (tests use an in-memory fake) can stand in for it.

use std::future::Future;
use std::time::Instant;

use crate::error::AkibaError;

use super::request::{ApiRequest, ApiResponse, Method, RequestBody};

/// Executes one request and returns whatever the server answered
///
/// Only failures where no response was received are errors here; non-2xx
/// statuses are returned as ordinary responses.
pub trait Transport: Send + Sync + 'static {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, AkibaError>> + Send;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` must already be normalized (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Result<Self, AkibaError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("akiba-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AkibaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AkibaError> {
        let label = request.label();
        let url = self.url(&request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(authorization) = &request.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        let started = Instant::now();
        let response = builder.send().await.inspect_err(|err| {
            tracing::error!(request = %label, "request failed: {}", err);
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.inspect_err(|err| {
            tracing::error!(request = %label, "failed reading response body: {}", err);
        })?;

        tracing::debug!(
            request = %label,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
