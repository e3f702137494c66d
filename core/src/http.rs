//! HTTP transport types and the blocking transport that executes them.
//!
//! # Design
//! Requests and responses are plain data. `OpenLibraryClient` builds an
//! `HttpRequest` and parses an `HttpResponse` without touching the network;
//! a `Transport` sits between the two and does the I/O. `UreqTransport` is
//! the default. Tests substitute their own transport to script responses.
//!
//! Every request is a GET with no body, so the method is not carried.

use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::ApiError;

/// An HTTP GET described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Deadline for the whole round-trip. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An HTTP response described as plain data. The body is read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one request and returns whatever the server answered.
///
/// Non-2xx statuses are responses, not errors; only failures to complete
/// the round-trip are returned as `Err`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a single `ureq::Agent`.
///
/// The agent owns the connection pool, so one transport should be shared
/// across calls. Requests without their own timeout get the agent's
/// deadline.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_default_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_default_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.config().timeout_global(Some(timeout)).build();
        }

        let mut response = builder.call()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), value.to_str().unwrap_or_default().to_string())
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse { status, headers, body })
    }
}
