//! Error types for the Open Library client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "no such work or author" from "the server returned an unexpected status."
//! All other non-2xx responses land in `UpstreamStatus` with the raw status
//! code and body. A response is only decoded after its status has been
//! checked, so an HTML error page never shows up as a `Parse` error.

use thiserror::Error;

/// Errors returned by the client's build, parse and fetch methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built, e.g. an empty or malformed identifier.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request did not complete: connection refused, DNS, TLS, I/O.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The per-call deadline elapsed before the response was read.
    #[error("request timed out")]
    Timeout,

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The body is not valid JSON or does not fit the expected record.
    /// `path` points at the offending field (`.` for the document root).
    #[error("could not decode response at `{path}`: {message}")]
    Parse { path: String, message: String },

    /// Configuration could not be loaded from the environment.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<figment::Error> for ApiError {
    fn from(err: figment::Error) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Timeout(_) => ApiError::Timeout,
            ureq::Error::BadUri(uri) => ApiError::InvalidRequest(format!("bad URI: {uri}")),
            ureq::Error::Http(e) => ApiError::InvalidRequest(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}
