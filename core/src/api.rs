//! Endpoint operations: build the request, execute it, parse the response.
//!
//! # Design
//! `OpenLibrary` pairs the stateless `OpenLibraryClient` with a shared
//! `Transport`. It is built once and handed to whoever needs it; clones share
//! the transport and so the connection pool. `shared()` offers a process-wide
//! instance for callers that do not want to thread one through, initialized
//! exactly once even under concurrent first use.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::debug;

use crate::client::OpenLibraryClient;
use crate::config::ClientConfig;
use crate::cover::CoverSize;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{Author, Doc, Edition, EditionsResponse, SearchResponse, Work};

#[derive(Clone)]
pub struct OpenLibrary {
    client: OpenLibraryClient,
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
}

impl OpenLibrary {
    /// Client over a fresh `UreqTransport`.
    pub fn new(config: &ClientConfig) -> Self {
        let transport = UreqTransport::with_default_timeout(config.timeout());
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: OpenLibraryClient::from_config(config),
            transport,
            timeout: Some(config.timeout()),
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(&ClientConfig::from_env()?))
    }

    /// A handle sharing this transport whose calls use `timeout` instead.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    pub fn client(&self) -> &OpenLibraryClient {
        &self.client
    }

    /// Full search envelope for a title query.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn search(&self, title: &str) -> Result<SearchResponse, ApiError> {
        let response = self.send(self.client.build_title_search(title))?;
        self.client.parse_search(response)
    }

    /// Search hits for a title query, in upstream rank order.
    pub fn search_title(&self, title: &str) -> Result<Vec<Doc>, ApiError> {
        Ok(self.search(title)?.docs)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn work(&self, id: &str) -> Result<Work, ApiError> {
        let response = self.send(self.client.build_work(id)?)?;
        self.client.parse_work(response)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn author(&self, id: &str) -> Result<Author, ApiError> {
        let response = self.send(self.client.build_author(id)?)?;
        self.client.parse_author(response)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn editions_page(&self, id: &str) -> Result<EditionsResponse, ApiError> {
        let response = self.send(self.client.build_editions(id)?)?;
        self.client.parse_editions_page(response)
    }

    /// Editions of a work, in upstream order.
    pub fn editions(&self, id: &str) -> Result<Vec<Edition>, ApiError> {
        Ok(self.editions_page(id)?.entries)
    }

    pub fn cover_url(&self, doc: &Doc, size: CoverSize) -> String {
        self.client.cover_url(doc, size)
    }

    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if request.timeout.is_none() {
            request.timeout = self.timeout;
        }
        debug!(url = %request.url, timeout = ?request.timeout, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

impl fmt::Debug for OpenLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenLibrary")
            .field("client", &self.client)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Process-wide client configured from the environment.
///
/// An unreadable environment falls back to the defaults; use
/// `OpenLibrary::from_env` to see the error instead.
pub fn shared() -> &'static OpenLibrary {
    static SHARED: OnceLock<OpenLibrary> = OnceLock::new();
    SHARED.get_or_init(|| {
        let config = ClientConfig::from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid OPENLIBRARY_ environment, using defaults");
            ClientConfig::default()
        });
        OpenLibrary::new(&config)
    })
}
