//! Synchronous client for the Open Library API.
//!
//! # Overview
//! Title search, work lookup, author lookup and edition listing against
//! `openlibrary.org`, plus cover image URLs. Responses are decoded into typed
//! records; free-text fields that upstream sends either as a bare string or
//! as a `{type, value}` object are normalized to one string type.
//!
//! # Design
//! - `OpenLibraryClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `OpenLibrary` executes those through an injected `Transport` (a shared
//!   `ureq` agent by default) with a per-call timeout.
//! - Status codes are checked before decoding; 404 is `ApiError::NotFound`.
//! - Record types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod cover;
pub mod error;
pub mod http;
pub mod text;
pub mod types;

pub use api::{shared, OpenLibrary};
pub use client::OpenLibraryClient;
pub use config::ClientConfig;
pub use cover::{cover_url, CoverKey, CoverSize};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use text::{decode_text, ShapeError, TextValue};
pub use types::{
    Author, Doc, Edition, EditionLinks, EditionsResponse, SearchResponse, TypedValue, Work,
};
