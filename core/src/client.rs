//! Stateless HTTP request builder and response parser for the Open Library API.
//!
//! # Design
//! `OpenLibraryClient` holds only the API and covers hosts and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. `OpenLibrary` joins the two with a transport; callers
//! with their own HTTP stack can use this type directly.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::cover::{self, CoverSize, DEFAULT_COVERS_URL};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Author, Doc, Edition, EditionsResponse, SearchResponse, Work};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLibraryClient {
    base_url: String,
    covers_url: String,
}

impl OpenLibraryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            covers_url: config.covers_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn covers_url(&self) -> &str {
        &self.covers_url
    }

    /// `GET /search?q=title:<title>`, with the whole query value escaped.
    pub fn build_title_search(&self, title: &str) -> HttpRequest {
        let query = urlencoding::encode(&format!("title:{title}")).into_owned();
        get(format!("{}/search?q={query}", self.base_url))
    }

    /// `GET /works/<id>.json`
    pub fn build_work(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let id = record_id(id, "/works/")?;
        Ok(get(format!("{}/works/{id}.json", self.base_url)))
    }

    /// `GET /authors/<id>.json`
    pub fn build_author(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let id = record_id(id, "/authors/")?;
        Ok(get(format!("{}/authors/{id}.json", self.base_url)))
    }

    /// `GET /works/<id>/editions.json`
    pub fn build_editions(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let id = record_id(id, "/works/")?;
        Ok(get(format!("{}/works/{id}/editions.json", self.base_url)))
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<SearchResponse, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The search hits only, in upstream rank order.
    pub fn parse_title_search(&self, response: HttpResponse) -> Result<Vec<Doc>, ApiError> {
        Ok(self.parse_search(response)?.docs)
    }

    pub fn parse_work(&self, response: HttpResponse) -> Result<Work, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_author(&self, response: HttpResponse) -> Result<Author, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_editions_page(&self, response: HttpResponse) -> Result<EditionsResponse, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The editions only, in upstream order.
    pub fn parse_editions(&self, response: HttpResponse) -> Result<Vec<Edition>, ApiError> {
        Ok(self.parse_editions_page(response)?.entries)
    }

    pub fn cover_url(&self, doc: &Doc, size: CoverSize) -> String {
        cover::cover_url(&self.covers_url, doc, size)
    }

    pub fn edition_cover_url(&self, edition: &Edition, size: CoverSize) -> String {
        cover::edition_cover_url(&self.covers_url, edition, size)
    }

    pub fn author_photo_url(&self, author: &Author, size: CoverSize) -> String {
        cover::author_photo_url(&self.covers_url, author, size)
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        url,
        headers: vec![("Accept".to_string(), "application/json".to_string())],
        timeout: None,
    }
}

/// Accept a bare id (`OL27482W`) or a key (`/works/OL27482W`) and return the
/// bare id. Anything that would change the shape of the URL is rejected.
fn record_id<'a>(id: &'a str, key_prefix: &str) -> Result<&'a str, ApiError> {
    let id = id.strip_prefix(key_prefix).unwrap_or(id);
    if id.is_empty() {
        return Err(ApiError::InvalidRequest("identifier is empty".to_string()));
    }
    if let Some(c) = id.chars().find(|&c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace()) {
        return Err(ApiError::InvalidRequest(format!("identifier {id:?} contains {c:?}")));
    }
    Ok(id)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::UpstreamStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let de = &mut serde_json::Deserializer::from_str(body);
    let value = serde_path_to_error::deserialize(&mut *de).map_err(|e| ApiError::Parse {
        path: e.path().to_string(),
        message: e.into_inner().to_string(),
    })?;
    de.end().map_err(|e| ApiError::Parse {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> OpenLibraryClient {
        OpenLibraryClient::new("http://localhost:3000")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_title_search_escapes_query() {
        let req = client().build_title_search("the hobbit");
        assert_eq!(req.url, "http://localhost:3000/search?q=title%3Athe%20hobbit");
        assert_eq!(req.headers, vec![("Accept".to_string(), "application/json".to_string())]);
        assert_eq!(req.timeout, None);
    }

    #[test]
    fn build_title_search_escapes_reserved_characters() {
        let req = client().build_title_search("R&D: 100% #1?");
        assert_eq!(req.url, "http://localhost:3000/search?q=title%3AR%26D%3A%20100%25%20%231%3F");
    }

    #[test]
    fn build_work_produces_correct_request() {
        let req = client().build_work("OL27482W").unwrap();
        assert_eq!(req.url, "http://localhost:3000/works/OL27482W.json");
        assert_eq!(req.headers[0].1, "application/json");
    }

    #[test]
    fn build_accepts_keys() {
        let c = client();
        assert_eq!(c.build_work("/works/OL27482W").unwrap().url, "http://localhost:3000/works/OL27482W.json");
        assert_eq!(
            c.build_author("/authors/OL26320A").unwrap().url,
            "http://localhost:3000/authors/OL26320A.json"
        );
        assert_eq!(
            c.build_editions("/works/OL27482W").unwrap().url,
            "http://localhost:3000/works/OL27482W/editions.json"
        );
    }

    #[test]
    fn build_rejects_bad_identifiers() {
        let c = client();
        for id in ["", "/works/", "OL1W/editions", "OL1W?x=1", "OL 1W", "OL1W#", "%2e%2e"] {
            let err = c.build_work(id).unwrap_err();
            assert!(matches!(err, ApiError::InvalidRequest(_)), "{id}: {err:?}");
        }
        // An author key is not a work key.
        assert!(c.build_editions("/authors/OL1A").is_err());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = OpenLibraryClient::new("http://localhost:3000/");
        let req = client.build_author("OL26320A").unwrap();
        assert_eq!(req.url, "http://localhost:3000/authors/OL26320A.json");
    }

    #[test]
    fn parse_search_envelope() {
        let search = client()
            .parse_search(ok(r#"{"numFound":42,"start":0,"docs":[{"title":"one"},{"title":"two"}]}"#))
            .unwrap();
        assert_eq!(search.found, 42);
        assert_eq!(search.start, 0);
        assert_eq!(search.docs.len(), 2);
        assert_eq!(search.docs[1].title, "two");
    }

    #[test]
    fn parse_title_search_returns_docs() {
        let docs = client()
            .parse_title_search(ok(
                r#"{"start":0,"numFound":1,"docs":[{"title":"The Hobbit","key":"/works/OL1234W","isbn":["9780345339683"]}]}"#,
            ))
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "The Hobbit");
        assert_eq!(docs[0].key, "/works/OL1234W");
        assert_eq!(docs[0].isbn, vec!["9780345339683"]);
    }

    #[test]
    fn parse_work_both_description_shapes() {
        let c = client();
        let typed = c
            .parse_work(ok(r#"{"description":{"type":"/type/text","value":"A tale of..."}}"#))
            .unwrap();
        let bare = c.parse_work(ok(r#"{"description":"A tale of..."}"#)).unwrap();
        assert_eq!(typed.description, "A tale of...");
        assert_eq!(bare.description, "A tale of...");
    }

    #[test]
    fn parse_work_shape_error_reports_field_path() {
        let err = client()
            .parse_work(ok(r#"{"title":"x","description":42}"#))
            .unwrap_err();
        match err {
            ApiError::Parse { path, .. } => assert_eq!(path, "description"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn parse_author_bio_shapes() {
        let author = client()
            .parse_author(ok(r#"{"name":"J.R.R. Tolkien","bio":"Philologist."}"#))
            .unwrap();
        assert_eq!(author.bio, "Philologist.");
        assert_eq!(author.name, "J.R.R. Tolkien");
    }

    #[test]
    fn parse_editions_returns_entries_in_order() {
        let editions = client()
            .parse_editions(ok(r#"{"size":2,"entries":[{"title":"b"},{"title":"a"}]}"#))
            .unwrap();
        let titles: Vec<&str> = editions.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn parse_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"error":"notfound","key":"/works/OL0W"}"#.to_string(),
        };
        let err = client().parse_work(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_server_error_keeps_body() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "<html>oops</html>".to_string(),
        };
        let err = client().parse_search(response).unwrap_err();
        match err {
            ApiError::UpstreamStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "<html>oops</html>");
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_search(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
        let err = client().parse_author(ok("")).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
        let err = client().parse_work(ok("{} trailing")).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn parse_wrong_envelope_shape() {
        let err = client().parse_search(ok(r#"{"docs":{"title":"not a list"}}"#)).unwrap_err();
        match err {
            ApiError::Parse { path, .. } => assert_eq!(path, "docs"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn cover_urls_use_configured_host() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:4000/");
        let c = OpenLibraryClient::from_config(&config);
        let doc = Doc {
            isbn: vec!["0261102214".to_string()],
            ..Doc::default()
        };
        assert_eq!(c.cover_url(&doc, CoverSize::Large), "http://127.0.0.1:4000/b/isbn/0261102214-L.jpg");
    }
}
