use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Canned Open Library data served by the mock.
///
/// Records are raw JSON so tests can plant any shape upstream might send.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Search hits in rank order.
    pub docs: Vec<Value>,
    pub works: HashMap<String, Value>,
    pub authors: HashMap<String, Value>,
    /// Editions envelopes keyed by work id.
    pub editions: HashMap<String, Value>,
    /// Ids that answer with the given status and an HTML body.
    pub failures: HashMap<String, u16>,
    /// Delay before every response.
    pub latency: Duration,
}

pub type Db = Arc<Catalog>;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

pub fn app() -> Router {
    app_with(Catalog::fixtures())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route("/search", get(search))
        .route("/works/{id}", get(get_work))
        .route("/works/{id}/editions.json", get(get_editions))
        .route("/authors/{id}", get(get_author))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn search(State(db): State<Db>, Query(params): Query<SearchParams>) -> Response {
    tokio::time::sleep(db.latency).await;
    let needle = params.q.strip_prefix("title:").unwrap_or(&params.q).to_lowercase();
    let docs: Vec<&Value> = db
        .docs
        .iter()
        .filter(|doc| {
            doc["title"]
                .as_str()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
        })
        .collect();
    tracing::debug!(query = %params.q, hits = docs.len(), "search");
    Json(json!({ "start": 0, "numFound": docs.len(), "docs": docs })).into_response()
}

async fn get_work(State(db): State<Db>, Path(file): Path<String>) -> Response {
    tokio::time::sleep(db.latency).await;
    match file.strip_suffix(".json") {
        Some(id) => lookup(&db, &db.works, id, "works"),
        None => not_found(&format!("/works/{file}")),
    }
}

async fn get_author(State(db): State<Db>, Path(file): Path<String>) -> Response {
    tokio::time::sleep(db.latency).await;
    match file.strip_suffix(".json") {
        Some(id) => lookup(&db, &db.authors, id, "authors"),
        None => not_found(&format!("/authors/{file}")),
    }
}

async fn get_editions(State(db): State<Db>, Path(id): Path<String>) -> Response {
    tokio::time::sleep(db.latency).await;
    lookup(&db, &db.editions, &id, "works")
}

fn lookup(db: &Catalog, records: &HashMap<String, Value>, id: &str, kind: &str) -> Response {
    if let Some(status) = db.failures.get(id) {
        let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "<html><body>upstream failure</body></html>").into_response();
    }
    match records.get(id) {
        Some(record) => Json(record.clone()).into_response(),
        None => not_found(&format!("/{kind}/{id}")),
    }
}

fn not_found(key: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "notfound", "key": key }))).into_response()
}

impl Catalog {
    /// A small Tolkien corner of the catalog. The two works carry their
    /// descriptions in the two shapes upstream uses.
    pub fn fixtures() -> Self {
        let docs = vec![
            json!({
                "key": "/works/OL27482W",
                "title": "The Hobbit",
                "author_name": ["J.R.R. Tolkien"],
                "author_key": ["OL26320A"],
                "cover_i": 6979861,
                "edition_count": 2,
                "first_publish_year": 1937,
                "has_fulltext": true,
                "isbn": ["9780345339683", "0261102214"],
                "language": ["eng"],
                "publish_year": [1937, 1966],
                "id_goodreads": ["5907"],
                "type": "work"
            }),
            json!({
                "key": "/works/OL27448W",
                "title": "The Lord of the Rings",
                "author_name": ["J.R.R. Tolkien"],
                "author_key": ["OL26320A"],
                "cover_i": 9255566,
                "first_publish_year": 1954,
                "type": "work"
            }),
            json!({
                "title": "The Annotated Hobbit",
                "oclc": ["18627717"],
                "lccn": ["88002051"]
            }),
        ];

        let works = HashMap::from([
            (
                "OL27482W".to_string(),
                json!({
                    "key": "/works/OL27482W",
                    "title": "The Hobbit",
                    "description": {
                        "type": "/type/text",
                        "value": "A tale of adventure in Middle-earth."
                    },
                    "covers": [6979861],
                    "subjects": ["Fantasy", "Dragons"],
                    "type": { "key": "/type/work" },
                    "authors": [{
                        "type": { "key": "/type/author_role" },
                        "author": { "key": "/authors/OL26320A" }
                    }],
                    "created": { "type": "/type/datetime", "value": "2009-10-15T11:34:21.437031" },
                    "last_modified": { "type": "/type/datetime", "value": "2023-03-01T10:12:45.141516" },
                    "latest_revision": 12,
                    "revision": 12
                }),
            ),
            (
                "OL27448W".to_string(),
                json!({
                    "key": "/works/OL27448W",
                    "title": "The Lord of the Rings",
                    "description": "The epic sequel to The Hobbit.",
                    "type": { "key": "/type/work" },
                    "remote_ids": { "wikidata": "Q15228" },
                    "revision": 3
                }),
            ),
        ]);

        let authors = HashMap::from([(
            "OL26320A".to_string(),
            json!({
                "key": "/authors/OL26320A",
                "name": "J.R.R. Tolkien",
                "personal_name": "John Ronald Reuel Tolkien",
                "bio": { "type": "/type/text", "value": "English writer and philologist." },
                "birth_date": "3 January 1892",
                "death_date": "2 September 1973",
                "photos": [6257741],
                "links": [{
                    "url": "https://www.tolkienestate.com/",
                    "title": "Tolkien Estate",
                    "type": { "key": "/type/link" }
                }],
                "remote_ids": { "viaf": "95218067", "wikidata": "Q892" },
                "type": { "key": "/type/author" },
                "revision": 40
            }),
        )]);

        let editions = HashMap::from([(
            "OL27482W".to_string(),
            json!({
                "links": { "self": "/works/OL27482W/editions.json", "work": "/works/OL27482W" },
                "size": 2,
                "entries": [
                    {
                        "key": "/books/OL7353617M",
                        "title": "The Hobbit",
                        "publishers": ["Ballantine Books"],
                        "physical_format": "Mass Market Paperback",
                        "number_of_pages": 287,
                        "isbn_10": ["0345339681"],
                        "isbn_13": ["9780345339683"],
                        "covers": [8406786],
                        "identifiers": { "goodreads": ["5907"] },
                        "publish_date": "1986",
                        "works": [{ "key": "/works/OL27482W" }],
                        "type": { "key": "/type/edition" }
                    },
                    {
                        "key": "/books/OL26331930M",
                        "title": "Der Hobbit",
                        "publishers": ["dtv"],
                        "works": [{ "key": "/works/OL27482W" }],
                        "type": { "key": "/type/edition" }
                    }
                ]
            }),
        )]);

        Self {
            docs,
            works,
            authors,
            editions,
            failures: HashMap::new(),
            latency: Duration::ZERO,
        }
    }
}
