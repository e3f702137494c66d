use std::collections::HashMap;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Catalog};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("accept", "application/json")
        .body(String::new())
        .unwrap()
}

// --- search ---

#[tokio::test]
async fn search_matches_title_case_insensitively() {
    let resp = app().oneshot(get("/search?q=title%3AHOBBIT")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["start"], 0);
    assert_eq!(body["numFound"], 2);
    assert_eq!(body["docs"][0]["title"], "The Hobbit");
    assert_eq!(body["docs"][1]["title"], "The Annotated Hobbit");
}

#[tokio::test]
async fn search_without_hits_is_empty() {
    let resp = app().oneshot(get("/search?q=title%3Asilmarillion")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["numFound"], 0);
    assert_eq!(body["docs"], json!([]));
}

#[tokio::test]
async fn search_without_query_returns_400() {
    let resp = app().oneshot(get("/search")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- works ---

#[tokio::test]
async fn work_with_typed_description() {
    let resp = app().oneshot(get("/works/OL27482W.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["description"]["type"], "/type/text");
}

#[tokio::test]
async fn work_with_bare_description() {
    let resp = app().oneshot(get("/works/OL27448W.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["description"], "The epic sequel to The Hobbit.");
}

#[tokio::test]
async fn work_not_found() {
    let resp = app().oneshot(get("/works/OL0W.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body, json!({ "error": "notfound", "key": "/works/OL0W" }));
}

#[tokio::test]
async fn work_without_json_suffix_not_found() {
    let resp = app().oneshot(get("/works/OL27482W")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- authors ---

#[tokio::test]
async fn author_found() {
    let resp = app().oneshot(get("/authors/OL26320A.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "J.R.R. Tolkien");
}

// --- editions ---

#[tokio::test]
async fn editions_found() {
    let resp = app().oneshot(get("/works/OL27482W/editions.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["size"], 2);
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn editions_of_unknown_work_not_found() {
    let resp = app().oneshot(get("/works/OL0W/editions.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- planted failures ---

#[tokio::test]
async fn planted_failure_answers_with_html() {
    let catalog = Catalog {
        failures: HashMap::from([("OL27482W".to_string(), 503)]),
        ..Catalog::fixtures()
    };
    let resp = app_with(catalog).oneshot(get("/works/OL27482W.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(std::str::from_utf8(&bytes).unwrap().starts_with("<html>"));
}

#[tokio::test]
async fn planted_record_is_served_verbatim() {
    let mut catalog = Catalog::default();
    catalog.works.insert("OL9W".to_string(), json!({ "description": 42 }));
    let resp = app_with(catalog).oneshot(get("/works/OL9W.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "description": 42 }));
}
