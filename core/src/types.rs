//! Record types for Open Library API responses.
//!
//! # Design
//! These mirror the upstream JSON schemas field by field. Every field is
//! defaulted so that keys missing from a response, or present as `null`,
//! decode to an empty list, zero or empty string rather than failing the
//! record. The only fields with non-trivial decoding are the free-text ones,
//! which go through [`TextValue`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::text::TextValue;

/// Treat an explicit `null` like a missing key.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One search hit from `/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Doc {
    #[serde(deserialize_with = "null_default")]
    pub author_alternative_name: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub author_key: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub author_name: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub cover_edition_key: String,
    #[serde(rename = "cover_i", deserialize_with = "null_default")]
    pub cover_id: i64,
    #[serde(rename = "ebook_count_i", deserialize_with = "null_default")]
    pub ebook_count: i64,
    #[serde(deserialize_with = "null_default")]
    pub edition_count: i64,
    #[serde(deserialize_with = "null_default")]
    pub edition_key: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub first_publish_year: i32,
    #[serde(rename = "has_fulltext", deserialize_with = "null_default")]
    pub full_text: bool,
    #[serde(deserialize_with = "null_default")]
    pub ia: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub ia_box_id: Vec<String>,
    #[serde(rename = "ia_collection_s", deserialize_with = "null_default")]
    pub ia_collection: String,
    #[serde(deserialize_with = "null_default")]
    pub ia_loaded_id: Vec<String>,
    #[serde(rename = "id_goodreads", deserialize_with = "null_default")]
    pub goodreads_id: Vec<String>,
    #[serde(rename = "id_google", deserialize_with = "null_default")]
    pub google_id: Vec<String>,
    #[serde(rename = "id_librarything", deserialize_with = "null_default")]
    pub librarything_id: Vec<String>,
    #[serde(rename = "id_overdrive", deserialize_with = "null_default")]
    pub overdrive_id: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub isbn: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub key: String,
    #[serde(deserialize_with = "null_default")]
    pub language: Vec<String>,
    #[serde(rename = "last_modified_i", deserialize_with = "null_default")]
    pub last_modified: i64,
    #[serde(deserialize_with = "null_default")]
    pub lccn: Vec<String>,
    #[serde(rename = "lending_edition_s", deserialize_with = "null_default")]
    pub lending_edition: String,
    #[serde(rename = "lending_identifier_s", deserialize_with = "null_default")]
    pub lending_identifier: String,
    #[serde(deserialize_with = "null_default")]
    pub oclc: Vec<String>,
    #[serde(rename = "printdisabled_s", deserialize_with = "null_default")]
    pub print_disabled: String,
    #[serde(rename = "public_scan_b", deserialize_with = "null_default")]
    pub public_scan: bool,
    #[serde(deserialize_with = "null_default")]
    pub publish_date: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub publish_place: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub publish_year: Vec<i32>,
    #[serde(deserialize_with = "null_default")]
    pub publisher: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub seed: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub subject: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub text: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub title_suggest: String,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
}

/// Envelope returned by `/search`. `docs` keeps upstream rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "null_default")]
    pub start: i64,
    #[serde(rename = "numFound", deserialize_with = "null_default")]
    pub found: i64,
    #[serde(deserialize_with = "null_default")]
    pub docs: Vec<Doc>,
}

/// A `{type, value}` pair, used for timestamps such as `created`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedValue {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

/// A reference to another record by key, e.g. `{"key": "/type/work"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyRef {
    #[serde(deserialize_with = "null_default")]
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteIds {
    #[serde(deserialize_with = "null_default")]
    pub viaf: String,
    #[serde(deserialize_with = "null_default")]
    pub wikidata: String,
}

/// Author entry on a work: the author's key and the relation type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkAuthor {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: KeyRef,
    #[serde(deserialize_with = "null_default")]
    pub author: KeyRef,
}

/// A literary work from `/works/{id}.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    pub description: TextValue,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub created: TypedValue,
    #[serde(deserialize_with = "null_default")]
    pub photos: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    pub covers: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    pub subjects: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub last_modified: TypedValue,
    #[serde(deserialize_with = "null_default")]
    pub latest_revision: i64,
    #[serde(deserialize_with = "null_default")]
    pub key: String,
    #[serde(deserialize_with = "null_default")]
    pub revision: i64,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: KeyRef,
    #[serde(deserialize_with = "null_default")]
    pub remote_ids: RemoteIds,
    #[serde(deserialize_with = "null_default")]
    pub authors: Vec<WorkAuthor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "null_default")]
    pub url: String,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: KeyRef,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
}

/// An author from `/authors/{id}.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub bio: TextValue,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub links: Vec<Link>,
    #[serde(deserialize_with = "null_default")]
    pub personal_name: String,
    #[serde(deserialize_with = "null_default")]
    pub created: TypedValue,
    #[serde(deserialize_with = "null_default")]
    pub photos: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    pub last_modified: TypedValue,
    #[serde(deserialize_with = "null_default")]
    pub latest_revision: i64,
    #[serde(deserialize_with = "null_default")]
    pub key: String,
    #[serde(deserialize_with = "null_default")]
    pub birth_date: String,
    #[serde(deserialize_with = "null_default")]
    pub death_date: String,
    #[serde(deserialize_with = "null_default")]
    pub revision: i64,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: KeyRef,
    #[serde(deserialize_with = "null_default")]
    pub remote_ids: RemoteIds,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditionIdentifiers {
    #[serde(deserialize_with = "null_default")]
    pub goodreads: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub librarything: Vec<String>,
}

/// One published edition of a work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Edition {
    #[serde(deserialize_with = "null_default")]
    pub publishers: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub number_of_pages: i64,
    #[serde(deserialize_with = "null_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_default")]
    pub covers: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    pub local_id: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub physical_format: String,
    #[serde(deserialize_with = "null_default")]
    pub last_modified: TypedValue,
    #[serde(deserialize_with = "null_default")]
    pub latest_revision: i64,
    #[serde(deserialize_with = "null_default")]
    pub key: String,
    #[serde(deserialize_with = "null_default")]
    pub source_records: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub identifiers: EditionIdentifiers,
    #[serde(deserialize_with = "null_default")]
    pub created: TypedValue,
    #[serde(deserialize_with = "null_default")]
    pub isbn_13: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub isbn_10: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub publish_date: String,
    #[serde(deserialize_with = "null_default")]
    pub works: Vec<KeyRef>,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: KeyRef,
    #[serde(deserialize_with = "null_default")]
    pub revision: i64,
}

/// Pagination links on an editions page. Absent links are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditionLinks {
    #[serde(rename = "self", deserialize_with = "null_default")]
    pub self_link: String,
    #[serde(deserialize_with = "null_default")]
    pub work: String,
    #[serde(deserialize_with = "null_default")]
    pub next: String,
    #[serde(deserialize_with = "null_default")]
    pub prev: String,
}

/// Envelope returned by `/works/{id}/editions.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditionsResponse {
    #[serde(deserialize_with = "null_default")]
    pub entries: Vec<Edition>,
    #[serde(deserialize_with = "null_default")]
    pub links: EditionLinks,
    #[serde(deserialize_with = "null_default")]
    pub size: i64,
}
