//! Cover image URLs for the Open Library covers host.
//!
//! Building a URL never touches the network and never checks that an image
//! exists. An empty string means "no cover".

use std::fmt;

use crate::types::{Author, Doc, Edition};

/// Default host for cover images.
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org";

/// Requested image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CoverSize {
    pub fn code(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The identifier a cover is looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverKey {
    Id(i64),
    Isbn(String),
    Oclc(String),
    Lccn(String),
}

impl CoverKey {
    /// Pick the identifier for a search hit: the key (using the numeric
    /// cover id), then the first ISBN, OCLC and LCCN.
    pub fn for_doc(doc: &Doc) -> Option<CoverKey> {
        if !doc.key.is_empty() {
            return Some(CoverKey::Id(doc.cover_id));
        }
        if let Some(isbn) = doc.isbn.first() {
            return Some(CoverKey::Isbn(isbn.clone()));
        }
        if let Some(oclc) = doc.oclc.first() {
            return Some(CoverKey::Oclc(oclc.clone()));
        }
        doc.lccn.first().map(|lccn| CoverKey::Lccn(lccn.clone()))
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            CoverKey::Id(_) => "id",
            CoverKey::Isbn(_) => "isbn",
            CoverKey::Oclc(_) => "oclc",
            CoverKey::Lccn(_) => "lccn",
        }
    }

    fn value(&self) -> String {
        match self {
            CoverKey::Id(id) => id.to_string(),
            CoverKey::Isbn(v) | CoverKey::Oclc(v) | CoverKey::Lccn(v) => v.clone(),
        }
    }
}

fn image_url(covers_url: &str, category: &str, key: &CoverKey, size: CoverSize) -> String {
    format!(
        "{}/{category}/{}/{}-{size}.jpg",
        covers_url.trim_end_matches('/'),
        key.scheme(),
        key.value()
    )
}

/// Cover URL for a search hit, or `""` when it has no usable identifier.
pub fn cover_url(covers_url: &str, doc: &Doc, size: CoverSize) -> String {
    match CoverKey::for_doc(doc) {
        Some(key) => image_url(covers_url, "b", &key, size),
        None => String::new(),
    }
}

impl Doc {
    /// Cover URL on the default covers host.
    pub fn cover_url(&self, size: CoverSize) -> String {
        cover_url(DEFAULT_COVERS_URL, self, size)
    }
}

/// Cover URL for an edition's first cover id, or `""` if it has none.
pub fn edition_cover_url(covers_url: &str, edition: &Edition, size: CoverSize) -> String {
    match edition.covers.iter().find(|id| **id > 0) {
        Some(id) => image_url(covers_url, "b", &CoverKey::Id(*id), size),
        None => String::new(),
    }
}

/// Photo URL for an author's first photo id, or `""` if it has none.
pub fn author_photo_url(covers_url: &str, author: &Author, size: CoverSize) -> String {
    match author.photos.iter().find(|id| **id > 0) {
        Some(id) => image_url(covers_url, "a", &CoverKey::Id(*id), size),
        None => String::new(),
    }
}
