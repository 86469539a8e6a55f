//! Decoding of amoCRM's `_embedded` collection envelopes.
//!
//! Every list response looks like
//!
//! ```json
//! {
//!   "_page": 1,
//!   "_links": { "self": { "href": "..." }, "next": { "href": "..." } },
//!   "_embedded": { "leads": [ ... ] }
//! }
//! ```
//!
//! with a collection key that varies per resource (`leads`, `elements`,
//! `access_rights`, `unsorted`, ...). A missing `_embedded` object or a
//! missing collection key is an empty collection, not an error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::pagination::Page;

/// A decoded list envelope.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub items: Vec<T>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_items: Option<u64>,
    /// Whether `_links.next` was present. `None` when there was no `_links`.
    pub has_next: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default, rename = "_page")]
    underscored_page: Option<u32>,
    #[serde(default)]
    per_page: Option<u32>,
    #[serde(default, rename = "_total_items")]
    total_items: Option<u64>,
    #[serde(default, rename = "_links")]
    links: Option<Map<String, Value>>,
    #[serde(default, rename = "_embedded")]
    embedded: Option<Map<String, Value>>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode `body`, taking the array under `_embedded.<collection>`.
    pub fn decode(body: &[u8], collection: &str) -> Result<Self> {
        let raw: RawEnvelope = serde_json::from_slice(body)?;
        let items = match raw.embedded.and_then(|mut e| e.remove(collection)) {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => serde_json::from_value(value)?,
        };
        Ok(Self {
            items,
            page: raw.underscored_page.or(raw.page),
            per_page: raw.per_page,
            total_items: raw.total_items,
            has_next: raw.links.map(|l| l.contains_key("next")),
        })
    }

    /// Convert into a [`Page`], falling back to the requested paging when
    /// the server did not echo it.
    pub fn into_page(self, page: u32, per_page: u32) -> Page<T> {
        Page::new(
            self.items,
            self.page.unwrap_or(page),
            self.per_page.unwrap_or(per_page),
            self.total_items,
            self.has_next,
        )
    }
}

/// Decode just the collection.
pub fn decode_list<T: DeserializeOwned>(body: &[u8], collection: &str) -> Result<Vec<T>> {
    Envelope::decode(body, collection).map(|e| e.items)
}

/// Decode into a [`Page`].
pub fn decode_page<T: DeserializeOwned>(
    body: &[u8],
    collection: &str,
    page: u32,
    per_page: u32,
) -> Result<Page<T>> {
    Envelope::decode(body, collection).map(|e| e.into_page(page, per_page))
}
