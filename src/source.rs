//! Dataset loading.
//!
//! The data-fetch step runs outside this crate and leaves a JSON file
//! behind. Three shapes are accepted:
//!
//! ```text
//! [ {"id": "1", "title": "...", "body": {"value": "..."}} , ... ]     flat items
//! {"data": [ {"id": "1", "type": "node--article",
//!             "attributes": {"title": "...", "body": {...}}} ]}        JSON:API document
//! {"data": [...], "totalPages": 3, "totalItems": 25, "itemsPerPage": 10}   listing
//! ```
//!
//! Flat items and JSON:API documents are paginated with the configured page
//! size. A listing carries its own counts, which are validated as-is.

use log::info;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::paginator::PaginatorError;
use crate::types::{Item, Listing, PathField, TextField};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Pagination(#[from] PaginatorError),
    #[error("Unrecognized dataset: {0}")]
    Shape(String),
}

/// A JSON:API resource object.
#[derive(Debug, Deserialize)]
struct Resource {
    id: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<TextField>,
    #[serde(default)]
    path: Option<PathField>,
}

impl From<Resource> for Item {
    fn from(resource: Resource) -> Self {
        Item {
            id: resource.id,
            title: resource.attributes.title,
            body: resource.attributes.body,
            kind: resource.kind,
            path: resource.attributes.path,
        }
    }
}

/// Read and parse a dataset file.
pub fn load_listing(path: &Path, items_per_page: usize) -> Result<Listing, SourceError> {
    let content = fs::read_to_string(path)?;
    let listing = parse_listing(&content, items_per_page)?;
    info!(
        "loaded {} items ({} pages) from {}",
        listing.total_items,
        listing.total_pages,
        path.display()
    );
    Ok(listing)
}

/// Parse a dataset from a JSON string.
pub fn parse_listing(json: &str, items_per_page: usize) -> Result<Listing, SourceError> {
    let value: Value = serde_json::from_str(json)?;
    if value.get("totalItems").is_some() {
        let listing: Listing = serde_json::from_value(value)?;
        listing.validate()?;
        return Ok(listing);
    }
    match value {
        Value::Array(entries) => Ok(Listing::new(parse_items(entries)?, items_per_page)?),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(entries)) => Ok(Listing::new(parse_items(entries)?, items_per_page)?),
            Some(_) => Err(SourceError::Shape("`data` must be an array".into())),
            None => Err(SourceError::Shape("object without a `data` member".into())),
        },
        _ => Err(SourceError::Shape(
            "expected an array of items or a JSON:API document".into(),
        )),
    }
}

/// Parse entries, accepting both flat items and JSON:API resources.
fn parse_items(entries: Vec<Value>) -> Result<Vec<Item>, SourceError> {
    entries
        .into_iter()
        .map(|entry| {
            let item = if entry.get("attributes").is_some() {
                serde_json::from_value::<Resource>(entry)?.into()
            } else {
                serde_json::from_value::<Item>(entry)?
            };
            Ok(item)
        })
        .collect()
}
