//! Shared types used across all stages.
//!
//! A [`Listing`] is the input contract handed over by the data-fetch
//! collaborator: the fully materialized dataset plus the pagination counts
//! derived from it. It is serialized as JSON with the camelCase keys the
//! front-end props use (`totalPages`, `totalItems`, `itemsPerPage`).

use serde::{Deserialize, Serialize};

use crate::paginator::PaginatorError;

/// Formatted text field (`body.value` in Drupal JSON:API).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    pub value: String,
}

/// Path alias field (`path.alias` in Drupal JSON:API).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathField {
    #[serde(default)]
    pub alias: Option<String>,
}

/// A single content item. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<TextField>,
    /// JSON:API resource type, e.g. `node--article`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathField>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            body: None,
            kind: None,
            path: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, value: impl Into<String>) -> Self {
        self.body = Some(TextField {
            value: value.into(),
        });
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.path = Some(PathField {
            alias: Some(alias.into()),
        });
        self
    }

    /// Body text if present and non-empty.
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_ref()
            .map(|b| b.value.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn alias(&self) -> Option<&str> {
        self.path.as_ref().and_then(|p| p.alias.as_deref())
    }
}

/// Pagination counts for a dataset.
///
/// `total_pages` is always `ceil(total_items / items_per_page)`; the only way
/// to build one is through [`PaginationMeta::new`] or [`Listing::validate`],
/// both of which reject a zero page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total_items: usize,
    pub items_per_page: usize,
    pub total_pages: usize,
}

impl PaginationMeta {
    pub fn new(total_items: usize, items_per_page: usize) -> Result<Self, PaginatorError> {
        if items_per_page == 0 {
            return Err(PaginatorError::InvalidPaginationConfig(
                "items_per_page must be greater than zero".into(),
            ));
        }
        Ok(Self {
            total_items,
            items_per_page,
            total_pages: total_items.div_ceil(items_per_page),
        })
    }
}

/// Dataset plus pagination counts, as produced by the data-fetch step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub data: Vec<Item>,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

impl Listing {
    /// Build a listing from a fetched dataset, deriving all counts.
    pub fn new(data: Vec<Item>, items_per_page: usize) -> Result<Self, PaginatorError> {
        let meta = PaginationMeta::new(data.len(), items_per_page)?;
        Ok(Self {
            data,
            total_pages: meta.total_pages,
            total_items: meta.total_items,
            items_per_page: meta.items_per_page,
        })
    }

    /// Check that the counts are consistent with each other and the dataset.
    pub fn validate(&self) -> Result<PaginationMeta, PaginatorError> {
        let meta = PaginationMeta::new(self.total_items, self.items_per_page)?;
        if self.total_items != self.data.len() {
            return Err(PaginatorError::InvalidPaginationConfig(format!(
                "totalItems is {} but the dataset holds {} items",
                self.total_items,
                self.data.len()
            )));
        }
        if self.total_pages != meta.total_pages {
            return Err(PaginatorError::InvalidPaginationConfig(format!(
                "totalPages is {} but {} items at {} per page make {} pages",
                self.total_pages, self.total_items, self.items_per_page, meta.total_pages
            )));
        }
        Ok(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_rounds_pages_up() {
        let meta = PaginationMeta::new(95, 10).unwrap();
        assert_eq!(meta.total_pages, 10);
        let meta = PaginationMeta::new(100, 10).unwrap();
        assert_eq!(meta.total_pages, 10);
    }

    #[test]
    fn meta_with_no_items_has_no_pages() {
        let meta = PaginationMeta::new(0, 10).unwrap();
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn meta_rejects_zero_page_size() {
        let result = PaginationMeta::new(10, 0);
        assert!(matches!(
            result,
            Err(PaginatorError::InvalidPaginationConfig(_))
        ));
    }

    #[test]
    fn listing_derives_counts() {
        let items = (0..23).map(|i| Item::new(i.to_string())).collect();
        let listing = Listing::new(items, 10).unwrap();
        assert_eq!(listing.total_items, 23);
        assert_eq!(listing.total_pages, 3);
        assert_eq!(listing.items_per_page, 10);
    }

    #[test]
    fn listing_uses_camel_case_keys() {
        let json = r#"{
            "data": [{"id": "a"}, {"id": "b", "title": "B", "body": {"value": "text"}}],
            "totalPages": 1,
            "totalItems": 2,
            "itemsPerPage": 10
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.data[1].title.as_deref(), Some("B"));
        assert_eq!(listing.data[1].body_text(), Some("text"));
        assert!(listing.validate().is_ok());
    }

    #[test]
    fn validate_rejects_mismatched_item_count() {
        let mut listing = Listing::new(vec![Item::new("a")], 10).unwrap();
        listing.total_items = 5;
        let err = listing.validate().unwrap_err().to_string();
        assert!(err.contains("dataset holds 1"));
    }

    #[test]
    fn validate_rejects_mismatched_page_count() {
        let mut listing = Listing::new(vec![Item::new("a"), Item::new("b")], 1).unwrap();
        listing.total_pages = 3;
        assert!(listing.validate().is_err());
    }

    #[test]
    fn empty_body_is_treated_as_missing() {
        let item = Item::new("a").with_body("");
        assert_eq!(item.body_text(), None);
    }

    #[test]
    fn item_type_field_is_renamed() {
        let item: Item =
            serde_json::from_str(r#"{"id": "1", "type": "node--article", "path": {"alias": "/a"}}"#)
                .unwrap();
        assert_eq!(item.kind.as_deref(), Some("node--article"));
        assert_eq!(item.alias(), Some("/a"));
    }
}
