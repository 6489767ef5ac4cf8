//! Preview-mode request validation.
//!
//! The CMS links editors to a preview endpoint carrying a shared secret and
//! the slug of the content being edited. A request is granted when the
//! secret matches and the slug resolves to an item of the dataset; the
//! grant carries the preview data to store and the path to redirect to.
//!
//! Slugs look like `/articles/my-post` or, on multilingual sites,
//! `/en/articles/my-post`. The first part names the content type in plural
//! form: `articles` resolves to the `node--article` resource type.

use serde_json::{Value, json};
use thiserror::Error;

use crate::types::Item;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Malformed slug: {0}")]
    MalformedSlug(String),
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),
}

/// Query parameters of a preview request.
#[derive(Debug, Clone, Default)]
pub struct PreviewRequest {
    pub secret: Option<String>,
    pub slug: Option<String>,
    pub resource_version_id: Option<String>,
    pub key: Option<String>,
}

/// Server-side preview settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewSettings<'a> {
    /// Expected secret. `None` disables preview entirely.
    pub secret: Option<&'a str>,
    pub default_locale: Option<&'a str>,
}

/// Data stored with the preview session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewData {
    ResourceVersion(String),
    Key(String),
    Empty,
}

impl PreviewData {
    pub fn to_json(&self) -> Value {
        match self {
            PreviewData::ResourceVersion(id) => json!({ "resourceVersionId": id }),
            PreviewData::Key(key) => json!({ "key": key }),
            PreviewData::Empty => json!({}),
        }
    }
}

/// A granted preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewGrant {
    pub data: PreviewData,
    pub resource_type: String,
    pub item_id: String,
    /// Path alias of the previewed item.
    pub redirect: String,
}

/// Resolved parts of a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugTarget {
    /// `node--<singular type>`.
    pub resource_type: String,
    /// Slug without its locale prefix.
    pub path: String,
}

/// Split a slug into resource type and locale-free path.
pub fn resolve_slug(slug: &str, default_locale: Option<&str>) -> Option<SlugTarget> {
    let rest = default_locale
        .and_then(|locale| slug.strip_prefix(&format!("/{locale}/")))
        .or_else(|| slug.strip_prefix('/'))?;
    let (object, _) = rest.rsplit_once('/')?;
    if object.is_empty() {
        return None;
    }
    let object = object.strip_suffix('s').unwrap_or(object);
    Some(SlugTarget {
        resource_type: format!("node--{object}"),
        path: format!("/{rest}"),
    })
}

/// Validate a preview request against the dataset.
pub fn enable_preview(
    request: &PreviewRequest,
    settings: &PreviewSettings<'_>,
    items: &[Item],
) -> Result<PreviewGrant, PreviewError> {
    let (Some(expected), Some(given)) = (settings.secret, request.secret.as_deref()) else {
        return Err(PreviewError::InvalidToken);
    };
    if expected != given {
        return Err(PreviewError::InvalidToken);
    }
    let slug = match request.slug.as_deref() {
        Some(slug) if !slug.is_empty() => slug,
        _ => return Err(PreviewError::InvalidToken),
    };

    let target = resolve_slug(slug, settings.default_locale)
        .ok_or_else(|| PreviewError::MalformedSlug(slug.to_string()))?;

    let item = items
        .iter()
        .find(|item| {
            item.kind.as_deref() == Some(target.resource_type.as_str())
                && item.alias() == Some(target.path.as_str())
        })
        .ok_or_else(|| PreviewError::InvalidSlug(slug.to_string()))?;

    let data = if let Some(id) = &request.resource_version_id {
        PreviewData::ResourceVersion(id.clone())
    } else if let Some(key) = &request.key {
        PreviewData::Key(key.clone())
    } else {
        PreviewData::Empty
    };

    Ok(PreviewGrant {
        data,
        resource_type: target.resource_type,
        item_id: item.id.clone(),
        redirect: target.path,
    })
}
