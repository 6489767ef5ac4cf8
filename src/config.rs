//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! merged on top of the stock defaults, so a config file only needs the keys
//! it wants to change. Unknown keys are rejected.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Pagination example"
//! description = "Paginated content from a headless Drupal site"
//! route = "/examples/pagination/[[...page]]"  # catch-all stripped for page URLs
//!
//! [pagination]
//! items_per_page = 10
//! break_start = 6       # last page shown before the "…" expander
//! break_end = 12        # first page shown after the expander
//! break_add = 6         # pages revealed per expander click
//! breakpoint = 768      # narrower viewports show the collapsed pages
//! routing = true        # mirror the current page into the URL
//!
//! [listing]
//! excerpt_length = 150  # body characters shown per item
//!
//! [preview]
//! secret_env = "PREVIEW_SECRET"  # env var holding the preview secret
//! # default_locale = "en"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#64748b"
//! border = "#000000"
//! hover = "#93c5fd"
//! active = "#1d4ed8"
//! disabled = "#6b7280"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! # ...same keys as light
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::paginator::{BreakSettings, PaginatorOptions};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title, description, and route pattern.
    pub site: SiteSettings,
    /// Page size and expander/breakpoint tuning.
    pub pagination: PaginationConfig,
    /// Item rendering settings.
    pub listing: ListingConfig,
    /// Preview-mode settings.
    pub preview: PreviewConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.items_per_page == 0 {
            return Err(ConfigError::Validation(
                "pagination.items_per_page must be greater than zero".into(),
            ));
        }
        if self.pagination.break_start == 0 {
            return Err(ConfigError::Validation(
                "pagination.break_start must be at least 1".into(),
            ));
        }
        if self.pagination.break_add == 0 {
            return Err(ConfigError::Validation(
                "pagination.break_add must be at least 1".into(),
            ));
        }
        if self.pagination.breakpoint == 0 {
            return Err(ConfigError::Validation(
                "pagination.breakpoint must be greater than zero".into(),
            ));
        }
        if self.listing.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "listing.excerpt_length must be greater than zero".into(),
            ));
        }
        if !self.site.route.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.route must start with '/'".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
    /// Route pattern of the listing page. A trailing catch-all segment
    /// (`[[...page]]`) is stripped when building page URLs.
    pub route: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Pagination example".to_string(),
            description: "Paginated content from a headless Drupal site".to_string(),
            route: "/examples/pagination/[[...page]]".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub items_per_page: usize,
    pub break_start: usize,
    pub break_end: usize,
    pub break_add: usize,
    pub breakpoint: u32,
    pub routing: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        let breaks = BreakSettings::default();
        let options = PaginatorOptions::default();
        Self {
            items_per_page: 10,
            break_start: breaks.start,
            break_end: breaks.end,
            break_add: breaks.add,
            breakpoint: options.breakpoint,
            routing: true,
        }
    }
}

impl PaginationConfig {
    pub fn options(&self) -> PaginatorOptions {
        PaginatorOptions {
            breaks: BreakSettings {
                start: self.break_start,
                end: self.break_end,
                add: self.break_add,
            },
            breakpoint: self.breakpoint,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Body characters shown per item before the `...` marker.
    pub excerpt_length: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            excerpt_length: 150,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Environment variable holding the shared preview secret.
    pub secret_env: String,
    /// Locale prefix used in content paths, e.g. `en` for `/en/articles/x`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            secret_env: "PREVIEW_SECRET".to_string(),
            default_locale: None,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Page counter and excerpts.
    pub text_muted: String,
    /// Button outlines.
    pub border: String,
    /// Button hover background.
    pub hover: String,
    /// Outline of the current page button.
    pub active: String,
    /// Background of disabled back/next buttons.
    pub disabled: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#000000".to_string(),
            hover: "#93c5fd".to_string(),
            active: "#1d4ed8".to_string(),
            disabled: "#6b7280".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#e5e7eb".to_string(),
            hover: "#1e3a8a".to_string(),
            active: "#60a5fa".to_string(),
            disabled: "#374151".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# decoupled-pager configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
title = "Pagination example"
description = "Paginated content from a headless Drupal site"

# Route pattern of the listing page. A trailing catch-all segment such as
# [[...page]] is stripped, and page numbers are appended: /examples/pagination/3
route = "/examples/pagination/[[...page]]"

# ---------------------------------------------------------------------------
# Pagination
# ---------------------------------------------------------------------------
[pagination]
items_per_page = 10

# Long strips collapse the pages between break_start and break_end behind
# a "…" button. Each click on "…" moves break_start forward by break_add.
break_start = 6
break_end = 12
break_add = 6

# Viewports narrower than this (in CSS pixels) show the collapsed pages.
breakpoint = 768

# Mirror the current page into the URL with shallow navigation.
routing = true

# ---------------------------------------------------------------------------
# Listing
# ---------------------------------------------------------------------------
[listing]
# Body characters shown per item, HTML stripped, followed by "...".
excerpt_length = 150

# ---------------------------------------------------------------------------
# Preview mode
# ---------------------------------------------------------------------------
[preview]
# Environment variable holding the secret shared with the CMS.
secret_env = "PREVIEW_SECRET"

# Locale prefix of content paths on multilingual sites (/en/articles/x).
# default_locale = "en"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#64748b"    # Page counter, excerpts
border = "#000000"        # Button outlines
hover = "#93c5fd"
active = "#1d4ed8"        # Current page outline
disabled = "#6b7280"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#94a3b8"
border = "#e5e7eb"
hover = "#1e3a8a"
active = "#60a5fa"
disabled = "#374151"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_variables(&colors.light, "    "),
        dark = scheme_variables(&colors.dark, "        "),
    )
}

fn scheme_variables(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("hover", &scheme.hover),
        ("active", &scheme.active),
        ("disabled", &scheme.disabled),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Generate the media query that applies strip visibility tags.
pub fn generate_breakpoint_css(breakpoint: u32) -> String {
    format!(
        r#"@media (max-width: {max}px) {{
    .pager .wide-only {{ display: none; }}
}}

@media (min-width: {breakpoint}px) {{
    .pager .narrow-only {{ display: none; }}
}}"#,
        max = breakpoint.saturating_sub(1),
    )
}
