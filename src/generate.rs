//! HTML site generation.
//!
//! Renders every page of a listing ahead of time, the way a statically
//! generated front-end would: one page per page number plus the bare route,
//! which shows page 1.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! └── examples/pagination/
//!     ├── index.html          # bare route, page 1
//!     ├── 1/index.html
//!     ├── 2/index.html
//!     └── ...
//! ```
//!
//! ## Page Layout
//!
//! - "Page n/total" counter
//! - one `<article>` per item: title and a plain-text body excerpt
//! - the navigation strip (back, page links, "…" expander, next), omitted
//!   for single-page listings
//!
//! Every strip control is emitted; collapsed page links carry
//! `narrow-only` and the expander carries `wide-only`, and a media query at
//! the configured breakpoint hides whichever does not apply. A small script
//! makes the expander reveal more links in place.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::paginator::{
    ButtonStrip, Control, EXPANDER_LABEL, Paginator, PaginatorError, Visibility, page_path,
    route_prefix,
};
use crate::types::{Item, Listing};
use log::info;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Pagination(#[from] PaginatorError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/pager.js");

/// One written page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Page number shown, 1-based.
    pub page: usize,
    /// Output file relative to the output directory.
    pub path: PathBuf,
    /// Number of items on the page.
    pub items: usize,
}

/// Summary of a generate run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub route_prefix: String,
    pub total_items: usize,
    pub total_pages: usize,
    pub pages: Vec<GeneratedPage>,
}

pub fn generate(
    listing: &Listing,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let mut paginator = Paginator::for_listing(listing, config.pagination.options())?;
    let prefix = route_prefix(&config.site.route);
    let route_dir = output_dir.join(prefix.trim_start_matches('/'));
    fs::create_dir_all(&route_dir)?;

    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_breakpoint_css(config.pagination.breakpoint),
        CSS_STATIC
    );

    let mut pages = Vec::with_capacity(listing.total_pages + 1);

    // Bare route shows page 1
    let bare_html = render_listing_page(&paginator, config, &css);
    let bare_path = route_dir.join("index.html");
    fs::write(&bare_path, bare_html.into_string())?;
    pages.push(GeneratedPage {
        page: 1,
        path: relative_to(&bare_path, output_dir),
        items: paginator.current_items().len(),
    });

    for page in 1..=listing.total_pages {
        paginator.go_to(page);
        let page_dir = route_dir.join(page.to_string());
        fs::create_dir_all(&page_dir)?;

        let page_html = render_listing_page(&paginator, config, &css);
        let page_path = page_dir.join("index.html");
        fs::write(&page_path, page_html.into_string())?;
        pages.push(GeneratedPage {
            page,
            path: relative_to(&page_path, output_dir),
            items: paginator.current_items().len(),
        });
    }

    info!(
        "generated {} pages for {} at {}",
        pages.len(),
        prefix,
        output_dir.display()
    );

    Ok(GenerateReport {
        route_prefix: prefix.to_string(),
        total_items: listing.total_items,
        total_pages: listing.total_pages,
        pages,
    })
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}

// ============================================================================
// Text helpers
// ============================================================================

/// Strip HTML tags from a string (simple angle-bracket stripping).
pub fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Plain-text excerpt: tags stripped, at most `max` characters, then `...`.
pub fn excerpt(body: &str, max: usize) -> String {
    let text = strip_html_tags(body);
    let cut: String = text.trim().chars().take(max).collect();
    format!("{cut}...")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, description: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders one item of the current page
fn render_item(item: &Item, excerpt_length: usize) -> Markup {
    html! {
        article data-id=(item.id) {
            @if let Some(title) = &item.title {
                h2 { (title) }
            }
            @if let Some(body) = item.body_text() {
                p.excerpt { (excerpt(body, excerpt_length)) }
            }
        }
    }
}

/// Renders the navigation strip
pub fn render_strip(
    strip: &ButtonStrip,
    route: &str,
    current_page: usize,
    total_pages: usize,
    break_start: usize,
    config: &SiteConfig,
) -> Markup {
    html! {
        @if !strip.is_empty() {
            nav.pager aria-label="Pagination"
                data-total-pages=(total_pages)
                data-break-start=(break_start)
                data-break-end=(config.pagination.break_end)
                data-break-add=(config.pagination.break_add) {
                @for control in &strip.controls {
                    (render_control(control, route, current_page))
                }
            }
        }
    }
}

fn render_control(control: &Control, route: &str, current_page: usize) -> Markup {
    match *control {
        Control::Back { disabled: true } => html! {
            button.pager-back type="button" disabled aria-label="Previous page" { "<" }
        },
        Control::Back { disabled: false } => html! {
            a.pager-back href=(page_path(route, current_page - 1)) rel="prev" aria-label="Previous page" { "<" }
        },
        Control::Page {
            number,
            active,
            visibility,
        } => {
            let narrow_only = visibility == Visibility::NarrowOnly;
            html! {
                a.pager-page.active[active].narrow-only[narrow_only]
                    href=(page_path(route, number))
                    data-page=(number)
                    aria-current=[active.then_some("page")] {
                    (number)
                }
            }
        }
        Control::Expander => html! {
            button.pager-expander.wide-only type="button" aria-label="Show more pages" { (EXPANDER_LABEL) }
        },
        Control::Next { disabled: true } => html! {
            button.pager-next type="button" disabled aria-label="Next page" { ">" }
        },
        Control::Next { disabled: false } => html! {
            a.pager-next href=(page_path(route, current_page + 1)) rel="next" aria-label="Next page" { ">" }
        },
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a listing page for the paginator's current page
pub fn render_listing_page(paginator: &Paginator<'_, Item>, config: &SiteConfig, css: &str) -> Markup {
    let state = paginator.state();
    let content = html! {
        main.listing-page {
            h1 { (config.site.title) }
            h3.page-counter { (paginator.label()) }
            section.items {
                @for item in paginator.current_items() {
                    (render_item(item, config.listing.excerpt_length))
                }
            }
            div.pager-dock {
                (render_strip(
                    &paginator.strip(),
                    &config.site.route,
                    state.current_page,
                    paginator.total_pages(),
                    state.break_start,
                    config,
                ))
            }
        }
    };

    let title = format!("{} - {}", config.site.title, paginator.label());
    base_document(&title, &config.site.description, css, content)
}

// ============================================================================
// Tests
// ============================================================================
