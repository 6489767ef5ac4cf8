//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Pages lead with their
//! number and items with their positional index and title; output paths and
//! ids are secondary context. The navigation strip is drawn as text so the
//! layout of a given state can be inspected without a browser.
//!
//! # Output Format
//!
//! ## Show
//!
//! ```text
//! Page 3/20
//! 021 Item 21
//!     Body of item 21...
//! 022 Item 22
//!
//! < 1 2 [3] 4 5 6 … 12 13 14 15 16 17 18 19 20 >
//! ```
//!
//! ## Generate
//!
//! ```text
//! Page 1 → examples/pagination/index.html (10 items)
//! Page 1 → examples/pagination/1/index.html (10 items)
//! Page 2 → examples/pagination/2/index.html (5 items)
//!
//! Generated 2 pages for 15 items at /examples/pagination
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{GenerateReport, excerpt};
use crate::paginator::{
    ButtonStrip, Change, Control, EXPANDER_LABEL, Paginator, Router, ViewportClass,
};
use crate::preview::PreviewGrant;
use crate::types::{Item, Listing, PaginationMeta};

const EXCERPT_PREVIEW: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Item header line: titled items show the title, untitled show the id.
///
/// ```text
/// 001 The Title
/// 002 (6f1c-...)
/// ```
fn item_line(index: usize, item: &Item) -> String {
    match item.title.as_deref() {
        Some(t) if !t.is_empty() => format!("{} {}", format_index(index), t),
        _ => format!("{} ({})", format_index(index), item.id),
    }
}

// ============================================================================
// Strip
// ============================================================================

/// Draw the controls shown on `class` as one line.
///
/// The active page is bracketed; disabled back/next are parenthesized.
pub fn format_strip(strip: &ButtonStrip, class: ViewportClass) -> String {
    strip
        .visible(class)
        .map(|control| match *control {
            Control::Back { disabled: false } => "<".to_string(),
            Control::Back { disabled: true } => "(<)".to_string(),
            Control::Next { disabled: false } => ">".to_string(),
            Control::Next { disabled: true } => "(>)".to_string(),
            Control::Page {
                number,
                active: true,
                ..
            } => format!("[{number}]"),
            Control::Page { number, .. } => number.to_string(),
            Control::Expander => EXPANDER_LABEL.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Show
// ============================================================================

/// Format the current page of a paginator as it would be displayed.
pub fn format_page_view<R: Router>(paginator: &Paginator<'_, Item, R>) -> Vec<String> {
    let mut lines = vec![paginator.label()];
    let first = paginator.state().offset;

    for (i, item) in paginator.current_items().iter().enumerate() {
        lines.push(item_line(first + i + 1, item));
        if let Some(body) = item.body_text() {
            lines.push(format!("    {}", excerpt(body, EXCERPT_PREVIEW)));
        }
    }

    let strip = paginator.strip();
    if !strip.is_empty() {
        lines.push(String::new());
        lines.push(format_strip(&strip, paginator.viewport_class()));
    }
    lines
}

pub fn print_page_view<R: Router>(paginator: &Paginator<'_, Item, R>) {
    for line in format_page_view(paginator) {
        println!("{}", line);
    }
}

/// One line per observed change, as printed while replaying events.
pub fn format_change(change: &Change) -> String {
    match change {
        Change::Page { from, to } => format!("page {from} \u{2192} {to}"),
        Change::Expanded { break_start } => format!("expanded, pages through {break_start} shown"),
        Change::Resized { width } => format!("viewport {width}px"),
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format generate output: one line per written page, then a summary.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| {
            format!(
                "Page {} \u{2192} {} ({} items)",
                page.page,
                page.path.display(),
                page.items
            )
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages for {} items at {}",
        report.total_pages, report.total_items, report.route_prefix
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format dataset statistics.
pub fn format_check_output(listing: &Listing, meta: &PaginationMeta) -> Vec<String> {
    let untitled = listing.data.iter().filter(|i| i.title.is_none()).count();
    let without_body = listing.data.iter().filter(|i| i.body_text().is_none()).count();
    let without_alias = listing.data.iter().filter(|i| i.alias().is_none()).count();

    let mut lines = vec![
        "Dataset".to_string(),
        format!("    Items: {}", meta.total_items),
        format!("    Per page: {}", meta.items_per_page),
        format!("    Pages: {}", meta.total_pages),
    ];
    if untitled > 0 {
        lines.push(format!("    Untitled: {}", untitled));
    }
    if without_body > 0 {
        lines.push(format!("    Without body: {}", without_body));
    }
    if without_alias > 0 {
        lines.push(format!("    Without alias: {}", without_alias));
    }
    lines
}

pub fn print_check_output(listing: &Listing, meta: &PaginationMeta) {
    for line in format_check_output(listing, meta) {
        println!("{}", line);
    }
}

// ============================================================================
// Preview
// ============================================================================

pub fn format_preview_grant(grant: &PreviewGrant) -> Vec<String> {
    vec![
        format!("Preview enabled for {} {}", grant.resource_type, grant.item_id),
        format!("    Data: {}", grant.data.to_json()),
        format!("    Redirect: {}", grant.redirect),
    ]
}

pub fn print_preview_grant(grant: &PreviewGrant) {
    for line in format_preview_grant(grant) {
        println!("{}", line);
    }
}
