//! # Decoupled Pager
//!
//! Paginated listing pages for content pulled from a headless Drupal site.
//! The whole dataset is fetched once; every page, every page button and
//! every navigation step is computed from that in-memory copy.
//!
//! # Architecture: Fetch Once, Paginate Locally
//!
//! ```text
//! 1. Source     items.json  →  Listing          (dataset + page counts)
//! 2. Paginator  Listing     →  page, strip      (state machine over events)
//! 3. Generate   Listing     →  dist/            (one HTML file per page)
//! ```
//!
//! The paginator never talks to the CMS. Changing page only slices the
//! dataset again and, when routing is on, records the new page in the URL
//! with a shallow push so the data step does not run a second time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Item`, `Listing` and `PaginationMeta`: the input contract |
//! | [`source`] | Loads a dataset file (flat items, JSON:API document, or listing) |
//! | [`paginator`] | Page windowing, button-strip layout, routing and viewport seams, the state machine |
//! | [`generate`] | Renders every page of a listing to static HTML using Maud |
//! | [`preview`] | Validates preview-mode requests against the dataset |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting: page views, strips, generate and check summaries |
//!
//! # Design Decisions
//!
//! ## Collaborators Behind Traits
//!
//! The URL and the browser window are outside the paginator's control. They
//! sit behind the [`paginator::Router`] and [`paginator::Viewport`] traits,
//! with in-memory implementations ([`paginator::MemoryRouter`],
//! [`paginator::Window`]) used by the CLI and the tests. A paginator without
//! a router is typed `Paginator<'_, T, Unrouted>` and cannot navigate.
//!
//! ## Scoped Resize Listener
//!
//! Mounting a paginator on a viewport returns a subscription guard that
//! removes the listener when dropped. Unmounting, remounting and dropping the
//! paginator all release it; there is no way to leak one.
//!
//! ## One Layout, Two Viewports
//!
//! The strip is laid out once per state and each control is tagged with the
//! viewports it shows on. The in-memory view filters by the current width;
//! the generated HTML keeps every control and lets a media query at the
//! configured breakpoint apply the tags.

pub mod config;
pub mod generate;
pub mod output;
pub mod paginator;
pub mod preview;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
