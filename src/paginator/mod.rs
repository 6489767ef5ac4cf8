//! Client-side pagination of a fully fetched dataset.
//!
//! The dataset is fetched once, so paging never goes back to the CMS: the
//! paginator slices the current page out of memory, lays out a page-button
//! strip whose middle range collapses behind an expander, and mirrors the
//! current page into the URL through a shallow navigation.
//!
//! | Module | Role |
//! |--------|------|
//! | [`window`] | Pure page math: counts, slice bounds, offsets, query parsing |
//! | [`layout`] | Button strip with the collapsible middle range |
//! | [`router`] | Routing collaborator and route-prefix handling |
//! | [`viewport`] | Viewport collaborator with scoped resize subscriptions |
//! | `state` | The [`Paginator`] state machine tying them together |

use thiserror::Error;

pub mod layout;
pub mod router;
mod state;
pub mod viewport;
pub mod window;

pub use layout::{BreakSettings, ButtonStrip, Control, EXPANDER_LABEL, Visibility};
pub use router::{MemoryRouter, NavigationError, Router, page_path, route_prefix};
pub use state::{
    Change, NavEvent, Observer, PaginationState, Paginator, PaginatorOptions, Unrouted,
};
pub use viewport::{
    DEFAULT_BREAKPOINT, ResizeListener, ResizeSubscription, Viewport, ViewportClass, Window,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginatorError {
    #[error("Invalid pagination config: {0}")]
    InvalidPaginationConfig(String),
    #[error("Unknown navigation event: {0}")]
    UnknownEvent(String),
}
