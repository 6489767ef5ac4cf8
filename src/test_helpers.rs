//! Shared test utilities for the decoupled-pager test suite.
//!
//! Provides dataset builders and an observer that records paginator changes.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let listing = sample_listing(25, 10);
//! let mut paginator = Paginator::for_listing(&listing, PaginatorOptions::default()).unwrap();
//!
//! let (log, observer) = change_log();
//! paginator.subscribe(observer);
//! paginator.next();
//! assert_eq!(*log.borrow(), vec![Change::Page { from: 1, to: 2 }]);
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::paginator::Change;
use crate::types::{Item, Listing};

// =========================================================================
// Datasets
// =========================================================================

/// `1..=n`, for tests that only care about positions.
pub fn numbered(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

/// `n` articles titled `Item 1` through `Item n`, each with a short body and
/// an alias under `/articles/`.
pub fn sample_items(n: usize) -> Vec<Item> {
    (1..=n)
        .map(|i| {
            Item::new(i.to_string())
                .with_title(format!("Item {i}"))
                .with_body(format!("<p>Body of item {i}</p>"))
                .with_kind("node--article")
                .with_alias(format!("/articles/item-{i}"))
        })
        .collect()
}

/// A consistent listing of [`sample_items`].
pub fn sample_listing(total_items: usize, items_per_page: usize) -> Listing {
    Listing::new(sample_items(total_items), items_per_page)
        .unwrap_or_else(|e| panic!("bad sample listing: {e}"))
}

/// Path of a file under `fixtures/`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

// =========================================================================
// Observers
// =========================================================================

/// An observer that appends every change to a shared log.
pub fn change_log() -> (Rc<RefCell<Vec<Change>>>, impl FnMut(&Change) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |change: &Change| sink.borrow_mut().push(*change))
}
