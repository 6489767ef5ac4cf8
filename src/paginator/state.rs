//! Paginator state machine.
//!
//! The paginator borrows the dataset and owns everything else: the current
//! page, the derived offset, the expander position and the last known
//! viewport width. State only changes through [`Paginator::handle`] (or the
//! named shortcuts) and through resize notifications once mounted. Every
//! effective change is reported to the registered observers, which is how a
//! view knows to re-render.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, warn};

use super::PaginatorError;
use super::layout::{self, BreakSettings, ButtonStrip, Control};
use super::router::{self, NavigationError, Router};
use super::viewport::{DEFAULT_BREAKPOINT, ResizeSubscription, Viewport, ViewportClass};
use super::window;
use crate::types::{Item, Listing, PaginationMeta};

/// Tunables that do not come from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatorOptions {
    pub breaks: BreakSettings,
    /// Widths below this use the narrow layout.
    pub breakpoint: u32,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            breaks: BreakSettings::default(),
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }
}

impl PaginatorOptions {
    pub fn validate(&self) -> Result<(), PaginatorError> {
        if self.breaks.start == 0 {
            return Err(PaginatorError::InvalidPaginationConfig(
                "break_start must be at least 1".into(),
            ));
        }
        if self.breaks.add == 0 {
            return Err(PaginatorError::InvalidPaginationConfig(
                "break_add must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Snapshot of the paginator's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub offset: usize,
    pub break_start: usize,
    pub viewport_width: Option<u32>,
}

/// A user or host trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Next,
    Back,
    Page(usize),
    Expand,
}

impl FromStr for NavEvent {
    type Err = PaginatorError;

    /// Accepts `next`/`>`, `back`/`prev`/`<`, `expand`/`...`/`…`, or a page number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "next" | ">" => Ok(NavEvent::Next),
            "back" | "prev" | "<" => Ok(NavEvent::Back),
            "expand" | "..." | layout::EXPANDER_LABEL => Ok(NavEvent::Expand),
            other => other
                .parse::<usize>()
                .map(NavEvent::Page)
                .map_err(|_| PaginatorError::UnknownEvent(other.to_string())),
        }
    }
}

/// What changed, as delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Page { from: usize, to: usize },
    Expanded { break_start: usize },
    Resized { width: u32 },
}

pub type Observer = Box<dyn FnMut(&Change)>;

type Observers = Rc<RefCell<Vec<Observer>>>;

fn notify(observers: &Observers, change: &Change) {
    for observer in observers.borrow_mut().iter_mut() {
        observer(change);
    }
}

/// Router type for paginators that do not touch the URL.
#[derive(Debug, Clone, Copy)]
pub enum Unrouted {}

impl Router for Unrouted {
    fn pathname(&self) -> &str {
        match *self {}
    }

    fn query_page(&self) -> Option<&str> {
        match *self {}
    }

    fn shallow_push(&mut self, _path: &str) -> Result<(), NavigationError> {
        match *self {}
    }
}

/// Client-side paginator over a fully fetched dataset.
pub struct Paginator<'a, T, R = Unrouted> {
    items: &'a [T],
    meta: PaginationMeta,
    options: PaginatorOptions,
    router: Option<R>,
    current_page: usize,
    offset: usize,
    break_start: usize,
    width: Rc<Cell<Option<u32>>>,
    observers: Observers,
    resize: Option<ResizeSubscription>,
}

impl<'a, T> Paginator<'a, T, Unrouted> {
    /// Paginate `items`, starting on page 1 with routing disabled.
    pub fn new(
        items: &'a [T],
        items_per_page: usize,
        options: PaginatorOptions,
    ) -> Result<Self, PaginatorError> {
        options.validate()?;
        let meta = PaginationMeta::new(items.len(), items_per_page)?;
        Ok(Self {
            items,
            meta,
            options,
            router: None,
            current_page: 1,
            offset: 0,
            break_start: options.breaks.start,
            width: Rc::new(Cell::new(None)),
            observers: Rc::new(RefCell::new(Vec::new())),
            resize: None,
        })
    }
}

impl<'a> Paginator<'a, Item, Unrouted> {
    /// Paginate a listing after checking its counts.
    pub fn for_listing(
        listing: &'a Listing,
        options: PaginatorOptions,
    ) -> Result<Self, PaginatorError> {
        let meta = listing.validate()?;
        Self::new(&listing.data, meta.items_per_page, options)
    }
}

impl<'a, T, R: Router> Paginator<'a, T, R> {
    /// Enable routing. The starting page is taken from the router's page
    /// query and clamped into the valid range.
    pub fn with_router<R2: Router>(self, router: R2) -> Paginator<'a, T, R2> {
        let requested = window::parse_page_query(router.query_page());
        let current_page = window::clamp_page(requested, self.meta.total_pages);
        if current_page != requested {
            warn!(
                "requested page {requested} is outside 1..={}, showing page {current_page}",
                self.meta.total_pages
            );
        }
        Paginator {
            items: self.items,
            meta: self.meta,
            options: self.options,
            router: Some(router),
            current_page,
            offset: window::page_offset(current_page, self.meta.items_per_page, self.meta.total_items),
            break_start: self.break_start,
            width: self.width,
            observers: self.observers,
            resize: self.resize,
        }
    }

    pub fn meta(&self) -> PaginationMeta {
        self.meta
    }

    pub fn options(&self) -> &PaginatorOptions {
        &self.options
    }

    pub fn total_pages(&self) -> usize {
        self.meta.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn state(&self) -> PaginationState {
        PaginationState {
            current_page: self.current_page,
            offset: self.offset,
            break_start: self.break_start,
            viewport_width: self.width.get(),
        }
    }

    pub fn router(&self) -> Option<&R> {
        self.router.as_ref()
    }

    pub fn is_routed(&self) -> bool {
        self.router.is_some()
    }

    /// `Page n/total` heading text.
    pub fn label(&self) -> String {
        format!("Page {}/{}", self.current_page, self.meta.total_pages)
    }

    /// Items on the current page.
    pub fn current_items(&self) -> &'a [T] {
        window::page_slice(self.items, self.meta.items_per_page, self.current_page)
    }

    pub fn can_go_back(&self) -> bool {
        window::can_go_back(self.offset)
    }

    pub fn can_go_next(&self) -> bool {
        window::can_go_next(self.offset, self.meta.items_per_page, self.meta.total_items)
    }

    pub fn viewport_class(&self) -> ViewportClass {
        ViewportClass::from_width(self.width.get(), self.options.breakpoint)
    }

    /// Full strip with visibility tags for every viewport.
    pub fn strip(&self) -> ButtonStrip {
        layout::layout_strip(
            self.meta.total_pages,
            self.current_page,
            self.break_start,
            &self.options.breaks,
            self.can_go_back(),
            self.can_go_next(),
        )
    }

    /// Controls shown on the current viewport.
    pub fn visible_controls(&self) -> Vec<Control> {
        let class = self.viewport_class();
        self.strip().visible(class).copied().collect()
    }

    /// Register an observer for every later change.
    pub fn subscribe(&mut self, observer: impl FnMut(&Change) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Apply an event. Returns whether the state changed.
    pub fn handle(&mut self, event: NavEvent) -> bool {
        match event {
            NavEvent::Next => self.next(),
            NavEvent::Back => self.back(),
            NavEvent::Page(page) => self.go_to(page),
            NavEvent::Expand => self.expand(),
        }
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            debug!("next ignored on page {}", self.current_page);
            return false;
        }
        let to = (self.current_page + 1).min(self.meta.total_pages);
        self.set_page(to)
    }

    pub fn back(&mut self) -> bool {
        if self.current_page <= 1 {
            debug!("back ignored on first page");
            return false;
        }
        self.set_page(self.current_page - 1)
    }

    /// Jump to `page`. Pages outside `1..=total_pages` are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page == 0 || page > self.meta.total_pages {
            debug!(
                "page {page} ignored, listing has {} pages",
                self.meta.total_pages
            );
            return false;
        }
        self.set_page(page)
    }

    /// Reveal the next window of collapsed pages.
    pub fn expand(&mut self) -> bool {
        if !layout::is_collapsing(self.meta.total_pages, self.break_start, &self.options.breaks) {
            debug!("expand ignored, nothing collapsed");
            return false;
        }
        self.break_start += self.options.breaks.add;
        debug!("break_start advanced to {}", self.break_start);
        notify(
            &self.observers,
            &Change::Expanded {
                break_start: self.break_start,
            },
        );
        true
    }

    fn set_page(&mut self, to: usize) -> bool {
        let from = self.current_page;
        if from == to {
            return false;
        }
        self.current_page = to;
        self.offset =
            window::page_offset(to, self.meta.items_per_page, self.meta.total_items);
        debug!("page {from} -> {to}, offset {}", self.offset);

        if let Some(router) = self.router.as_mut() {
            let path = router::page_path(router.pathname(), to);
            if let Err(err) = router.shallow_push(&path) {
                warn!("shallow navigation failed, keeping page {to}: {err}");
            }
        }

        notify(&self.observers, &Change::Page { from, to });
        true
    }

    /// Capture the viewport width and follow resizes until unmounted or dropped.
    pub fn mount(&mut self, viewport: &impl Viewport) {
        self.unmount();

        let initial = viewport.inner_width();
        self.width.set(Some(initial));

        let width = Rc::clone(&self.width);
        let observers = Rc::clone(&self.observers);
        self.resize = Some(viewport.on_resize(Box::new(move |w| {
            width.set(Some(w));
            notify(&observers, &Change::Resized { width: w });
        })));

        notify(&self.observers, &Change::Resized { width: initial });
    }

    /// Release the resize subscription. The last known width is kept.
    pub fn unmount(&mut self) {
        self.resize = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.resize.is_some()
    }
}
