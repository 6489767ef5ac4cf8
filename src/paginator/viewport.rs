//! Viewport collaborator: current width plus resize notifications.
//!
//! Subscriptions are guards. A [`ResizeSubscription`] removes its listener
//! when dropped, so a paginator that goes away never leaves a listener
//! registered on the window.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;

/// Width below which the strip switches to its narrow layout.
pub const DEFAULT_BREAKPOINT: u32 = 768;

/// Coarse viewport class used by the layout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Wide,
    Narrow,
}

impl ViewportClass {
    /// Classify a width. An unknown width (not mounted yet) counts as wide.
    pub fn from_width(width: Option<u32>, breakpoint: u32) -> Self {
        match width {
            Some(w) if w < breakpoint => ViewportClass::Narrow,
            _ => ViewportClass::Wide,
        }
    }
}

/// Callback invoked with the new inner width.
pub type ResizeListener = Box<dyn FnMut(u32)>;

/// Source of the viewport width.
pub trait Viewport {
    fn inner_width(&self) -> u32;

    /// Register `listener` for resize notifications until the returned
    /// guard is dropped.
    fn on_resize(&self, listener: ResizeListener) -> ResizeSubscription;
}

type ListenerTable = RefCell<Vec<(u64, ResizeListener)>>;

/// Guard for a registered resize listener.
pub struct ResizeSubscription {
    id: u64,
    table: Weak<ListenerTable>,
}

impl ResizeSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl std::fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().retain(|(id, _)| *id != self.id);
            debug!("resize listener {} released", self.id);
        }
    }
}

/// In-process window: holds a width and dispatches resizes to listeners.
///
/// Cloning shares the same window.
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

struct WindowInner {
    width: Cell<u32>,
    next_id: Cell<u64>,
    listeners: Rc<ListenerTable>,
}

impl Window {
    pub fn new(width: u32) -> Self {
        Self {
            inner: Rc::new(WindowInner {
                width: Cell::new(width),
                next_id: Cell::new(0),
                listeners: Rc::new(RefCell::new(Vec::new())),
            }),
        }
    }

    /// Change the width and notify every live listener.
    ///
    /// Listeners must not subscribe or unsubscribe from inside the callback.
    pub fn resize(&self, width: u32) {
        self.inner.width.set(width);
        let mut listeners = self.inner.listeners.borrow_mut();
        debug!("window resized to {width}, {} listeners", listeners.len());
        for (_, listener) in listeners.iter_mut() {
            listener(width);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl Viewport for Window {
    fn inner_width(&self) -> u32 {
        self.inner.width.get()
    }

    fn on_resize(&self, listener: ResizeListener) -> ResizeSubscription {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        self.inner.listeners.borrow_mut().push((id, listener));
        ResizeSubscription {
            id,
            table: Rc::downgrade(&self.inner.listeners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_widths() {
        assert_eq!(ViewportClass::from_width(None, 768), ViewportClass::Wide);
        assert_eq!(
            ViewportClass::from_width(Some(767), 768),
            ViewportClass::Narrow
        );
        assert_eq!(
            ViewportClass::from_width(Some(768), 768),
            ViewportClass::Wide
        );
        assert_eq!(
            ViewportClass::from_width(Some(320), 400),
            ViewportClass::Narrow
        );
    }

    #[test]
    fn resize_reaches_listener() {
        let window = Window::new(1024);
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _sub = window.on_resize(Box::new(move |w| sink.set(w)));

        window.resize(500);
        assert_eq!(seen.get(), 500);
        assert_eq!(window.inner_width(), 500);
    }

    #[test]
    fn dropping_guard_unsubscribes() {
        let window = Window::new(1024);
        let calls = Rc::new(Cell::new(0));
        let sink = Rc::clone(&calls);
        let sub = window.on_resize(Box::new(move |_| sink.set(sink.get() + 1)));
        assert_eq!(window.listener_count(), 1);

        window.resize(800);
        drop(sub);
        window.resize(600);

        assert_eq!(calls.get(), 1);
        assert_eq!(window.listener_count(), 0);
    }

    #[test]
    fn guards_are_independent() {
        let window = Window::new(1024);
        let a = window.on_resize(Box::new(|_| {}));
        let b = window.on_resize(Box::new(|_| {}));
        assert_ne!(a.id(), b.id());
        drop(a);
        assert_eq!(window.listener_count(), 1);
        drop(b);
        assert_eq!(window.listener_count(), 0);
    }

    #[test]
    fn guard_outliving_window_is_harmless() {
        let window = Window::new(1024);
        let sub = window.on_resize(Box::new(|_| {}));
        drop(window);
        drop(sub);
    }

    #[test]
    fn clones_share_listeners() {
        let window = Window::new(1024);
        let other = window.clone();
        let _sub = other.on_resize(Box::new(|_| {}));
        assert_eq!(window.listener_count(), 1);
        window.resize(10);
        assert_eq!(other.inner_width(), 10);
    }
}
