//! Page-button strip layout with a collapsible middle range.
//!
//! For long listings the strip collapses the pages strictly between
//! `break_start` and `break_end` behind an expander ("…"):
//!
//! ```text
//! 20 pages, break 6/12/6, wide viewport:
//!   <  1 2 3 4 5 6  …  12 13 14 15 16 17 18 19 20  >
//! same strip, narrow viewport:
//!   <  1 2 3 4 5 6 7 8 9 10 11 12 ... 20  >
//! ```
//!
//! Activating the expander grows `break_start` by `break_add`. Collapsing is
//! only in effect while `break_start + break_add < total_pages` and the
//! collapsed range is non-empty; otherwise every page is a plain button.
//!
//! The layout is computed once per state and tagged with a [`Visibility`]
//! per control. The in-memory view filters by the current [`ViewportClass`];
//! the static HTML keeps every control and lets a CSS media query apply the
//! tags.

use super::viewport::ViewportClass;

/// Label of the expander control.
pub const EXPANDER_LABEL: &str = "…";

/// Expander thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakSettings {
    /// Initial `break_start`: the last page shown before the expander.
    pub start: usize,
    /// First page shown again after the expander. Fixed for the strip's life.
    pub end: usize,
    /// How far `break_start` moves each time the expander is activated.
    pub add: usize,
}

impl Default for BreakSettings {
    fn default() -> Self {
        Self {
            start: 6,
            end: 12,
            add: 6,
        }
    }
}

/// Which viewports a control is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Always,
    WideOnly,
    NarrowOnly,
}

impl Visibility {
    pub fn shown_on(self, class: ViewportClass) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::WideOnly => class == ViewportClass::Wide,
            Visibility::NarrowOnly => class == ViewportClass::Narrow,
        }
    }
}

/// One control in the navigation strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Back {
        disabled: bool,
    },
    Page {
        number: usize,
        active: bool,
        visibility: Visibility,
    },
    Expander,
    Next {
        disabled: bool,
    },
}

impl Control {
    pub fn visibility(&self) -> Visibility {
        match self {
            Control::Page { visibility, .. } => *visibility,
            Control::Expander => Visibility::WideOnly,
            Control::Back { .. } | Control::Next { .. } => Visibility::Always,
        }
    }
}

/// The complete navigation strip for one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonStrip {
    pub controls: Vec<Control>,
}

impl ButtonStrip {
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Controls shown on the given viewport, in order.
    pub fn visible(&self, class: ViewportClass) -> impl Iterator<Item = &Control> {
        self.controls
            .iter()
            .filter(move |c| c.visibility().shown_on(class))
    }

    /// Page numbers shown on the given viewport, in order.
    pub fn page_numbers(&self, class: ViewportClass) -> Vec<usize> {
        self.visible(class)
            .filter_map(|c| match c {
                Control::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }

    /// Number of expanders shown on the given viewport.
    pub fn expander_count(&self, class: ViewportClass) -> usize {
        self.visible(class)
            .filter(|c| matches!(c, Control::Expander))
            .count()
    }
}

/// Whether pages are currently collapsed behind an expander.
pub fn is_collapsing(total_pages: usize, break_start: usize, settings: &BreakSettings) -> bool {
    break_start.saturating_add(settings.add) < total_pages
        && break_start.saturating_add(1) < settings.end
}

/// Lay out the page buttons and expander (without back/next).
pub fn layout_pages(
    total_pages: usize,
    current_page: usize,
    break_start: usize,
    settings: &BreakSettings,
) -> Vec<Control> {
    let collapsing = is_collapsing(total_pages, break_start, settings);
    let mut controls = Vec::with_capacity(total_pages + 1);

    for number in 1..=total_pages {
        let hidden_on_wide = collapsing && number > break_start && number < settings.end;
        controls.push(Control::Page {
            number,
            active: number == current_page,
            visibility: if hidden_on_wide {
                Visibility::NarrowOnly
            } else {
                Visibility::Always
            },
        });
        if collapsing && number == break_start {
            controls.push(Control::Expander);
        }
    }

    controls
}

/// Lay out the full strip. Listings with at most one page get no controls.
pub fn layout_strip(
    total_pages: usize,
    current_page: usize,
    break_start: usize,
    settings: &BreakSettings,
    back_enabled: bool,
    next_enabled: bool,
) -> ButtonStrip {
    if total_pages <= 1 {
        return ButtonStrip::default();
    }

    let mut controls = Vec::with_capacity(total_pages + 3);
    controls.push(Control::Back {
        disabled: !back_enabled,
    });
    controls.extend(layout_pages(
        total_pages,
        current_page,
        break_start,
        settings,
    ));
    controls.push(Control::Next {
        disabled: !next_enabled,
    });

    ButtonStrip { controls }
}
