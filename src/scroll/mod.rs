//! Scroll synchronization between the header pane and the body pane.
//!
//! Writing one pane's offset programmatically makes that pane fire its own
//! scroll event. To avoid a feedback loop only the current *scroll target*
//! (the pane the pointer last entered or touched) is allowed to drive the
//! other one; events from any other pane are dropped.
//!
//! Horizontal offsets are mirrored both ways. Vertical offsets only flow from
//! the body to a separate fixed header pane.

mod debounce;
#[cfg(target_arch = "wasm32")]
mod dom;
mod measure;

pub use debounce::Debouncer;
#[cfg(target_arch = "wasm32")]
pub use dom::{DomPane, DomScrollbarMeasure};
pub use measure::{head_compensation, FixedScrollbar, HeadCompensation, ScrollbarMeasure};

use crate::types::{Pane, ScrollOptions, ScrollPosition};

/// Offsets below this many pixels from the far edge count as "right".
/// Layout widths are fractional, so exact equality is never reached.
const RIGHT_EDGE_TOLERANCE: f64 = 1.0;

/// A scrollable element as the synchronizer sees it.
pub trait ScrollPane {
    fn scroll_left(&self) -> f64;
    fn set_scroll_left(&mut self, value: f64);
    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&mut self, value: f64);
    /// Width of the scrolled content
    fn content_width(&self) -> f64;
    /// Visible width of the pane itself
    fn viewport_width(&self) -> f64;
}

/// In-memory pane; offsets are clamped like a browser clamps them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPane {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub content_width: f64,
    pub viewport_width: f64,
    pub content_height: f64,
    pub viewport_height: f64,
}

impl MemoryPane {
    pub fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            content_width,
            viewport_width,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_heights(mut self, content_height: f64, viewport_height: f64) -> Self {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self
    }

    fn max_left(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    fn max_top(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

impl ScrollPane for MemoryPane {
    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, value: f64) {
        self.scroll_left = value.clamp(0.0, self.max_left());
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, value: f64) {
        self.scroll_top = value.clamp(0.0, self.max_top());
    }

    fn content_width(&self) -> f64 {
        self.content_width
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}

/// What one scroll event changed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOutcome {
    /// False when the event came from a pane that is not the scroll target
    pub accepted: bool,
    /// Horizontal offset written to the other pane
    pub propagated_left: Option<f64>,
    /// Vertical offset written to the head pane
    pub propagated_top: Option<f64>,
    /// New scroll position, when it changed
    pub position: Option<ScrollPosition>,
}

/// Keeps a head pane and a body pane scrolled in lock-step.
#[derive(Debug, Clone)]
pub struct ScrollSync<P> {
    head: Option<P>,
    body: P,
    sync_x: bool,
    sync_y: bool,
    position: ScrollPosition,
    last_scroll_left: f64,
    target: Option<Pane>,
}

impl<P: ScrollPane> ScrollSync<P> {
    /// `head` is the separate fixed header pane, `None` when the header
    /// renders inside the body.
    pub fn new(head: Option<P>, body: P, scroll: &ScrollOptions) -> Self {
        Self {
            head,
            body,
            sync_x: scroll.x_enabled(),
            sync_y: scroll.y_enabled(),
            position: ScrollPosition::Left,
            last_scroll_left: 0.0,
            target: None,
        }
    }

    /// Pick up changed `scroll` options without losing the offsets.
    pub fn set_options(&mut self, scroll: &ScrollOptions) {
        self.sync_x = scroll.x_enabled();
        self.sync_y = scroll.y_enabled();
    }

    pub fn pane(&self, pane: Pane) -> Option<&P> {
        match pane {
            Pane::Head => self.head.as_ref(),
            Pane::Body => Some(&self.body),
        }
    }

    pub fn pane_mut(&mut self, pane: Pane) -> Option<&mut P> {
        match pane {
            Pane::Head => self.head.as_mut(),
            Pane::Body => Some(&mut self.body),
        }
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.position
    }

    pub fn scroll_target(&self) -> Option<Pane> {
        self.target
    }

    /// Class that exposes the scroll position for styling
    pub fn class_name(&self, prefix_cls: &str) -> String {
        format!("{prefix_cls}-scroll-position-{}", self.position.as_str())
    }

    /// Make `pane` the source of the next scroll events (pointer over / touch start).
    pub fn detect_scroll_target(&mut self, pane: Pane) {
        if self.target != Some(pane) {
            self.target = Some(pane);
        }
    }

    /// Handle a scroll event fired by `source`.
    pub fn on_scroll(&mut self, source: Pane) -> ScrollOutcome {
        if self.target != Some(source) {
            return ScrollOutcome::default();
        }
        let Some(pane) = self.pane(source) else {
            return ScrollOutcome::default();
        };
        let left = pane.scroll_left();
        let top = pane.scroll_top();
        let scrollable = pane.content_width() - pane.viewport_width();

        let mut outcome = ScrollOutcome {
            accepted: true,
            ..ScrollOutcome::default()
        };

        if self.sync_x && (left - self.last_scroll_left).abs() > f64::EPSILON {
            if let Some(other) = self.pane_mut(source.other()) {
                other.set_scroll_left(left);
                outcome.propagated_left = Some(left);
            }
            let next = if left <= 0.0 {
                ScrollPosition::Left
            } else if left + RIGHT_EDGE_TOLERANCE >= scrollable {
                ScrollPosition::Right
            } else {
                ScrollPosition::Middle
            };
            if next != self.position {
                self.position = next;
                outcome.position = Some(next);
            }
        }

        if self.sync_y && source == Pane::Body {
            if let Some(head) = self.head.as_mut() {
                head.set_scroll_top(top);
                outcome.propagated_top = Some(top);
            }
        }

        self.last_scroll_left = left;
        outcome
    }

    /// Scroll both panes back to the left edge.
    pub fn reset_scroll_x(&mut self) {
        log::debug!("resetting horizontal scroll");
        if let Some(head) = self.head.as_mut() {
            head.set_scroll_left(0.0);
        }
        self.body.set_scroll_left(0.0);
    }
}
