//! Pane, pointer and window event handlers for `TableViewer`.
//!
//! All methods here are `pub(crate)` helpers; listeners hold a weak handle to
//! the shared state so a dropped viewer never keeps itself alive.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::{SharedState, TableViewer};
use crate::types::{Pane, RowKey};

impl TableViewer {
    /// Listen for scroll and scroll-target changes on one pane.
    pub(crate) fn wire_pane(&mut self, element: &HtmlElement, pane: Pane) {
        for event in ["mouseover", "touchstart"] {
            let weak = Rc::downgrade(&self.state);
            self.add_listener(element.as_ref(), event, move |_event| {
                if let Some(state) = weak.upgrade() {
                    Self::internal_detect_target(&state, pane);
                }
            });
        }
        let weak = Rc::downgrade(&self.state);
        self.add_listener(element.as_ref(), "scroll", move |_event| {
            if let Some(state) = weak.upgrade() {
                Self::internal_scroll(&state, pane);
            }
        });
    }

    /// Re-measure panes once window resizing settles.
    pub(crate) fn wire_resize(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let weak = Rc::downgrade(&self.state);
        self.add_listener(window.as_ref(), "resize", move |_event| {
            if let Some(state) = weak.upgrade() {
                Self::internal_resize(&state);
            }
        });
    }

    pub(crate) fn internal_detect_target(state: &Rc<RefCell<SharedState>>, pane: Pane) {
        state.borrow_mut().table.detect_scroll_target(pane);
    }

    pub(crate) fn internal_scroll(state: &Rc<RefCell<SharedState>>, pane: Pane) {
        let outcome = state.borrow_mut().table.handle_scroll(pane);
        if outcome.position.is_some() {
            Self::notify_if_dirty(state);
        }
    }

    pub(crate) fn internal_row_hover(
        state: &Rc<RefCell<SharedState>>,
        key: &RowKey,
        is_hover: bool,
    ) {
        // Row listeners fire synchronously inside set_state; keep it a shared borrow
        state.borrow().table.handle_row_hover(is_hover, key);
        Self::notify_if_dirty(state);
    }

    pub(crate) fn internal_resize(state: &Rc<RefCell<SharedState>>) {
        state.borrow_mut().table.request_resync(super::now_ms());
        Self::schedule_resync_timeout(state);
    }

    /// Call the render callback if the table changed since the last render.
    pub(crate) fn notify_if_dirty(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let s = state.borrow();
            if s.table.is_torn_down() || !s.table.take_needs_render() {
                return;
            }
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    pub(crate) fn invoke_render_callback(callback: Option<Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }
}
