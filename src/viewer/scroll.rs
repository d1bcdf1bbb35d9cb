//! Resize resync timer for `TableViewer`.
//!
//! The table's debouncer decides when resizing has settled; the browser timer
//! only wakes the viewer up to ask it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{now_ms, SharedState, TableViewer};
use crate::table::RESYNC_DELAY_MS;

impl TableViewer {
    pub(crate) fn schedule_resync_timeout(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.resync_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.table.is_torn_down() {
            return;
        }
        let weak_state = Rc::downgrade(state);
        let callback = s.resync_closure.get_or_insert_with(|| {
            Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    TableViewer::handle_resync(&state);
                }
            }) as Box<dyn FnMut()>)
        });
        #[allow(clippy::cast_possible_truncation)]
        let delay = RESYNC_DELAY_MS as i32;
        let timer = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        );
        s.resync_timer = timer.ok();
    }

    pub(crate) fn handle_resync(state: &Rc<RefCell<SharedState>>) {
        let fired = {
            let mut s = state.borrow_mut();
            s.resync_timer = None;
            s.table.poll_resync(now_ms())
        };
        if fired {
            Self::notify_if_dirty(state);
        } else if state.borrow().table.is_resync_pending() {
            // Another resize moved the deadline; wait again
            Self::schedule_resync_timeout(state);
        }
    }

    pub(crate) fn cancel_resync_timeout(state: &Rc<RefCell<SharedState>>) {
        let timer = state.borrow_mut().resync_timer.take();
        if let (Some(timer_id), Some(window)) = (timer, web_sys::window()) {
            window.clear_timeout_with_handle(timer_id);
        }
    }
}
