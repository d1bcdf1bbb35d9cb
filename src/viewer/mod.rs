//! `TableViewer` - the wasm-exported DOM host for a [`Table`].
//!
//! The host page owns the pane elements and paints the [`TableView`] returned
//! by `render()`. The viewer wires the panes' scroll, mouseover and touchstart
//! events into the scroll synchronizer, debounces window resizes, and calls the
//! render callback whenever the view changed.

mod events;
mod scroll;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::error::TableError;
use crate::rows::records_from_json;
use crate::scroll::{DomPane, DomScrollbarMeasure};
use crate::table::{PointerEvent, Table, TableProps, TableView};
use crate::types::{Pane, RowKey, TableOptions};

// Timing helper for the resize debouncer.
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Shared state that can be accessed by event handlers
pub(crate) struct SharedState {
    pub(crate) table: Table<DomPane>,
    pub(crate) render_callback: Option<Function>,
    pub(crate) resync_timer: Option<i32>,
    pub(crate) resync_closure: Option<Closure<dyn FnMut()>>,
}

/// A DOM listener registered by the viewer, removed again on teardown
struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// The table host exported to JavaScript
#[wasm_bindgen]
pub struct TableViewer {
    state: Rc<RefCell<SharedState>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl TableViewer {
    /// Create a viewer over existing pane elements.
    ///
    /// `head` is the fixed header pane; pass `null` when the header renders
    /// inside the body. Options may be an empty string for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        head: Option<HtmlElement>,
        body: HtmlElement,
        columns_json: &str,
        data_json: &str,
        options_json: &str,
    ) -> Result<TableViewer, JsValue> {
        console_error_panic_hook::set_once();

        let props = TableProps::from_json(columns_json, data_json, options_json)?;
        let mut table = Table::new(props)?.with_scrollbar_measure(DomScrollbarMeasure);
        table.attach_panes(head.clone().map(DomPane::new), DomPane::new(body.clone()));

        let state = Rc::new(RefCell::new(SharedState {
            table,
            render_callback: None,
            resync_timer: None,
            resync_closure: None,
        }));

        let mut viewer = TableViewer {
            state,
            listeners: Vec::new(),
        };
        if let Some(head) = &head {
            viewer.wire_pane(head, Pane::Head);
        }
        viewer.wire_pane(&body, Pane::Body);
        viewer.wire_resize();
        Ok(viewer)
    }

    /// Set the function called whenever the view needs repainting
    #[wasm_bindgen]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Compose the current view as a JS object
    #[wasm_bindgen]
    pub fn render(&self) -> Result<JsValue, JsValue> {
        let view = self.render_view();
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Compose the current view as a JSON string
    #[wasm_bindgen]
    pub fn render_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.render_view())
            .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
    }

    /// Replace the records
    #[wasm_bindgen]
    pub fn set_data(&self, data_json: &str) -> Result<(), JsValue> {
        let value: Value =
            serde_json::from_str(data_json).map_err(|e| JsValue::from(TableError::from(e)))?;
        let data = records_from_json(value)?;
        self.update_props(|props| props.data(data))
    }

    /// Replace the column tree
    #[wasm_bindgen]
    pub fn set_columns(&self, columns_json: &str) -> Result<(), JsValue> {
        let value: Value =
            serde_json::from_str(columns_json).map_err(|e| JsValue::from(TableError::from(e)))?;
        let columns = crate::columns::columns_from_json(&value)?;
        self.update_props(|mut props| {
            props.columns = Some(Rc::new(columns));
            props
        })
    }

    /// Replace the options
    #[wasm_bindgen]
    pub fn set_options(&self, options_json: &str) -> Result<(), JsValue> {
        let options = TableOptions::from_json(options_json)?;
        self.update_props(|props| props.options(options))
    }

    /// Pointer entered (`true`) or left (`false`) the row with `key`
    #[wasm_bindgen]
    pub fn hover_row(&self, key: JsValue, is_hover: bool) -> Result<(), JsValue> {
        let key = row_key_from_js(key)?;
        Self::internal_row_hover(&self.state, &key, is_hover);
        Ok(())
    }

    /// Forward a click on row `key`; returns whether a handler ran
    #[wasm_bindgen]
    pub fn click_row(&self, key: JsValue, client_x: f64, client_y: f64) -> Result<bool, JsValue> {
        let key = row_key_from_js(key)?;
        let event = PointerEvent {
            client_x,
            client_y,
            ..PointerEvent::default()
        };
        Ok(self.state.borrow().table.click_row(&key, &event))
    }

    /// Expand or collapse row `key`
    #[wasm_bindgen]
    pub fn toggle_row(&self, key: JsValue) -> Result<Option<bool>, JsValue> {
        let key = row_key_from_js(key)?;
        let expanded = self.state.borrow_mut().table.toggle_expanded(&key);
        Self::notify_if_dirty(&self.state);
        Ok(expanded)
    }

    /// Current horizontal scroll position: "left", "middle" or "right"
    #[wasm_bindgen]
    pub fn scroll_position(&self) -> String {
        self.state
            .borrow()
            .table
            .scroll_position()
            .as_str()
            .to_string()
    }

    /// Detach listeners, cancel the pending resync and release row state.
    /// Calling it more than once is harmless.
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
        Self::cancel_resync_timeout(&self.state);
        let mut s = self.state.borrow_mut();
        s.table.teardown();
        s.render_callback = None;
    }
}

impl TableViewer {
    fn render_view(&self) -> TableView {
        let mut s = self.state.borrow_mut();
        let view = s.table.render();
        s.table.take_needs_render();
        view
    }

    fn update_props(
        &self,
        update: impl FnOnce(TableProps) -> TableProps,
    ) -> Result<(), JsValue> {
        {
            let mut s = self.state.borrow_mut();
            let next = update(s.table.props().clone());
            s.table.set_props(next)?;
        }
        Self::notify_if_dirty(&self.state);
        Ok(())
    }

    fn add_listener(
        &mut self,
        target: &web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("could not listen for {event}");
            return;
        }
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
    }
}

impl Drop for TableViewer {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn row_key_from_js(key: JsValue) -> Result<RowKey, JsValue> {
    let value: Value = serde_wasm_bindgen::from_value(key)
        .map_err(|e| JsValue::from_str(&format!("Invalid row key: {e}")))?;
    RowKey::from_value(&value).ok_or_else(|| JsValue::from_str("Invalid row key"))
}
