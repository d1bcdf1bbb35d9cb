//! DOM-backed scroll panes (wasm32 only).

use std::cell::Cell;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::{ScrollPane, ScrollbarMeasure};

/// A scrollable `<div>` wrapping one of the table's `<table>` elements.
#[derive(Debug, Clone)]
pub struct DomPane {
    element: HtmlElement,
}

impl DomPane {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    // Read through Reflect to keep fractional offsets on zoomed pages
    fn get_f64(&self, prop: &str) -> Option<f64> {
        Reflect::get(self.element.as_ref(), &JsValue::from_str(prop))
            .ok()
            .and_then(|value| value.as_f64())
    }

    fn set_f64(&self, prop: &str, value: f64) {
        // A detached element just ignores the write
        let _ = Reflect::set(
            self.element.as_ref(),
            &JsValue::from_str(prop),
            &JsValue::from_f64(value),
        );
    }
}

impl ScrollPane for DomPane {
    fn scroll_left(&self) -> f64 {
        self.get_f64("scrollLeft")
            .unwrap_or_else(|| f64::from(self.element.scroll_left()))
    }

    fn set_scroll_left(&mut self, value: f64) {
        self.set_f64("scrollLeft", value);
    }

    fn scroll_top(&self) -> f64 {
        self.get_f64("scrollTop")
            .unwrap_or_else(|| f64::from(self.element.scroll_top()))
    }

    fn set_scroll_top(&mut self, value: f64) {
        self.set_f64("scrollTop", value);
    }

    fn content_width(&self) -> f64 {
        self.element
            .first_element_child()
            .map_or(0.0, |table| table.get_bounding_client_rect().width())
    }

    fn viewport_width(&self) -> f64 {
        self.element.get_bounding_client_rect().width()
    }
}

thread_local! {
    static SCROLLBAR_WIDTH: Cell<Option<f64>> = const { Cell::new(None) };
}

/// Measures the native scrollbar once per thread with an off-screen probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomScrollbarMeasure;

impl DomScrollbarMeasure {
    fn probe() -> Option<f64> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        let probe: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        let style = probe.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("top", "-9999px");
        let _ = style.set_property("width", "50px");
        let _ = style.set_property("height", "50px");
        let _ = style.set_property("overflow", "scroll");
        body.append_child(&probe).ok()?;
        let width = f64::from(probe.offset_width() - probe.client_width());
        let _ = body.remove_child(&probe);
        Some(width)
    }
}

impl ScrollbarMeasure for DomScrollbarMeasure {
    fn scrollbar_width(&self) -> f64 {
        SCROLLBAR_WIDTH.with(|cached| {
            if let Some(width) = cached.get() {
                return width;
            }
            let width = Self::probe().unwrap_or(0.0);
            cached.set(Some(width));
            width
        })
    }
}
