//! panetable - headless table layout for the web
//!
//! Turns a column tree and hierarchical records into a paintable table view:
//! - Nested column groups with explicit row/column spans
//! - Tree rows with indent levels and expandable subtrees
//! - Fixed header pane kept in sync with a scrolling body
//! - Hover broadcast that only touches the rows that changed
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TableViewer } from 'panetable';
//! await init();
//! const viewer = new TableViewer(headDiv, bodyDiv, columnsJson, dataJson, optionsJson);
//! viewer.set_render_callback(() => paint(viewer.render()));
//! ```

pub mod columns;
pub mod error;
pub mod header;
pub mod rows;
pub mod scroll;
pub mod store;
pub mod table;
pub mod types;
pub mod warning;

// DOM host
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::TableViewer;

pub use columns::{ColumnDescriptor, ColumnManager, ColumnProps};
pub use error::{Result, TableError};
pub use rows::{ExpandableOptions, ExpandableRows, RowDecorator, RowFlattener, RowKeySelector};
pub use scroll::{MemoryPane, ScrollPane, ScrollSync};
pub use store::{RowHover, Store, TableState};
pub use table::{Table, TableProps, TableView};
pub use types::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Build the header grid for a JSON column array
///
/// # Returns
/// A JSON array of header rows, each an array of cells
///
/// # Errors
/// Returns an error if the columns are not a valid column array.
#[wasm_bindgen]
pub fn build_header_rows(columns_json: &str) -> std::result::Result<String, JsValue> {
    let value: serde_json::Value = serde_json::from_str(columns_json).map_err(to_js_error)?;
    let manager = ColumnManager::from_json(&value).map_err(to_js_error)?;
    let rows = header::build_header_rows(manager.grouped_columns());
    serde_json::to_string(&rows)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Flatten JSON records into the pre-order row sequence
///
/// Each entry carries `key`, `index`, `indent`, `visible` and `needIndentSpaced`.
///
/// # Errors
/// Returns an error if the records are not an array or the options are malformed.
#[wasm_bindgen]
pub fn flatten_rows(data_json: &str, options_json: &str) -> std::result::Result<String, JsValue> {
    let data = rows::records_from_json(serde_json::from_str(data_json).map_err(to_js_error)?)
        .map_err(to_js_error)?;
    let options = TableOptions::from_json(options_json).map_err(to_js_error)?;
    let flattened = RowFlattener::from_options(&options).flatten(&data, 0, true);
    let summary: Vec<serde_json::Value> = flattened
        .iter()
        .map(|row| {
            serde_json::json!({
                "key": row.key,
                "index": row.index,
                "indent": row.indent,
                "visible": row.visible,
                "needIndentSpaced": row.need_indent_spaced,
            })
        })
        .collect();
    serde_json::to_string(&summary)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Render a complete table view as a JSON string
///
/// # Errors
/// Returns an error if any input document is invalid.
#[wasm_bindgen]
pub fn render_table(
    columns_json: &str,
    data_json: &str,
    options_json: &str,
) -> std::result::Result<String, JsValue> {
    let view = render_view(columns_json, data_json, options_json).map_err(to_js_error)?;
    serde_json::to_string(&view)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Render a complete table view as a `JsValue`
///
/// Cheaper than `render_table` when the result is consumed directly in JavaScript.
///
/// # Errors
/// Returns an error if any input document is invalid.
#[wasm_bindgen]
pub fn render_table_to_js(
    columns_json: &str,
    data_json: &str,
    options_json: &str,
) -> std::result::Result<JsValue, JsValue> {
    let view = render_view(columns_json, data_json, options_json).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&view)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// One-shot render without panes or host callbacks.
///
/// # Errors
/// Fails if any input document is invalid.
pub fn render_view(columns_json: &str, data_json: &str, options_json: &str) -> Result<TableView> {
    let props = TableProps::from_json(columns_json, data_json, options_json)?;
    let mut table: Table = Table::new(props)?;
    let view = table.render();
    table.teardown();
    Ok(view)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
