//! Common test fixtures and helpers.
//!
//! Column trees and record sets shared by the integration tests, plus small
//! accessors over rendered views.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use serde_json::{json, Value};

use panetable::table::{RowView, Table, TableProps, TableView};
use panetable::types::{ColumnNode, RowKey, ScrollExtent, ScrollOptions, TableOptions};

// ============================================================================
// Column Fixtures
// ============================================================================

/// `[A, B{B1, B2}]`: one leaf beside a two-leaf group
pub fn grouped_columns() -> Vec<ColumnNode> {
    vec![
        ColumnNode::leaf("a", "A").with_data_index("a"),
        ColumnNode::group(
            "b",
            "B",
            vec![
                ColumnNode::leaf("b1", "B1").with_data_index("b1"),
                ColumnNode::leaf("b2", "B2").with_data_index("b2"),
            ],
        ),
    ]
}

/// Name and age leaves reading fields of the same name
pub fn person_columns() -> Vec<ColumnNode> {
    vec![
        ColumnNode::leaf("name", "Name").with_data_index("name"),
        ColumnNode::leaf("age", "Age").with_data_index("age"),
    ]
}

// ============================================================================
// Record Fixtures
// ============================================================================

/// `[1 [11], 2]`
pub fn small_tree() -> Vec<Value> {
    vec![json!({"key": 1, "children": [{"key": 11}]}), json!({"key": 2})]
}

/// Three levels with siblings at every level
pub fn family_tree() -> Vec<Value> {
    vec![
        json!({
            "key": "a", "name": "Ann", "age": 61,
            "children": [
                {"key": "a1", "name": "Al", "age": 35, "children": [
                    {"key": "a1x", "name": "Alex", "age": 8}
                ]},
                {"key": "a2", "name": "Amy", "age": 33}
            ]
        }),
        json!({"key": "b", "name": "Bob", "age": 58}),
        json!({
            "key": "c", "name": "Cy", "age": 70,
            "children": [{"key": "c1", "name": "Cat", "age": 40}]
        }),
    ]
}

/// `n` flat records keyed `r0..rn`
pub fn flat_records(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"key": format!("r{i}"), "name": format!("row {i}"), "age": i}))
        .collect()
}

// ============================================================================
// Options
// ============================================================================

pub fn scroll_options(x: Option<ScrollExtent>, y: Option<ScrollExtent>) -> TableOptions {
    TableOptions {
        scroll: ScrollOptions { x, y },
        ..TableOptions::default()
    }
}

// ============================================================================
// Table Helpers
// ============================================================================

pub fn table(columns: Vec<ColumnNode>, data: Vec<Value>) -> Table {
    Table::new(TableProps::new(columns, data)).expect("valid columns")
}

/// Body rows of a rendered view
pub fn body_rows(view: &TableView) -> &[RowView] {
    &view
        .body
        .table
        .body
        .as_ref()
        .expect("body pane has rows")
        .rows
}

pub fn row_keys(view: &TableView) -> Vec<String> {
    body_rows(view).iter().map(|row| row.key.clone()).collect()
}

pub fn visible_keys(view: &TableView) -> Vec<String> {
    body_rows(view)
        .iter()
        .filter(|row| row.visible)
        .map(|row| row.key.clone())
        .collect()
}

pub fn key(s: &str) -> RowKey {
    RowKey::from(s)
}
