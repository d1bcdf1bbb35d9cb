//! Serializable render output handed to the host for painting.

use serde::Serialize;
use serde_json::Value;

use crate::scroll::HeadCompensation;
use crate::types::{HeaderRow, ScrollPosition};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub class_name: String,
    pub scroll_position: ScrollPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Separate header pane, fixed-header mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<PaneView>,
    pub body: PaneView,
    /// Empty-data placeholder text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneView {
    pub class_name: String,
    pub style: PaneStyle,
    pub table: TableElement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    #[serde(flatten)]
    pub compensation: Option<HeadCompensation>,
}

/// One `<table>` element inside a pane
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    pub col_group: Vec<ColView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<HeaderRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColView {
    pub key: String,
    /// Used for both `width` and `min-width`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyView {
    pub class_name: String,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RowKind {
    Data,
    /// Content row contributed by a decorator
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub key: String,
    pub kind: RowKind,
    pub class_name: String,
    pub index: usize,
    pub indent: usize,
    pub visible: bool,
    pub hovered: bool,
    pub cells: Vec<CellView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub key: String,
    pub class_name: String,
    pub value: Value,
    /// Indent guide, first cell only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<IndentView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndentView {
    pub padding_left: f64,
    /// Reserve space for the expand affordance even on leaf rows
    pub spaced: bool,
}
