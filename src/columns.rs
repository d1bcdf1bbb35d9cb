//! Column resolution.
//!
//! A table's columns can be authored two ways:
//! - an explicit tree of [`ColumnNode`]s (the source of truth when present)
//! - declarative [`ColumnDescriptor`]s, normalized into an equivalent tree
//!
//! [`ColumnManager`] keeps two views of the resolved tree: the grouped tree used
//! to build header rows, and the depth-first list of leaf columns that drives
//! body cells. Both are rebuilt by [`ColumnManager::reset`]; callers decide when
//! to reset by comparing the identity of their column source, never its contents.

use std::cell::OnceCell;

use serde_json::Value;

use crate::error::{Result, TableError};
use crate::types::{ColumnNode, ColumnWidth};

/// Properties shared by both kinds of column descriptor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnProps {
    pub key: Option<String>,
    pub title: String,
    pub data_index: Option<String>,
    pub width: Option<ColumnWidth>,
    pub class_name: Option<String>,
    pub col_span: Option<u32>,
    pub row_span: Option<u32>,
}

impl ColumnProps {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data_index(mut self, data_index: impl Into<String>) -> Self {
        self.data_index = Some(data_index.into());
        self
    }
}

/// Declarative column authoring: a column or a group of descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDescriptor {
    Column(ColumnProps),
    Group {
        props: ColumnProps,
        children: Vec<ColumnDescriptor>,
    },
}

impl ColumnDescriptor {
    fn props(&self) -> &ColumnProps {
        match self {
            Self::Column(props) | Self::Group { props, .. } => props,
        }
    }
}

/// Resolved column tree plus its memoized leaf sequence.
#[derive(Debug, Clone)]
pub struct ColumnManager {
    grouped: Vec<ColumnNode>,
    leaves: OnceCell<Vec<ColumnNode>>,
}

impl ColumnManager {
    /// Resolve columns from an explicit tree or, failing that, from descriptors.
    ///
    /// # Errors
    /// Returns [`TableError::InvalidColumns`] when neither source is given, and
    /// [`TableError::MissingColumnKey`] when a descriptor has no derivable key.
    pub fn new(
        columns: Option<&[ColumnNode]>,
        descriptors: Option<&[ColumnDescriptor]>,
    ) -> Result<Self> {
        let grouped = resolve(columns, descriptors)?;
        log::debug!("resolved {} top-level columns", grouped.len());
        Ok(Self {
            grouped,
            leaves: OnceCell::new(),
        })
    }

    /// Resolve columns from a JSON column specification.
    ///
    /// # Errors
    /// Returns [`TableError::InvalidColumns`] unless `value` is an array of
    /// column nodes.
    pub fn from_json(value: &Value) -> Result<Self> {
        let columns = columns_from_json(value)?;
        Self::new(Some(&columns), None)
    }

    /// Leaf columns in depth-first, left-to-right order
    pub fn leaf_columns(&self) -> &[ColumnNode] {
        self.leaves.get_or_init(|| {
            let mut leaves = Vec::new();
            collect_leaves(&self.grouped, &mut leaves);
            leaves
        })
    }

    /// The top-level column tree, in authored shape
    pub fn grouped_columns(&self) -> &[ColumnNode] {
        &self.grouped
    }

    /// Depth of the deepest leaf (0 for an empty table)
    pub fn max_depth(&self) -> usize {
        self.grouped
            .iter()
            .map(ColumnNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Drop both memoized views and resolve again from a new source.
    ///
    /// On error the previous columns are kept.
    ///
    /// # Errors
    /// Same as [`ColumnManager::new`].
    pub fn reset(
        &mut self,
        columns: Option<&[ColumnNode]>,
        descriptors: Option<&[ColumnDescriptor]>,
    ) -> Result<()> {
        self.grouped = resolve(columns, descriptors)?;
        self.leaves = OnceCell::new();
        log::debug!("reset columns: {} top-level", self.grouped.len());
        Ok(())
    }
}

/// Decode a JSON column specification into column nodes.
///
/// # Errors
/// Returns [`TableError::InvalidColumns`] for non-array input or nodes of the
/// wrong shape.
pub fn columns_from_json(value: &Value) -> Result<Vec<ColumnNode>> {
    if !value.is_array() {
        return Err(TableError::InvalidColumns(format!(
            "expected an array of columns, found {}",
            json_kind(value)
        )));
    }
    serde_json::from_value(value.clone()).map_err(|e| TableError::InvalidColumns(e.to_string()))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn resolve(
    columns: Option<&[ColumnNode]>,
    descriptors: Option<&[ColumnDescriptor]>,
) -> Result<Vec<ColumnNode>> {
    match (columns, descriptors) {
        (Some(columns), _) => Ok(columns.to_vec()),
        (None, Some(descriptors)) => normalize(descriptors, ""),
        (None, None) => Err(TableError::InvalidColumns(
            "no columns or column descriptors supplied".to_string(),
        )),
    }
}

fn normalize(descriptors: &[ColumnDescriptor], path: &str) -> Result<Vec<ColumnNode>> {
    descriptors
        .iter()
        .enumerate()
        .map(|(i, descriptor)| {
            let here = format!("{path}[{i}]");
            let props = descriptor.props();
            let key = props
                .key
                .clone()
                .or_else(|| props.data_index.clone())
                .ok_or_else(|| TableError::MissingColumnKey { path: here.clone() })?;
            let children = match descriptor {
                ColumnDescriptor::Column(_) => None,
                ColumnDescriptor::Group { children, .. } => {
                    Some(normalize(children, &format!("{here}.children"))?)
                }
            };
            Ok(ColumnNode {
                key,
                title: props.title.clone(),
                data_index: props.data_index.clone(),
                width: props.width.clone(),
                class_name: props.class_name.clone(),
                col_span: props.col_span,
                row_span: props.row_span,
                children,
            })
        })
        .collect()
}

fn collect_leaves(columns: &[ColumnNode], out: &mut Vec<ColumnNode>) {
    for column in columns {
        match &column.children {
            Some(children) => collect_leaves(children, out),
            None => out.push(column.clone()),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(columns: &[ColumnNode]) -> Vec<&str> {
        columns.iter().map(|c| c.key.as_str()).collect()
    }

    fn nested() -> Vec<ColumnNode> {
        vec![
            ColumnNode::leaf("a", "A"),
            ColumnNode::group(
                "b",
                "B",
                vec![
                    ColumnNode::leaf("b1", "B1"),
                    ColumnNode::group("b2", "B2", vec![ColumnNode::leaf("b21", "B21")]),
                ],
            ),
            ColumnNode::leaf("c", "C"),
        ]
    }

    #[test]
    fn test_leaf_columns_depth_first() {
        let manager = ColumnManager::new(Some(&nested()), None).unwrap();
        assert_eq!(keys(manager.leaf_columns()), ["a", "b1", "b21", "c"]);
        assert_eq!(keys(manager.grouped_columns()), ["a", "b", "c"]);
        assert_eq!(manager.max_depth(), 3);
    }

    #[test]
    fn test_explicit_columns_win_over_descriptors() {
        let descriptors = vec![ColumnDescriptor::Column(ColumnProps::new("x", "X"))];
        let columns = vec![ColumnNode::leaf("a", "A")];
        let manager = ColumnManager::new(Some(&columns), Some(&descriptors)).unwrap();
        assert_eq!(keys(manager.leaf_columns()), ["a"]);
    }

    #[test]
    fn test_descriptors_normalize_to_tree() {
        let descriptors = vec![
            ColumnDescriptor::Column(ColumnProps::new("name", "Name")),
            ColumnDescriptor::Group {
                props: ColumnProps::new("addr", "Address"),
                children: vec![
                    ColumnDescriptor::Column(ColumnProps {
                        title: "Street".to_string(),
                        data_index: Some("street".to_string()),
                        ..ColumnProps::default()
                    }),
                    ColumnDescriptor::Column(ColumnProps::new("city", "City")),
                ],
            },
        ];
        let manager = ColumnManager::new(None, Some(&descriptors)).unwrap();
        assert_eq!(keys(manager.grouped_columns()), ["name", "addr"]);
        assert_eq!(keys(manager.leaf_columns()), ["name", "street", "city"]);
        assert!(!manager.grouped_columns()[1].is_leaf());
    }

    #[test]
    fn test_descriptor_without_key_is_error() {
        let descriptors = vec![ColumnDescriptor::Group {
            props: ColumnProps::new("g", "G"),
            children: vec![ColumnDescriptor::Column(ColumnProps::default())],
        }];
        let err = ColumnManager::new(None, Some(&descriptors)).unwrap_err();
        match err {
            TableError::MissingColumnKey { path } => assert_eq!(path, "[0].children[0]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_source_is_error() {
        assert!(matches!(
            ColumnManager::new(None, None),
            Err(TableError::InvalidColumns(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let err = ColumnManager::from_json(&json!({"key": "a"})).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_from_json_parses_nested() {
        let manager = ColumnManager::from_json(&json!([
            {"key": "a", "title": "A", "width": 100},
            {"key": "b", "title": "B", "colSpan": 2, "children": [
                {"key": "b1", "title": "B1", "dataIndex": "x"}
            ]}
        ]))
        .unwrap();
        assert_eq!(keys(manager.leaf_columns()), ["a", "b1"]);
        assert_eq!(manager.leaf_columns()[0].width, Some(ColumnWidth::Px(100.0)));
        assert_eq!(manager.grouped_columns()[1].col_span, Some(2));
    }

    #[test]
    fn test_reset_recomputes_views() {
        let mut manager = ColumnManager::new(Some(&nested()), None).unwrap();
        assert_eq!(manager.leaf_columns().len(), 4);

        manager
            .reset(Some(&[ColumnNode::leaf("z", "Z")]), None)
            .unwrap();
        assert_eq!(keys(manager.leaf_columns()), ["z"]);
        assert_eq!(keys(manager.grouped_columns()), ["z"]);
    }

    #[test]
    fn test_failed_reset_keeps_previous_columns() {
        let mut manager = ColumnManager::new(Some(&nested()), None).unwrap();
        assert!(manager.reset(None, None).is_err());
        assert_eq!(manager.leaf_columns().len(), 4);
    }
}
