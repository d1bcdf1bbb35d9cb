//! Row flattening.
//!
//! Hierarchical records (each may hold child records under a configurable
//! field) are turned into a pre-order sequence of [`FlattenedRow`]s: every
//! parent immediately precedes its descendants, and `indent` counts the
//! nesting depth.
//!
//! Decorators plug in through [`RowDecorator`]: they see each data row once and
//! may append synthetic rows right after it or hide its descendants. The list is
//! never restructured to do so, only the `visible` flags change.
//!
//! Records are borrowed, never mutated. Record graphs must be acyclic; that is
//! a precondition, not a runtime check (`serde_json::Value` cannot be cyclic).

mod expand;

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

pub use expand::{
    ExpandCallback, ExpandableOptions, ExpandableRows, ExpandedRowHook, ExpandedRowsCallback,
};

use crate::columns::json_kind;
use crate::error::{Result, TableError};
use crate::types::{FlattenedRow, RenderRow, RowKey, SyntheticRow, TableOptions};
use crate::warning::warning_once;

/// Logged once when a record carries no usable key
pub const MISSING_ROW_KEY: &str = "Each record in table should have a unique `key` prop, \
                                   or set `rowKey` to an unique primary key.";

/// Logged once when two rows of one table share a key
pub const DUPLICATE_ROW_KEY: &str = "Each record in table should have a unique `key` prop; \
                                     rows sharing a key also share hover state.";

/// Unwrap a JSON record document into its records.
///
/// # Errors
/// Returns [`TableError::InvalidData`] unless `value` is an array.
pub fn records_from_json(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(records) => Ok(records),
        other => Err(TableError::InvalidData(format!(
            "expected an array of records, found {}",
            json_kind(&other)
        ))),
    }
}

/// Computes a row key from `(record, index)`
pub type KeyFn = Rc<dyn Fn(&Value, usize) -> Option<RowKey>>;

/// How a row's identity is derived from its record.
#[derive(Clone)]
pub enum RowKeySelector {
    /// Read the key from this record field
    Field(String),
    Func(KeyFn),
}

impl Default for RowKeySelector {
    fn default() -> Self {
        Self::Field("key".to_string())
    }
}

impl fmt::Debug for RowKeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl RowKeySelector {
    /// Key for `record` at `index`, falling back to the index itself.
    pub fn key_for(&self, record: &Value, index: usize) -> RowKey {
        let key = match self {
            Self::Field(name) => record.get(name).and_then(RowKey::from_value),
            Self::Func(key_fn) => key_fn(record, index),
        };
        warning_once(key.is_some(), MISSING_ROW_KEY);
        key.unwrap_or(RowKey::Index(index))
    }
}

/// What a decorator contributes for one data row
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    /// Inserted immediately after the row, before its children
    pub extra_rows: Vec<SyntheticRow>,
    /// False hides every descendant of the row
    pub children_visible: bool,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            extra_rows: Vec::new(),
            children_visible: true,
        }
    }
}

/// Hook point for features layered over the base flattening.
pub trait RowDecorator {
    fn decorate(&self, row: &FlattenedRow<'_>) -> Decoration;
}

/// Decorator that contributes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoration;

impl RowDecorator for NoDecoration {
    fn decorate(&self, _row: &FlattenedRow<'_>) -> Decoration {
        Decoration::default()
    }
}

/// Turns nested records into renderable row sequences.
#[derive(Debug, Clone)]
pub struct RowFlattener {
    row_key: RowKeySelector,
    children_column_name: String,
}

impl Default for RowFlattener {
    fn default() -> Self {
        Self::new(RowKeySelector::default(), "children")
    }
}

impl RowFlattener {
    pub fn new(row_key: RowKeySelector, children_column_name: impl Into<String>) -> Self {
        Self {
            row_key,
            children_column_name: children_column_name.into(),
        }
    }

    /// Flattener configured from table options, keyed by the `rowKey` field
    pub fn from_options(options: &TableOptions) -> Self {
        Self::new(
            RowKeySelector::Field(options.row_key.clone()),
            options.children_column_name.clone(),
        )
    }

    pub fn row_key(&self) -> &RowKeySelector {
        &self.row_key
    }

    pub fn children_column_name(&self) -> &str {
        &self.children_column_name
    }

    /// Nested records of `record`, if its children field holds an array
    pub fn children_of<'a>(&self, record: &'a Value) -> Option<&'a [Value]> {
        record
            .get(&self.children_column_name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Whether any record of `rows` has a children array
    pub fn need_indent_spaced(&self, rows: &[Value]) -> bool {
        rows.iter().any(|record| self.children_of(record).is_some())
    }

    /// Flatten `rows` and all their descendants in pre-order.
    ///
    /// # Arguments
    /// * `rows` - Records of one level (the top-level data for a full table)
    /// * `indent` - Nesting depth assigned to `rows`
    /// * `visible` - Visibility assigned to `rows` and inherited by descendants
    pub fn flatten<'a>(
        &self,
        rows: &'a [Value],
        indent: usize,
        visible: bool,
    ) -> Vec<FlattenedRow<'a>> {
        self.flatten_level(rows, indent, visible, &NoDecoration)
            .into_iter()
            .filter_map(|row| match row {
                RenderRow::Data(row) => Some(row),
                RenderRow::Synthetic(_) => None,
            })
            .collect()
    }

    /// Flatten top-level `rows`, letting `decorator` add rows and hide subtrees.
    pub fn flatten_with<'a>(
        &self,
        rows: &'a [Value],
        decorator: &dyn RowDecorator,
    ) -> Vec<RenderRow<'a>> {
        self.flatten_level(rows, 0, true, decorator)
    }

    fn flatten_level<'a>(
        &self,
        rows: &'a [Value],
        indent: usize,
        visible: bool,
        decorator: &dyn RowDecorator,
    ) -> Vec<RenderRow<'a>> {
        let need_indent_spaced = self.need_indent_spaced(rows);
        let mut out = Vec::with_capacity(rows.len());
        let mut seen = HashSet::new();
        let level = Level {
            indent,
            visible,
            need_indent_spaced,
        };
        self.walk(rows, level, decorator, &mut seen, &mut out);
        out
    }

    fn walk<'a>(
        &self,
        rows: &'a [Value],
        level: Level,
        decorator: &dyn RowDecorator,
        seen: &mut HashSet<RowKey>,
        out: &mut Vec<RenderRow<'a>>,
    ) {
        for (index, record) in rows.iter().enumerate() {
            let key = self.row_key.key_for(record, index);
            warning_once(seen.insert(key.clone()), DUPLICATE_ROW_KEY);
            let row = FlattenedRow {
                key,
                record,
                index,
                indent: level.indent,
                visible: level.visible,
                need_indent_spaced: level.need_indent_spaced,
            };
            let decoration = decorator.decorate(&row);
            out.push(RenderRow::Data(row));
            out.extend(decoration.extra_rows.into_iter().map(RenderRow::Synthetic));

            if let Some(children) = self.children_of(record) {
                let nested = Level {
                    indent: level.indent + 1,
                    visible: level.visible && decoration.children_visible,
                    need_indent_spaced: level.need_indent_spaced,
                };
                self.walk(children, nested, decorator, seen, out);
            }
        }
    }
}

/// Per-level values handed down the recursive walk
#[derive(Debug, Clone, Copy)]
struct Level {
    indent: usize,
    visible: bool,
    need_indent_spaced: bool,
}
