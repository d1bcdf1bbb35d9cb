//! Expandable rows, layered over flattening as a [`RowDecorator`].
//!
//! The decorator owns the set of expanded row keys. Collapsed rows hide their
//! descendants; expanded rows may be followed by an extra content row.

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use serde_json::Value;

use super::{Decoration, RowDecorator, RowFlattener};
use crate::types::{FlattenedRow, RowKey, SyntheticRow};

/// `(record, index, indent)` projection for expanded content and its class
pub type ExpandedRowHook = Rc<dyn Fn(&Value, usize, usize) -> String>;
/// Called with `(expanded, record)` when a row is toggled
pub type ExpandCallback = Rc<dyn Fn(bool, &Value)>;
/// Called with the full key set after it changes
pub type ExpandedRowsCallback = Rc<dyn Fn(&[RowKey])>;

#[derive(Clone, Default)]
pub struct ExpandableOptions {
    /// Start with every row that can be reached expanded
    pub default_expand_all_rows: bool,
    /// Controlled key set; toggling only reports, the owner must push changes back
    pub expanded_row_keys: Option<Vec<RowKey>>,
    pub default_expanded_row_keys: Vec<RowKey>,
    pub expanded_row_render: Option<ExpandedRowHook>,
    pub expanded_row_class_name: Option<ExpandedRowHook>,
    pub on_expand: Option<ExpandCallback>,
    pub on_expanded_rows_change: Option<ExpandedRowsCallback>,
}

pub struct ExpandableRows {
    options: ExpandableOptions,
    keys: Vec<RowKey>,
    lookup: HashSet<RowKey>,
}

impl ExpandableRows {
    /// Initial expanded state for `data`.
    pub fn new(options: ExpandableOptions, data: &[Value], flattener: &RowFlattener) -> Self {
        let keys = if options.default_expand_all_rows {
            all_row_keys(data, flattener)
        } else if let Some(keys) = &options.expanded_row_keys {
            keys.clone()
        } else {
            options.default_expanded_row_keys.clone()
        };
        let lookup = keys.iter().cloned().collect();
        Self {
            options,
            keys,
            lookup,
        }
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.lookup.contains(key)
    }

    /// Expanded keys in the order they were expanded
    pub fn expanded_row_keys(&self) -> &[RowKey] {
        &self.keys
    }

    pub fn is_controlled(&self) -> bool {
        self.options.expanded_row_keys.is_some()
    }

    /// Swap in new options; a controlled key set replaces the current one.
    pub fn update_options(&mut self, options: ExpandableOptions) {
        if let Some(keys) = &options.expanded_row_keys {
            self.set_expanded_row_keys(keys.clone());
        }
        self.options = options;
    }

    /// Replace the expanded set (controlled mode updates land here).
    pub fn set_expanded_row_keys(&mut self, keys: Vec<RowKey>) {
        self.lookup = keys.iter().cloned().collect();
        self.keys = keys;
    }

    /// Flip `key` and notify listeners. Returns the requested expanded state.
    ///
    /// In controlled mode the state is left alone; listeners are expected to
    /// push the new key set back through [`Self::set_expanded_row_keys`].
    pub fn toggle(&mut self, key: &RowKey, record: &Value) -> bool {
        let expanded = !self.is_expanded(key);
        let mut next = self.keys.clone();
        if expanded {
            next.push(key.clone());
        } else {
            next.retain(|k| k != key);
        }

        if let Some(on_expand) = &self.options.on_expand {
            on_expand(expanded, record);
        }
        if !self.is_controlled() {
            self.set_expanded_row_keys(next.clone());
        }
        if let Some(on_change) = &self.options.on_expanded_rows_change {
            on_change(&next);
        }
        expanded
    }
}

impl RowDecorator for ExpandableRows {
    fn decorate(&self, row: &FlattenedRow<'_>) -> Decoration {
        let expanded = self.is_expanded(&row.key);
        let extra_rows = self
            .options
            .expanded_row_render
            .as_ref()
            .map(|render| SyntheticRow {
                key: format!("{}-extra-row", row.key),
                parent_key: row.key.clone(),
                class_name: self
                    .options
                    .expanded_row_class_name
                    .as_ref()
                    .map(|class| class(row.record, row.index, row.indent))
                    .unwrap_or_default(),
                content: render(row.record, row.index, row.indent),
                indent: row.indent,
                visible: row.visible && expanded,
            })
            .into_iter()
            .collect();
        Decoration {
            extra_rows,
            children_visible: expanded,
        }
    }
}

/// Keys of every record at every depth, breadth-first.
fn all_row_keys(data: &[Value], flattener: &RowFlattener) -> Vec<RowKey> {
    let mut queue: VecDeque<(usize, &Value)> = data.iter().enumerate().collect();
    let mut keys = Vec::new();
    while let Some((index, record)) = queue.pop_front() {
        keys.push(flattener.row_key().key_for(record, index));
        if let Some(children) = flattener.children_of(record) {
            queue.extend(children.iter().enumerate());
        }
    }
    keys
}
