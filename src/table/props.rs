//! Table properties: declarative options, data, columns and host hooks.

use std::rc::Rc;

use serde_json::Value;

use super::view::BodyView;
use crate::columns::{columns_from_json, ColumnDescriptor};
use crate::error::Result;
use crate::rows::{records_from_json, ExpandableOptions, KeyFn};
use crate::types::{ColumnNode, RowKey, TableOptions};

/// `(record, index, indent)` -> extra row class
pub type RowClassNameFn = Rc<dyn Fn(&Value, usize, usize) -> String>;
/// Projection of the whole data set (title, footer)
pub type DataFn = Rc<dyn Fn(&[Value]) -> String>;
pub type EmptyTextFn = Rc<dyn Fn() -> String>;
pub type BodyWrapperFn = Rc<dyn Fn(BodyView) -> BodyView>;
/// `(record, index, event)` row event handler
pub type RowEventFn = Rc<dyn Fn(&Value, usize, &PointerEvent)>;

/// Pointer event details forwarded to row event handlers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub shift_key: bool,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
}

/// Everything a host passes to a [`super::Table`].
///
/// Column sources and data are `Rc`s: a new `Rc` means "changed", the same
/// `Rc` means "unchanged", regardless of contents.
#[derive(Clone)]
pub struct TableProps {
    pub options: TableOptions,
    pub data: Rc<Vec<Value>>,
    pub columns: Option<Rc<Vec<ColumnNode>>>,
    pub column_descriptors: Option<Rc<Vec<ColumnDescriptor>>>,
    /// Overrides `options.row_key` when set
    pub row_key: Option<KeyFn>,
    pub row_class_name: Option<RowClassNameFn>,
    pub title: Option<DataFn>,
    pub footer: Option<DataFn>,
    pub empty_text: Option<EmptyTextFn>,
    pub body_wrapper: Option<BodyWrapperFn>,
    pub on_row_click: Option<RowEventFn>,
    pub on_row_double_click: Option<RowEventFn>,
    pub expandable: Option<ExpandableOptions>,
}

impl TableProps {
    pub fn new(columns: Vec<ColumnNode>, data: Vec<Value>) -> Self {
        Self {
            columns: Some(Rc::new(columns)),
            ..Self::with_data(data)
        }
    }

    /// Props from JSON documents: a column array, a record array and an
    /// options object (blank for defaults).
    ///
    /// # Errors
    /// Fails on malformed JSON, non-array column or record documents, and
    /// options of the wrong shape.
    pub fn from_json(columns: &str, data: &str, options: &str) -> Result<Self> {
        let columns = columns_from_json(&serde_json::from_str(columns)?)?;
        let data = records_from_json(serde_json::from_str(data)?)?;
        let options = TableOptions::from_json(options)?;
        Ok(Self::new(columns, data).options(options))
    }

    /// Props whose columns come from declarative descriptors
    pub fn from_descriptors(descriptors: Vec<ColumnDescriptor>, data: Vec<Value>) -> Self {
        Self {
            column_descriptors: Some(Rc::new(descriptors)),
            ..Self::with_data(data)
        }
    }

    fn with_data(data: Vec<Value>) -> Self {
        Self {
            options: TableOptions::default(),
            data: Rc::new(data),
            columns: None,
            column_descriptors: None,
            row_key: None,
            row_class_name: None,
            title: None,
            footer: None,
            empty_text: None,
            body_wrapper: None,
            on_row_click: None,
            on_row_double_click: None,
            expandable: None,
        }
    }

    #[must_use]
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn row_key(mut self, row_key: impl Fn(&Value, usize) -> Option<RowKey> + 'static) -> Self {
        self.row_key = Some(Rc::new(row_key));
        self
    }

    #[must_use]
    pub fn row_class_name(mut self, f: impl Fn(&Value, usize, usize) -> String + 'static) -> Self {
        self.row_class_name = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn title(mut self, f: impl Fn(&[Value]) -> String + 'static) -> Self {
        self.title = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn footer(mut self, f: impl Fn(&[Value]) -> String + 'static) -> Self {
        self.footer = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn empty_text(mut self, f: impl Fn() -> String + 'static) -> Self {
        self.empty_text = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn body_wrapper(mut self, f: impl Fn(BodyView) -> BodyView + 'static) -> Self {
        self.body_wrapper = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_row_click(mut self, f: impl Fn(&Value, usize, &PointerEvent) + 'static) -> Self {
        self.on_row_click = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_row_double_click(
        mut self,
        f: impl Fn(&Value, usize, &PointerEvent) + 'static,
    ) -> Self {
        self.on_row_double_click = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn expandable(mut self, options: ExpandableOptions) -> Self {
        self.expandable = Some(options);
        self
    }

    /// Same props with a new data set
    #[must_use]
    pub fn data(mut self, data: Vec<Value>) -> Self {
        self.data = Rc::new(data);
        self
    }

    pub fn empty_text_or_default(&self) -> String {
        self.empty_text
            .as_ref()
            .map_or_else(|| "No Data".to_string(), |f| f())
    }
}
