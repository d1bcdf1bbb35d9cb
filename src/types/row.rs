use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Stable identity of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RowKey {
    Str(String),
    Int(i64),
    /// Positional fallback used when a record carries no usable key
    Index(usize),
}

impl RowKey {
    /// Derive a key from a record field value.
    ///
    /// Strings and integers are used as-is; other numbers and booleans are
    /// stringified. `null`, arrays and objects carry no identity.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| Self::Str(n.to_string()), Self::Int),
            ),
            Value::Bool(b) => Some(Self::Str(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for RowKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// One entry of the pre-order flattened row sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedRow<'a> {
    pub key: RowKey,
    pub record: &'a Value,
    /// Position among the record's siblings
    pub index: usize,
    /// Nesting depth, 0 for top-level records
    pub indent: usize,
    pub visible: bool,
    /// True when any top-level record has children, so leaf rows still
    /// reserve room for the expand affordance.
    pub need_indent_spaced: bool,
}

/// A row contributed by a decorator rather than by the record data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticRow {
    pub key: String,
    /// Key of the data row this one follows
    pub parent_key: RowKey,
    pub class_name: String,
    pub content: String,
    pub indent: usize,
    pub visible: bool,
}

/// Output of a decorated flatten: data rows interleaved with synthetic rows.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderRow<'a> {
    Data(FlattenedRow<'a>),
    Synthetic(SyntheticRow),
}

impl RenderRow<'_> {
    pub fn visible(&self) -> bool {
        match self {
            Self::Data(row) => row.visible,
            Self::Synthetic(row) => row.visible,
        }
    }
}
