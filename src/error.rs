//! Structured error types for panetable.
//!
//! Configuration problems surface here and stop a table from being built.
//! Data-quality issues (missing row keys) never do; they are logged once.

/// All errors that can occur while resolving or rendering a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The column specification is not an array of column nodes.
    #[error("Invalid column specification: {0}")]
    InvalidColumns(String),

    /// The record document is not an array of records.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A declarative column descriptor has neither a key nor a data index.
    #[error("Column descriptor at {path} has no key or dataIndex")]
    MissingColumnKey { path: String },

    /// JSON decoding of records, options or columns failed.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors from host integrations.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

impl From<String> for TableError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for TableError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TableError> for wasm_bindgen::JsValue {
    fn from(e: TableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
