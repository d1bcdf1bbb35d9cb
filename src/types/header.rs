use serde::Serialize;

/// A single `<th>` of the header grid.
///
/// Spans are carried through from the column node only when it declared
/// them; `None` renders as the implicit span of 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub key: String,
    pub class_name: String,
    /// Header content (the column title)
    pub children: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
}

/// One `<tr>` of header cells
pub type HeaderRow = Vec<HeaderCell>;
