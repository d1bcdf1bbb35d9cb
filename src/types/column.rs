use serde::{Deserialize, Serialize};

/// Column width as authored: a pixel count or any CSS length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidth {
    Px(f64),
    Css(String),
}

impl ColumnWidth {
    /// CSS value for `width`/`min-width` on a `<col>`.
    pub fn to_css(&self) -> String {
        match self {
            Self::Px(px) => format!("{px}px"),
            Self::Css(css) => css.clone(),
        }
    }
}

/// One node of a column specification tree.
///
/// A node with `children` is a group: it only produces header cells. A node
/// without `children` is a leaf and produces one body cell per row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnNode {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    /// Record field read by body cells of this column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// `Some(0)` hides the header cell so a neighbour can cover its slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ColumnNode>>,
}

impl ColumnNode {
    /// Create a leaf column
    pub fn leaf(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Create a group column
    pub fn group(
        key: impl Into<String>,
        title: impl Into<String>,
        children: Vec<ColumnNode>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            children: Some(children),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data_index(mut self, data_index: impl Into<String>) -> Self {
        self.data_index = Some(data_index.into());
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_col_span(mut self, col_span: u32) -> Self {
        self.col_span = Some(col_span);
        self
    }

    #[must_use]
    pub fn with_row_span(mut self, row_span: u32) -> Self {
        self.row_span = Some(row_span);
        self
    }

    /// True when the node has no sub-columns
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Sub-columns of a group, empty for leaves
    pub fn child_columns(&self) -> &[ColumnNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Depth of the deepest leaf below (and including) this node.
    pub fn depth(&self) -> usize {
        1 + self
            .child_columns()
            .iter()
            .map(ColumnNode::depth)
            .max()
            .unwrap_or(0)
    }
}
