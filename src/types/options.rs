use serde::{Deserialize, Serialize};

/// One axis of the `scroll` option.
///
/// `x: true` switches the table to a fixed layout; a width sets the table
/// width. `y` gives the body's max height and forces fixed-header mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrollExtent {
    Flag(bool),
    Px(f64),
    Css(String),
}

impl ScrollExtent {
    /// Whether the axis scrolls at all (a falsy value disables it)
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Flag(on) => *on,
            Self::Px(px) => px.abs() > f64::EPSILON,
            Self::Css(css) => !css.is_empty(),
        }
    }

    /// CSS length for an explicit extent, `None` for flags
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Flag(_) => None,
            Self::Px(px) => Some(format!("{px}px")),
            Self::Css(css) => Some(css.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<ScrollExtent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<ScrollExtent>,
}

impl ScrollOptions {
    /// `x` is present, even if falsy
    pub fn has_x(&self) -> bool {
        self.x.is_some()
    }

    pub fn x_enabled(&self) -> bool {
        self.x.as_ref().is_some_and(ScrollExtent::is_enabled)
    }

    pub fn y_enabled(&self) -> bool {
        self.y.as_ref().is_some_and(ScrollExtent::is_enabled)
    }
}

/// Declarative table options, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Record field holding the row identity
    pub row_key: String,
    /// Record field holding nested child records
    pub children_column_name: String,
    /// Pixels of padding per nesting level
    pub indent_size: f64,
    pub show_header: bool,
    pub use_fixed_header: bool,
    pub scroll: ScrollOptions,
    pub prefix_cls: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_key: "key".to_string(),
            children_column_name: "children".to_string(),
            indent_size: 15.0,
            show_header: true,
            use_fixed_header: false,
            scroll: ScrollOptions::default(),
            prefix_cls: "rc-table".to_string(),
            class_name: None,
        }
    }
}

impl TableOptions {
    /// Parse an options object; blank input gives the defaults.
    ///
    /// # Errors
    /// Returns [`crate::error::TableError::Json`] for malformed JSON or
    /// fields of the wrong type.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Head rows live in their own pane, either on request or because the
    /// body scrolls vertically.
    pub fn fixed_header(&self) -> bool {
        self.use_fixed_header || self.scroll.y_enabled()
    }
}
