use serde::{Deserialize, Serialize};

/// Horizontal scroll affordance state of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPosition {
    #[default]
    Left,
    Middle,
    Right,
}

impl ScrollPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

/// The two independently scrollable panes of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    /// Fixed header pane, present only in fixed-header mode
    Head,
    Body,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Self::Head => Self::Body,
            Self::Body => Self::Head,
        }
    }
}
