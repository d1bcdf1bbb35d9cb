//! Native scrollbar measurement.
//!
//! When the body scrolls vertically the header pane gets a negative bottom
//! margin of one scrollbar width, so the hidden horizontal scrollbar of the
//! head pane does not show as a gap.

use serde::Serialize;

pub trait ScrollbarMeasure {
    /// Width of a native scrollbar in CSS pixels (0 for overlay scrollbars)
    fn scrollbar_width(&self) -> f64;
}

/// A known scrollbar width, for hosts without a DOM and for tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedScrollbar(pub f64);

impl ScrollbarMeasure for FixedScrollbar {
    fn scrollbar_width(&self) -> f64 {
        self.0
    }
}

/// Style adjustment of the fixed header pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadCompensation {
    pub margin_bottom: String,
    pub padding_bottom: String,
}

pub fn head_compensation(scrollbar_width: f64) -> Option<HeadCompensation> {
    (scrollbar_width > 0.0).then(|| HeadCompensation {
        margin_bottom: format!("-{scrollbar_width}px"),
        padding_bottom: "0px".to_string(),
    })
}
