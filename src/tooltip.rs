//! Hover tooltip owned by the chart view.
//!
//! The tooltip is an overlay that lives and dies with its [`crate::view::ChartView`];
//! nothing is attached outside the chart.

use crate::chart::{ChartLayout, TRILLION};
use crate::models::PlotPoint;

/// Horizontal gap between the pointer and the tooltip's left edge.
pub const POINTER_OFFSET_X: f64 = 70.0;
/// The tooltip's top edge sits this far above the bottom of the surface.
pub const BOTTOM_OFFSET_Y: f64 = 100.0;

const LINE_BREAK: &str = "<br>";

/// `Year: 2020<br>GDP: $21.00T`
pub fn tooltip_html(p: &PlotPoint) -> String {
    format!("Year: {}<br>GDP: ${:.2}T", p.year, p.value / TRILLION)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    visible: bool,
    html: String,
    data_date: Option<i32>,
    left: f64,
    top: f64,
}

impl Tooltip {
    /// Pointer entered a bar.
    pub fn show(&mut self, p: &PlotPoint) {
        self.visible = true;
        self.html = tooltip_html(p);
        self.data_date = Some(p.year);
    }

    /// Pointer moved. Only the horizontal position tracks the pointer.
    pub fn move_to(&mut self, pointer_x: f64, layout: &ChartLayout) {
        self.top = layout.height as f64 - BOTTOM_OFFSET_Y;
        self.left = pointer_x + POINTER_OFFSET_X;
    }

    /// Pointer left the bar. Content is kept; only visibility changes.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Content split at the markup line breaks, for renderers without HTML.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.html.split(LINE_BREAK)
    }

    pub fn data_date(&self) -> Option<i32> {
        self.data_date
    }

    /// `(left, top)` in surface pixels.
    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }
}
