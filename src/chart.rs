//! Render step: plot points in, draw commands out.
//!
//! [`build_scene`] does no drawing itself. It computes the scales and produces a
//! [`ChartScene`] (bars, two axes, two labels) in surface pixel coordinates, which the
//! GUI paints with egui and [`crate::export`] paints with plotters.

use crate::models::PlotPoint;
use crate::scale::LinearScale;

/// Raw GDP values are in dollars; axes and tooltips speak trillions.
pub const TRILLION: f64 = 1e12;

pub const X_AXIS_LABEL: &str = "Year";
pub const Y_AXIS_LABEL: &str = "GDP (in trillions)";

/// Fixed geometry of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub bar_width: u32,
    /// Approximate tick count per axis
    pub ticks: usize,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            padding: 100,
            bar_width: 12,
            ticks: 10,
        }
    }
}

/// One bar; `(x, y)` is its top-left corner. Carries the year and raw value it encodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub year: i32,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bar {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn point(&self) -> PlotPoint {
        PlotPoint {
            year: self.year,
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Offset along the axis, in surface pixels.
    pub pos: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub id: &'static str,
    pub orient: AxisOrient,
    /// Translation of the axis group on the surface.
    pub translate: (f64, f64),
    /// Extent of the axis line along its direction.
    pub extent: (f64, f64),
    pub ticks: Vec<Tick>,
}

/// Static text. `x`/`y` are in the label's own frame, rotated by `rotate_deg`
/// about the surface origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotate_deg: f64,
}

impl TextLabel {
    /// Anchor point on the surface after applying the rotation.
    pub fn position(&self) -> (f64, f64) {
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        let px = self.x * cos - self.y * sin;
        let py = self.x * sin + self.y * cos;
        (snap(px), snap(py))
    }
}

// sin/cos of right angles leave ~1e-14 residue
fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < 1e-9 { r } else { v }
}

/// Everything the render step draws.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub layout: ChartLayout,
    pub x_scale: Option<LinearScale>,
    pub y_scale: Option<LinearScale>,
    pub bars: Vec<Bar>,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub labels: Vec<TextLabel>,
}

impl ChartScene {
    fn blank(layout: ChartLayout) -> Self {
        Self {
            layout,
            x_scale: None,
            y_scale: None,
            bars: Vec::new(),
            x_axis: None,
            y_axis: None,
            labels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Index of the bar under a surface point. Later bars win, as they are drawn on top.
    pub fn bar_at(&self, px: f64, py: f64) -> Option<usize> {
        self.bars.iter().rposition(|b| b.contains(px, py))
    }
}

/// Year ticks print as plain integers.
pub fn format_year_tick(v: f64) -> String {
    (v.round() as i64).to_string()
}

/// Value ticks print the raw value divided by 1e12, without a unit.
pub fn format_trillions_tick(v: f64) -> String {
    format!("{}", v / TRILLION)
}

/// Build the draw commands for `points` on `layout`.
///
/// An empty slice produces an empty scene (no bars, no axes) rather than failing.
pub fn build_scene(points: &[PlotPoint], layout: &ChartLayout) -> ChartScene {
    let mut scene = ChartScene::blank(*layout);
    let (Some(min_year), Some(max_year)) = (
        points.iter().map(|p| p.year).min(),
        points.iter().map(|p| p.year).max(),
    ) else {
        return scene;
    };
    let max_val = points
        .iter()
        .map(|p| p.value)
        .fold(f64::NEG_INFINITY, f64::max);

    let w = layout.width as f64;
    let h = layout.height as f64;
    let pad = layout.padding as f64;

    let x_scale = LinearScale::new((min_year as f64, max_year as f64), (pad, w - pad));
    let y_scale = LinearScale::new((0.0, max_val), (h - pad, pad));

    scene.bars = points
        .iter()
        .map(|p| {
            let y = y_scale.apply(p.value);
            Bar {
                year: p.year,
                value: p.value,
                x: x_scale.apply(p.year as f64),
                y,
                width: layout.bar_width as f64,
                height: h - pad - y,
            }
        })
        .collect();

    scene.x_axis = Some(Axis {
        id: "x-axis",
        orient: AxisOrient::Bottom,
        translate: (0.0, h - pad),
        extent: x_scale.range,
        ticks: x_scale
            .year_ticks(layout.ticks)
            .into_iter()
            .map(|v| Tick {
                value: v,
                pos: x_scale.apply(v),
                label: format_year_tick(v),
            })
            .collect(),
    });
    scene.y_axis = Some(Axis {
        id: "y-axis",
        orient: AxisOrient::Left,
        translate: (pad, 0.0),
        extent: (y_scale.range.1, y_scale.range.0),
        ticks: y_scale
            .ticks(layout.ticks)
            .into_iter()
            .map(|v| Tick {
                value: v,
                pos: y_scale.apply(v),
                label: format_trillions_tick(v),
            })
            .collect(),
    });

    scene.labels = vec![
        TextLabel {
            text: X_AXIS_LABEL.into(),
            x: w / 2.0,
            y: h - 50.0,
            rotate_deg: 0.0,
        },
        TextLabel {
            text: Y_AXIS_LABEL.into(),
            x: -h / 2.0,
            y: 50.0,
            rotate_deg: -90.0,
        },
    ];

    scene.x_scale = Some(x_scale);
    scene.y_scale = Some(y_scale);
    log::debug!(
        "built scene: {} bars, years {}..={}",
        scene.bars.len(),
        min_year,
        max_year
    );
    scene
}
