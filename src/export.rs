//! Static export: paint a [`ChartScene`] to **SVG** or **PNG** with plotters.
//!
//! Bars come from the scene, already in surface pixels, and go straight onto the root
//! drawing area. Axes are a plotters mesh over the scene's scale domains.

use crate::chart::{
    ChartScene, X_AXIS_LABEL, Y_AXIS_LABEL, format_trillions_tick, format_year_tick,
};
use crate::error::ChartError;
use crate::scale::LinearScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::ops::Range;
use std::path::Path;

/// Office blue (#4472C4)
const BAR_COLOR: RGBColor = RGBColor(68, 114, 196);
const TICK_SIZE: i32 = 6;
const TICK_FONT_PX: u32 = 10;
const LABEL_FONT_PX: u32 = 14;
const TITLE_FONT_PX: u32 = 24;

fn draw_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Draw(format!("{:?}", e))
}

/// Write `scene` to `out_path`; `.svg` selects SVG, anything else PNG.
///
/// An empty scene still produces a (blank, titled) image.
pub fn write_chart<P: AsRef<Path>>(
    scene: &ChartScene,
    out_path: P,
    title: Option<&str>,
) -> Result<(), ChartError> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (scene.layout.width, scene.layout.height);

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_scene(root, scene, title)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_scene(root, scene, title)?;
    }
    log::info!("wrote chart to {}", out_path.display());
    Ok(())
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn draw_scene<DB>(
    root: DrawingArea<DB, Shift>,
    scene: &ChartScene,
    title: Option<&str>,
) -> Result<(), ChartError>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(draw_err)?;

    if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
        let style = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            t.to_string(),
            (px(scene.layout.width as f64 / 2.0), 40),
            style,
        ))
        .map_err(draw_err)?;
    }

    for bar in &scene.bars {
        let x0 = px(bar.x);
        let y0 = px(bar.y);
        let x1 = px(bar.x + bar.width);
        let y1 = px(bar.y + bar.height);
        root.draw(&Rectangle::new([(x0, y0), (x1, y1)], BAR_COLOR.filled()))
            .map_err(draw_err)?;
    }

    if let (Some(x), Some(y)) = (scene.x_scale, scene.y_scale) {
        draw_axes(&root, scene, &x, &y)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Plotters maps a zero-width range to a corner; give it a unit of room around the value
/// so it lands mid-axis like the scene does.
fn mesh_range((a, b): (f64, f64)) -> Range<f64> {
    if a == b { (a - 0.5)..(b + 0.5) } else { a..b }
}

/// Axis lines, ticks, tick labels and axis titles. The plotting area is inset by the
/// layout padding on every side so the mesh lines up with the scene's pixel bars.
fn draw_axes<DB>(
    root: &DrawingArea<DB, Shift>,
    scene: &ChartScene,
    x: &LinearScale,
    y: &LinearScale,
) -> Result<(), ChartError>
where
    DB: DrawingBackend,
{
    let layout = &scene.layout;
    let pad = layout.padding;

    let mut chart = ChartBuilder::on(root)
        .margin_top(pad)
        .margin_right(pad)
        .set_label_area_size(LabelAreaPosition::Left, pad)
        .set_label_area_size(LabelAreaPosition::Bottom, pad)
        .build_cartesian_2d(mesh_range(x.domain), mesh_range(y.domain))
        .map_err(draw_err)?;

    let x_label_fmt = |v: &f64| format_year_tick(*v);
    let y_label_fmt = |v: &f64| format_trillions_tick(*v);
    let year_span = (x.domain.1 - x.domain.0).abs().round() as usize;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(Y_AXIS_LABEL)
        .x_labels(layout.ticks.min(year_span + 1))
        .y_labels(layout.ticks)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .set_all_tick_mark_size(TICK_SIZE)
        .label_style((FontFamily::SansSerif, TICK_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, LABEL_FONT_PX))
        .draw()
        .map_err(draw_err)?;
    Ok(())
}
