use gdp_chart::chart::{AxisOrient, ChartLayout, build_scene, format_trillions_tick};
use gdp_chart::models::{NullPolicy, PlotPoint, RawRecord};
use gdp_chart::tooltip::tooltip_html;

fn us_like_series() -> Vec<PlotPoint> {
    // roughly the shape of the real series, newest first like the API
    (1974..=2023)
        .rev()
        .map(|year| PlotPoint {
            year,
            value: 1.5e12 + (year - 1974) as f64 * 5.2e11,
        })
        .collect()
}

#[test]
fn tooltip_for_2020_record() {
    let rec = RawRecord::new("2020", Some(2.1e13));
    let points = PlotPoint::from_records(&[rec], NullPolicy::Skip).unwrap();
    assert_eq!(tooltip_html(&points[0]), "Year: 2020<br>GDP: $21.00T");
}

#[test]
fn y_tick_labels_are_value_over_1e12() {
    let scene = build_scene(&us_like_series(), &ChartLayout::default());
    let y_axis = scene.y_axis.as_ref().unwrap();
    assert_eq!(y_axis.orient, AxisOrient::Left);
    assert_eq!(y_axis.id, "y-axis");
    assert!(!y_axis.ticks.is_empty());
    for tick in &y_axis.ticks {
        assert_eq!(tick.label, format!("{}", tick.value / 1e12));
        assert_eq!(tick.label, format_trillions_tick(tick.value));
        assert!(!tick.label.ends_with('T'));
    }
    assert_eq!(y_axis.ticks[0].label, "0");
    assert_eq!(y_axis.ticks[0].pos, 400.0);
    assert_eq!(y_axis.translate, (100.0, 0.0));
}

#[test]
fn x_ticks_are_integer_years_on_the_bottom_axis() {
    let scene = build_scene(&us_like_series(), &ChartLayout::default());
    let x_axis = scene.x_axis.as_ref().unwrap();
    assert_eq!(x_axis.orient, AxisOrient::Bottom);
    assert_eq!(x_axis.translate, (0.0, 400.0));
    let labels: Vec<&str> = x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["1975", "1980", "1985", "1990", "1995", "2000", "2005", "2010", "2015", "2020"]
    );
}

#[test]
fn bars_rest_on_the_x_axis() {
    let layout = ChartLayout::default();
    let scene = build_scene(&us_like_series(), &layout);
    assert_eq!(scene.bars.len(), 50);
    for bar in &scene.bars {
        assert!((bar.y + bar.height - 400.0).abs() < 1e-9);
        assert!(bar.x >= 100.0 && bar.x <= 700.0);
    }
    // the tallest bar reaches the top padding
    let top = scene.bars.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
    assert_eq!(top, 100.0);
}

#[test]
fn custom_layout_is_respected() {
    let layout = ChartLayout {
        width: 400,
        height: 300,
        padding: 50,
        bar_width: 4,
        ticks: 5,
    };
    let scene = build_scene(
        &[
            PlotPoint {
                year: 2000,
                value: 1.0,
            },
            PlotPoint {
                year: 2010,
                value: 2.0,
            },
        ],
        &layout,
    );
    assert_eq!(scene.bars[0].x, 50.0);
    assert_eq!(scene.bars[1].x, 350.0);
    assert_eq!(scene.bars[1].y, 50.0);
    assert_eq!(scene.bars[1].width, 4.0);
    assert_eq!(scene.labels[0].position(), (200.0, 250.0));
}
