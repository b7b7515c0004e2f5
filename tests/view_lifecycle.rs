mod common;

use common::{ScriptedSource, records};
use gdp_chart::{ChartLayout, ChartView, FETCH_FAILED_MESSAGE, FetchError, ViewState};

#[test]
fn n_records_make_n_bars_at_scaled_x() {
    let rows = [
        (1990, Some(5.96e12)),
        (2000, Some(1.025e13)),
        (2010, Some(1.5e13)),
        (2020, Some(2.1e13)),
    ];
    let source = ScriptedSource::new(vec![Ok(records(&rows))]);
    let mut view = ChartView::default();
    view.activate(&source);

    assert_eq!(view.state(), ViewState::Charted);
    let scene = view.scene().unwrap();
    assert_eq!(scene.bars.len(), rows.len());

    // x: [1990, 2020] -> [100, 700]
    let x_scale = scene.x_scale.unwrap();
    for (bar, (year, _)) in scene.bars.iter().zip(rows) {
        assert_eq!(bar.year, year);
        assert_eq!(bar.x, x_scale.apply(year as f64));
        assert!((bar.x - (100.0 + (year - 1990) as f64 * 20.0)).abs() < 1e-9);
        assert_eq!(bar.width, 12.0);
    }
}

#[test]
fn failed_fetch_shows_fixed_message_and_no_chart() {
    let source = ScriptedSource::new(vec![Err(FetchError::Status(503))]);
    let mut view = ChartView::default();
    view.activate(&source);

    assert_eq!(view.state(), ViewState::Failed);
    assert_eq!(view.error(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(view.error(), Some("Failed to fetch data"));
    assert!(!view.is_chart_visible());
    assert!(view.scene().is_none());
}

#[test]
fn empty_records_do_not_panic_and_draw_nothing() {
    let source = ScriptedSource::new(vec![Ok(Vec::new())]);
    let mut view = ChartView::default();
    view.activate(&source);

    assert_eq!(view.state(), ViewState::Empty);
    assert!(view.is_chart_visible());
    assert!(view.scene().is_none());
    assert!(view.error().is_none());
}

#[test]
fn only_null_values_yield_an_empty_chart() {
    let source = ScriptedSource::new(vec![Ok(records(&[(2023, None), (2024, None)]))]);
    let mut view = ChartView::default();
    view.activate(&source);

    assert_eq!(view.state(), ViewState::Empty);
    assert_eq!(view.records().len(), 2);
    assert!(view.scene().unwrap().is_empty());
}

#[test]
fn reactivation_fetches_once_and_replaces_bars() {
    let source = ScriptedSource::new(vec![
        Ok(records(&[(2000, Some(1.0e13)), (2001, Some(1.1e13)), (2002, Some(1.2e13))])),
        Ok(records(&[(2010, Some(1.5e13)), (2011, Some(1.55e13))])),
    ]);
    let mut view = ChartView::default();

    view.activate(&source);
    assert_eq!(source.calls.get(), 1);
    assert_eq!(view.scene().unwrap().bars.len(), 3);

    // hover something so there is overlay state to clear
    view.pointer_enter(0);
    assert!(view.tooltip().is_visible());

    let activation = view.begin_activation();
    // previous drawing is gone before the new data arrives
    assert!(view.scene().is_none());
    assert!(!view.tooltip().is_visible());
    assert_eq!(view.state(), ViewState::Loading);

    use gdp_chart::RecordSource;
    let outcome = source.fetch_records();
    assert!(view.complete(activation, outcome));

    assert_eq!(source.calls.get(), 2);
    assert_eq!(view.fetch_count(), 2);
    let bars = &view.scene().unwrap().bars;
    assert_eq!(bars.len(), 2);
    assert!(bars.iter().all(|b| b.year >= 2010));
}

#[test]
fn success_after_failure_clears_error() {
    let source = ScriptedSource::new(vec![
        Err(FetchError::Status(500)),
        Ok(records(&[(2020, Some(2.1e13))])),
    ]);
    let mut view = ChartView::new(ChartLayout::default(), Default::default());
    view.activate(&source);
    assert_eq!(view.state(), ViewState::Failed);
    view.activate(&source);
    assert_eq!(view.state(), ViewState::Charted);
    assert!(view.error().is_none());
}

#[test]
fn deactivate_discards_everything() {
    let source = ScriptedSource::new(vec![Ok(records(&[(2020, Some(2.1e13))]))]);
    let mut view = ChartView::default();
    view.activate(&source);
    view.pointer_enter(0);
    view.deactivate();

    assert_eq!(view.state(), ViewState::Inactive);
    assert!(view.records().is_empty());
    assert!(view.scene().is_none());
    assert!(!view.tooltip().is_visible());
    assert!(!view.is_chart_visible());
}
