//! The GDP Chart View: fetch state, derived scene and tooltip, with their lifecycle.
//!
//! Two stages, joined by an explicit hand-off:
//! 1. fetch: [`RecordSource`] → raw records (or the fixed failure message);
//! 2. render: raw records → [`ChartScene`], run from [`ChartView::complete`] when the
//!    records are non-empty.
//!
//! Fetching can happen on another thread. [`ChartView::begin_activation`] hands out an
//! [`Activation`] token and [`ChartView::complete`] ignores tokens that no longer match,
//! so a fetch finishing after the view was re-activated or deactivated changes nothing.

use crate::api::RecordSource;
use crate::chart::{ChartLayout, ChartScene, build_scene};
use crate::error::{FETCH_FAILED_MESSAGE, FetchError};
use crate::models::{NullPolicy, PlotPoint, RawRecord};
use crate::tooltip::Tooltip;

/// Identifies one activation; returned by [`ChartView::begin_activation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    generation: u64,
}

/// Coarse state, for whoever draws the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Never activated, or deactivated.
    Inactive,
    /// Waiting for the fetch.
    Loading,
    /// Fetch (or conversion) failed; only the message is shown.
    Failed,
    /// Fetch succeeded but there is nothing to draw.
    Empty,
    /// A scene is available.
    Charted,
}

#[derive(Debug, Default)]
pub struct ChartView {
    layout: ChartLayout,
    policy: NullPolicy,
    generation: u64,
    active: bool,
    pending: bool,
    fetches: u64,
    records: Vec<RawRecord>,
    error: Option<String>,
    scene: Option<ChartScene>,
    tooltip: Tooltip,
    hovered: Option<usize>,
}

impl ChartView {
    pub fn new(layout: ChartLayout, policy: NullPolicy) -> Self {
        Self {
            layout,
            policy,
            ..Default::default()
        }
    }

    /// Activate synchronously: one fetch through `source`, then render.
    pub fn activate<S: RecordSource + ?Sized>(&mut self, source: &S) {
        let activation = self.begin_activation();
        let outcome = source.fetch_records();
        self.complete(activation, outcome);
    }

    /// Start an activation. Clears whatever the previous one drew; the caller performs
    /// exactly one fetch and passes the outcome to [`complete`](Self::complete).
    pub fn begin_activation(&mut self) -> Activation {
        self.generation += 1;
        self.fetches += 1;
        self.active = true;
        self.pending = true;
        self.clear();
        log::debug!("activation {} started", self.generation);
        Activation {
            generation: self.generation,
        }
    }

    /// Deliver the fetch outcome. Returns `false` if the activation is stale and the
    /// outcome was discarded.
    pub fn complete(
        &mut self,
        activation: Activation,
        outcome: Result<Vec<RawRecord>, FetchError>,
    ) -> bool {
        if !self.pending || activation.generation != self.generation {
            log::warn!(
                "discarding result of stale activation {} (current {})",
                activation.generation,
                self.generation
            );
            return false;
        }
        self.pending = false;

        match outcome {
            Ok(records) => {
                self.records = records;
                if !self.records.is_empty() {
                    self.render();
                }
            }
            Err(e) => {
                log::error!("Error fetching GDP data: {}", e);
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Drop everything and invalidate any fetch still in flight.
    pub fn deactivate(&mut self) {
        self.generation += 1;
        self.active = false;
        self.pending = false;
        self.clear();
    }

    fn clear(&mut self) {
        self.records.clear();
        self.error = None;
        self.scene = None;
        self.tooltip = Tooltip::default();
        self.hovered = None;
    }

    fn render(&mut self) {
        let points = match PlotPoint::from_records(&self.records, self.policy) {
            Ok(points) => points,
            Err(e) => {
                log::error!("cannot chart records: {}", e);
                self.error = Some(e.to_string());
                return;
            }
        };
        // replace, never stack, the previous drawing
        self.tooltip = Tooltip::default();
        self.hovered = None;
        self.scene = Some(build_scene(&points, &self.layout));
    }

    /// Pointer entered bar `index`.
    pub fn pointer_enter(&mut self, index: usize) {
        let Some(bar) = self.scene.as_ref().and_then(|s| s.bars.get(index)) else {
            return;
        };
        self.tooltip.show(&bar.point());
        self.hovered = Some(index);
    }

    /// Pointer moved over the hovered bar; `x` is the pointer's horizontal position.
    pub fn pointer_move(&mut self, x: f64) {
        if self.hovered.is_some() {
            self.tooltip.move_to(x, &self.layout);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip.hide();
        self.hovered = None;
    }

    /// Feed a raw pointer position (surface pixels, `None` when outside the surface) and
    /// translate it into enter / move / leave on the bars.
    pub fn pointer_at(&mut self, pos: Option<(f64, f64)>) {
        let hit = match (pos, self.scene.as_ref()) {
            (Some((x, y)), Some(scene)) => scene.bar_at(x, y),
            _ => None,
        };
        match (self.hovered, hit) {
            (Some(prev), Some(now)) if prev == now => {}
            (Some(_), None) => {
                self.pointer_leave();
                return;
            }
            (_, Some(now)) => {
                if self.hovered.is_some() {
                    self.pointer_leave();
                }
                self.pointer_enter(now);
            }
            (None, None) => return,
        }
        if let Some((x, _)) = pos {
            self.pointer_move(x);
        }
    }

    pub fn state(&self) -> ViewState {
        if !self.active {
            ViewState::Inactive
        } else if self.pending {
            ViewState::Loading
        } else if self.error.is_some() {
            ViewState::Failed
        } else if self.scene.as_ref().is_some_and(|s| !s.is_empty()) {
            ViewState::Charted
        } else {
            ViewState::Empty
        }
    }

    /// Whether the chart container exists at all. It is replaced by the error line
    /// on failure.
    pub fn is_chart_visible(&self) -> bool {
        self.active && self.error.is_none()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn scene(&self) -> Option<&ChartScene> {
        self.scene.as_ref()
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Number of fetches issued over the view's lifetime.
    pub fn fetch_count(&self) -> u64 {
        self.fetches
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn policy(&self) -> NullPolicy {
        self.policy
    }
}
