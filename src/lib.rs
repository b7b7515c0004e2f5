//! gdp_chart
//!
//! Fetch a country's GDP series from the World Bank Indicators API and draw it as a
//! bar chart with hover tooltips. Pairs with the `gdp-chart` CLI and the
//! `gdp-chart-gui` desktop viewer.
//!
//! ### Pipeline
//! - [`api`]: one GET, returning the raw records (second element of the API envelope)
//! - [`models`]: raw records → `(year, value)` plot points
//! - [`chart`]: plot points → scales, bars, axes and labels (a [`ChartScene`])
//! - [`view`]: the activation lifecycle tying the two together, plus the tooltip
//! - [`export`]: paint a scene to SVG/PNG
//!
//! ### Example
//! ```no_run
//! use gdp_chart::{ChartView, Client};
//!
//! let mut view = ChartView::default();
//! view.activate(&Client::default());
//! if let Some(scene) = view.scene() {
//!     gdp_chart::export::write_chart(scene, "gdp.svg", Some("United States GDP"))?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod error;
pub mod export;
pub mod models;
pub mod scale;
pub mod stats;
pub mod storage;
pub mod tooltip;
pub mod view;

pub use api::{Client, RecordSource, SourceConfig};
pub use chart::{ChartLayout, ChartScene};
pub use error::{ChartError, FETCH_FAILED_MESSAGE, FetchError};
pub use models::{NullPolicy, PlotPoint, RawRecord};
pub use view::{ChartView, ViewState};
