/*!
 * Desktop viewer for gdp-chart
 *
 * Activates the GDP chart view once at start-up:
 * - fetches the series on a background thread
 * - draws the bars, axes and labels
 * - shows a tooltip for the bar under the pointer
 *
 * "Reload" re-activates the view; "Export" writes the current chart to SVG/PNG.
 */

use eframe::egui;
use egui::{Align2, Color32, FontId, Stroke};
use gdp_chart::chart::{Axis, AxisOrient};
use gdp_chart::export;
use gdp_chart::view::Activation;
use gdp_chart::{ChartView, Client, FetchError, RawRecord, SourceConfig, ViewState};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

const TITLE: &str = "United States GDP";
const BAR_COLOR: Color32 = Color32::from_rgb(68, 114, 196);
const BAR_HOVER_COLOR: Color32 = Color32::from_rgb(237, 125, 49);
const TICK_SIZE: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([860.0, 640.0])
            .with_min_inner_size([840.0, 620.0])
            .with_title("United States GDP - gdp-chart"),
        ..Default::default()
    };

    eframe::run_native(
        "GDP Chart",
        options,
        Box::new(|_cc| Ok(Box::new(GdpApp::new(SourceConfig::default())))),
    )
}

type FetchOutcome = Result<Vec<RawRecord>, FetchError>;

/// Main application state
struct GdpApp {
    config: SourceConfig,
    view: ChartView,

    // Fetch in flight
    pending: Option<(Activation, mpsc::Receiver<FetchOutcome>)>,

    status_message: String,
    export_error: String,
}

impl GdpApp {
    fn new(config: SourceConfig) -> Self {
        let mut app = Self {
            config,
            view: ChartView::default(),
            pending: None,
            status_message: String::new(),
            export_error: String::new(),
        };
        app.activate();
        app
    }

    /// Start one fetch on a background thread. Any earlier fetch still running is
    /// orphaned: its activation token is stale once this one begins.
    fn activate(&mut self) {
        let activation = self.view.begin_activation();
        self.status_message.clear();
        self.export_error.clear();

        let (sender, receiver) = mpsc::channel();
        let config = self.config.clone();
        thread::spawn(move || {
            let outcome = Client::new(config).and_then(|c| c.fetch_records());
            let _ = sender.send(outcome);
        });
        self.pending = Some((activation, receiver));
    }

    fn check_fetch_result(&mut self) {
        let Some((activation, receiver)) = &self.pending else {
            return;
        };
        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(FetchError::Aborted),
        };
        let activation = *activation;
        self.pending = None;
        self.view.complete(activation, outcome);
    }

    fn export(&mut self) {
        let Some(scene) = self.view.scene() else {
            return;
        };
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start_dir)
            .set_file_name("gdp_chart.svg")
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };
        match export::write_chart(scene, &path, Some(TITLE)) {
            Ok(()) => {
                self.status_message = format!("Chart written to {}", path.display());
                self.export_error.clear();
            }
            Err(err) => {
                self.export_error = format!("Failed to export chart: {}", err);
                self.status_message.clear();
            }
        }
    }

    /// Draw the chart surface and route pointer movement to the view.
    fn chart_ui(&mut self, ui: &mut egui::Ui) {
        let layout = *self.view.layout();
        let size = egui::vec2(layout.width as f32, layout.height as f32);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
        let origin = rect.min;
        let to_screen = |x: f64, y: f64| egui::pos2(origin.x + x as f32, origin.y + y as f32);

        let pointer = response
            .hover_pos()
            .map(|p| ((p.x - origin.x) as f64, (p.y - origin.y) as f64));
        self.view.pointer_at(pointer);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let Some(scene) = self.view.scene() else {
            return;
        };
        let hovered = self.view.hovered();

        for (i, bar) in scene.bars.iter().enumerate() {
            let r = egui::Rect::from_min_size(
                to_screen(bar.x, bar.y),
                egui::vec2(bar.width as f32, bar.height as f32),
            );
            let color = if hovered == Some(i) {
                BAR_HOVER_COLOR
            } else {
                BAR_COLOR
            };
            painter.rect_filled(r, 0.0, color);
        }

        for axis in [&scene.x_axis, &scene.y_axis].into_iter().flatten() {
            paint_axis(&painter, axis, origin);
        }

        for label in &scene.labels {
            let (x, y) = label.position();
            let center = to_screen(x, y);
            if label.rotate_deg == 0.0 {
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    &label.text,
                    FontId::proportional(14.0),
                    Color32::BLACK,
                );
            } else {
                let galley = painter.layout_no_wrap(
                    label.text.clone(),
                    FontId::proportional(14.0),
                    Color32::BLACK,
                );
                let (w, h) = (galley.size().x, galley.size().y);
                let angle = (label.rotate_deg as f32).to_radians();
                // rotation pivots on the galley's top-left corner
                let pos = egui::pos2(center.x - h / 2.0, center.y + w / 2.0);
                painter.add(
                    egui::epaint::TextShape::new(pos, galley, Color32::BLACK).with_angle(angle),
                );
            }
        }

        let tooltip = self.view.tooltip();
        if tooltip.is_visible() {
            let (left, top) = tooltip.position();
            egui::Area::new(egui::Id::new("gdp-chart-tooltip"))
                .order(egui::Order::Tooltip)
                .fixed_pos(to_screen(left, top))
                .interactable(false)
                .show(ui.ctx(), |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        for line in tooltip.lines() {
                            ui.label(line);
                        }
                    });
                });
        }
    }
}

fn paint_axis(painter: &egui::Painter, axis: &Axis, origin: egui::Pos2) {
    let stroke = Stroke::new(1.0, Color32::BLACK);
    let font = FontId::proportional(11.0);
    let tx = origin.x + axis.translate.0 as f32;
    let ty = origin.y + axis.translate.1 as f32;
    let (a, b) = (axis.extent.0 as f32, axis.extent.1 as f32);

    match axis.orient {
        AxisOrient::Bottom => {
            painter.line_segment([egui::pos2(tx + a, ty), egui::pos2(tx + b, ty)], stroke);
            for tick in &axis.ticks {
                let x = tx + tick.pos as f32;
                painter.line_segment([egui::pos2(x, ty), egui::pos2(x, ty + TICK_SIZE)], stroke);
                painter.text(
                    egui::pos2(x, ty + TICK_SIZE + TICK_PADDING),
                    Align2::CENTER_TOP,
                    &tick.label,
                    font.clone(),
                    Color32::BLACK,
                );
            }
        }
        AxisOrient::Left => {
            painter.line_segment([egui::pos2(tx, ty + a), egui::pos2(tx, ty + b)], stroke);
            for tick in &axis.ticks {
                let y = ty + tick.pos as f32;
                painter.line_segment([egui::pos2(tx - TICK_SIZE, y), egui::pos2(tx, y)], stroke);
                painter.text(
                    egui::pos2(tx - TICK_SIZE - TICK_PADDING, y),
                    Align2::RIGHT_CENTER,
                    &tick.label,
                    font.clone(),
                    Color32::BLACK,
                );
            }
        }
    }
}

impl eframe::App for GdpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a completed fetch
        self.check_fetch_result();

        // Keep polling while the fetch runs (and animate the spinner)
        if self.pending.is_some() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            ui.add_space(10.0);

            let state = self.view.state();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(state != ViewState::Loading, egui::Button::new("Reload"))
                    .clicked()
                {
                    self.activate();
                }
                if ui
                    .add_enabled(state == ViewState::Charted, egui::Button::new("Export…"))
                    .clicked()
                {
                    self.export();
                }
                if state == ViewState::Loading {
                    ui.spinner();
                    ui.label("Fetching data from World Bank API...");
                }
            });
            ui.add_space(10.0);

            match self.view.error() {
                Some(error) => {
                    ui.colored_label(Color32::RED, error);
                }
                None => {
                    if self.view.state() == ViewState::Empty {
                        ui.label("No data returned for this series.");
                    }
                    self.chart_ui(ui);
                }
            }

            ui.add_space(10.0);
            if !self.status_message.is_empty() {
                ui.colored_label(Color32::DARK_GREEN, &self.status_message);
            }
            if !self.export_error.is_empty() {
                ui.colored_label(Color32::RED, &self.export_error);
            }
        });
    }
}
