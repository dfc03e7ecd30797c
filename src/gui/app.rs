//! Confidence Viewer Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartPlotter, StaticChartRenderer};
use crate::config::AppConfig;
use crate::data::{DataLoader, DataProcessor, Series};
use crate::downloads::Download;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::state::ViewState;
use crate::views::IndexSelector;
use chrono::NaiveDate;
use egui::SidePanel;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Complete {
        selector: IndexSelector,
        series: Series,
    },
    Error(String),
}

/// Main application window.
pub struct ConfidenceApp {
    config: AppConfig,
    state: ViewState,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl ConfidenceApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self::with_config(config);
        app.start_load(app.state.selector());
        app
    }

    fn with_config(config: AppConfig) -> Self {
        let range_start = ChartPlotter::parse_date(&config.range_start)
            .or_else(|| NaiveDate::from_ymd_opt(2001, 1, 1))
            .unwrap_or_default();
        Self {
            state: ViewState::new(config.initial_view, config.initial_mode),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(range_start),
            load_rx: None,
            config,
        }
    }

    /// Load the CSV and extract `selector` in a background thread.
    /// Replacing the receiver drops any load still in flight.
    fn start_load(&mut self, selector: IndexSelector) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.control_panel.is_loading = true;
        self.control_panel.set_status("Loading data...");

        let path = self.config.data_path.clone();
        info!("Loading {} for {}", path.display(), selector);

        thread::spawn(move || {
            let result = match DataLoader::load_csv(&path) {
                Ok(rows) => LoadResult::Complete {
                    selector,
                    series: DataProcessor::extract_series(&rows, selector),
                },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results. The spinner runs exactly while a
    /// receiver is pending.
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(LoadResult::Complete { selector, series }) => {
                let rows = series.len();
                if self.state.set_series(selector, series) {
                    self.chart_viewer.request_reset();
                    self.control_panel
                        .set_status(&format!("Loaded {} months", rows));
                } else {
                    debug!("Discarding stale series for {}", selector);
                }
            }
            Ok(LoadResult::Error(e)) => {
                error!("Failed to load data: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
            Err(TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                error!("Loader thread exited without a result");
                self.control_panel.set_status("Error: loader stopped");
            }
        }
        self.control_panel.is_loading = self.load_rx.is_some();
    }

    fn handle_select_view(&mut self, id: &str) {
        match self.state.select_view(id) {
            Ok(selector) => self.start_load(selector),
            Err(e) => {
                error!("{}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_toggle_smoothing(&mut self) {
        self.state.toggle_smoothing();
        self.chart_viewer.request_reset();
    }

    /// Export the chart as currently displayed to SVG or PNG.
    fn handle_export_chart(&mut self) {
        let Some(chart) = self.state.chart_data() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .add_filter("PNG Image", &["png"])
            .set_file_name(StaticChartRenderer::DEFAULT_FILE_NAME)
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::export(&chart, &path, self.config.export_size) {
            Ok(()) => self
                .control_panel
                .set_status(&format!("Chart saved to {}", path.display())),
            Err(e) => {
                warn!("Chart export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_download(&mut self, download: Download) {
        let (filter_name, extensions) = download.filter();
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter_name, extensions)
            .set_file_name(download.download_name())
            .save_file()
        else {
            return;
        };

        match download.save_to(&self.config.asset_dir, &dest) {
            Ok(_) => self
                .control_panel
                .set_status(&format!("Saved {}", dest.display())),
            Err(e) => {
                warn!("Download failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_open_questionnaire(&mut self) {
        let path: PathBuf = Download::Questionnaire.source_path(&self.config.asset_dir);
        if !path.is_file() {
            self.control_panel
                .set_status(&format!("Error: {} not found", path.display()));
            return;
        }
        if let Err(e) = open::that(&path) {
            warn!("Failed to open {}: {}", path.display(), e);
            self.control_panel.set_status(&format!("Error: {}", e));
        }
    }
}

impl eframe::App for ConfidenceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.control_panel.is_loading {
            ctx.request_repaint();
        }

        let chart = self.state.chart_data();
        self.control_panel.export_enabled = chart.is_some();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action =
                        self.control_panel
                            .show(ui, self.state.selector(), self.state.mode());

                    match action {
                        ControlPanelAction::SelectView(id) => self.handle_select_view(&id),
                        ControlPanelAction::ToggleSmoothing => self.handle_toggle_smoothing(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::Download(download) => self.handle_download(download),
                        ControlPanelAction::OpenQuestionnaire => self.handle_open_questionnaire(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, self.state.selector(), chart.as_ref());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::Sender;

    fn loading_app() -> (ConfidenceApp, Sender<LoadResult>) {
        let mut app = ConfidenceApp::with_config(AppConfig::default());
        let (tx, rx) = channel();
        app.load_rx = Some(rx);
        app.control_panel.is_loading = true;
        (app, tx)
    }

    fn series() -> Series {
        Series {
            dates: vec!["2001-01".to_string(), "2001-02".to_string()],
            institutional: vec![Some(80.0), None],
            individual: vec![Some(70.0), Some(71.0)],
        }
    }

    #[test]
    fn test_pending_load_keeps_receiver() {
        let (mut app, _tx) = loading_app();
        app.check_load_results();
        assert!(app.load_rx.is_some());
        assert!(app.control_panel.is_loading);
    }

    #[test]
    fn test_dead_loader_is_reported() {
        let (mut app, tx) = loading_app();
        drop(tx);
        app.check_load_results();
        assert!(app.load_rx.is_none());
        assert!(!app.control_panel.is_loading);
        assert_eq!(app.control_panel.status, "Error: loader stopped");
    }

    #[test]
    fn test_completed_load_installs_series() {
        let (mut app, tx) = loading_app();
        tx.send(LoadResult::Complete {
            selector: IndexSelector::OneYear,
            series: series(),
        })
        .unwrap();
        app.check_load_results();
        assert!(!app.control_panel.is_loading);
        assert_eq!(app.control_panel.status, "Loaded 2 months");
        assert!(app.state.chart_data().is_some());
    }

    #[test]
    fn test_stale_series_is_discarded() {
        let (mut app, tx) = loading_app();
        tx.send(LoadResult::Complete {
            selector: IndexSelector::Crash,
            series: series(),
        })
        .unwrap();
        app.check_load_results();
        assert!(app.state.current().is_none());
        assert_eq!(app.control_panel.is_loading, app.load_rx.is_some());
        assert_ne!(app.control_panel.status, "Loaded 2 months");
    }

    #[test]
    fn test_load_error_reaches_status() {
        let (mut app, tx) = loading_app();
        tx.send(LoadResult::Error("Failed to read data.csv".to_string()))
            .unwrap();
        app.check_load_results();
        assert!(!app.control_panel.is_loading);
        assert_eq!(app.control_panel.status, "Error: Failed to read data.csv");
    }
}
