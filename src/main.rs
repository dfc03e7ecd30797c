//! Confidence Viewer - Stock Market Confidence Index Viewer
//!
//! Opens the interactive chart window, or with `--export` renders the chart
//! to an image file and exits.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use log::info;
use std::path::Path;

use confidence_viewer::args::Args;
use confidence_viewer::charts::StaticChartRenderer;
use confidence_viewer::config::AppConfig;
use confidence_viewer::data::{DataLoader, DataProcessor};
use confidence_viewer::gui::ConfidenceApp;
use confidence_viewer::state::ViewState;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Render the configured view to `out` without opening a window.
fn export_headless(config: &AppConfig, out: &str) -> Result<()> {
    let rows = DataLoader::load_csv(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let series = DataProcessor::extract_series(&rows, config.initial_view);

    let mut state = ViewState::new(config.initial_view, config.initial_mode);
    state.set_series(config.initial_view, series);
    let chart = state
        .chart_data()
        .ok_or_else(|| anyhow!("no chart data for {}", config.initial_view))?;

    StaticChartRenderer::export(&chart, Path::new(out), config.export_size)?;
    info!("Wrote {} ({:?})", out, config.initial_mode);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = AppConfig::from_args(&args)?;

    if let Some(out) = &args.export {
        return export_headless(&config, out);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Confidence Index Viewer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Confidence Index Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(ConfidenceApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("{}", e))
}
