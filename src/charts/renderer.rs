//! Static Chart Renderer
//! Writes the current chart to SVG or PNG with plotters.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Legend in the upper left corner
//! 3. Dated x axis, auto-ranged y axis, light grid
//! 4. Solid lines for raw values, dashed lines for rolling averages

use crate::charts::{ChartData, ChartPlotter};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const GRID: RGBColor = RGBColor(0xE5, 0xE5, 0xE5);
const AXIS: RGBColor = RGBColor(0xCC, 0xCC, 0xCC);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: no dated values in chart")]
    Empty,
    #[error("Unsupported export format: {0:?} (use .svg or .png)")]
    Format(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ExportError {
    ExportError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub const DEFAULT_SIZE: (u32, u32) = (700, 500);
    pub const DEFAULT_FILE_NAME: &'static str = "yale_confidence_index.svg";

    /// Render to `path`, picking the backend from the file extension.
    pub fn export(chart: &ChartData, path: &Path, size: (u32, u32)) -> Result<(), ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Self::render_svg(chart, path, size),
            "png" => Self::render_png(chart, path, size),
            _ => Err(ExportError::Format(ext.clone())),
        }?;
        info!("Exported chart to {}", path.display());
        Ok(())
    }

    pub fn render_svg(chart: &ChartData, path: &Path, size: (u32, u32)) -> Result<(), ExportError> {
        let root = SVGBackend::new(path, size).into_drawing_area();
        Self::draw(&root, chart)
    }

    pub fn render_png(chart: &ChartData, path: &Path, size: (u32, u32)) -> Result<(), ExportError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        Self::draw(&root, chart)
    }

    /// Axis bounds: dated span on x, present values padded by 5% on y.
    pub fn bounds(chart: &ChartData) -> Option<((f64, f64), (f64, f64))> {
        let (x0, x1) = chart.x_range()?;
        let (y0, y1) = chart.y_range()?;
        let x1 = if x1 > x0 { x1 } else { x0 + 31.0 };
        let pad = if y1 > y0 { (y1 - y0) * 0.05 } else { 1.0 };
        Some(((x0, x1), (y0 - pad, y1 + pad)))
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &ChartData,
    ) -> Result<(), ExportError> {
        let ((x0, x1), (y0, y1)) = Self::bounds(chart).ok_or(ExportError::Empty)?;

        root.fill(&WHITE).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .light_line_style(&GRID)
            .bold_line_style(&GRID)
            .axis_style(&AXIS)
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&|x| ChartPlotter::x_to_label(*x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()
            .map_err(draw_err)?;

        for trace in &chart.traces {
            let color = RGBColor(trace.color.r(), trace.color.g(), trace.color.b());
            let style = color.stroke_width(2);
            let segments = ChartPlotter::segments(&chart.dates, &trace.values, None);

            for (i, segment) in segments.iter().enumerate() {
                let points = segment.iter().map(|p| (p[0], p[1]));
                let anno = if trace.dashed {
                    ctx.draw_series(DashedLineSeries::new(points, 8, 5, style))
                } else {
                    ctx.draw_series(LineSeries::new(points, style))
                }
                .map_err(draw_err)?;

                // One legend entry per trace, not per segment
                if i == 0 {
                    anno.label(trace.name).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], style)
                    });
                }
            }
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&AXIS)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}
