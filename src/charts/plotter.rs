//! Chart Plotter Module
//! Builds renderer-independent chart data and draws it interactively with egui_plot.

use crate::data::Series;
use crate::state::DisplayMode;
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Corner, Legend, Line, LineStyle, Plot, PlotPoints};

/// Institutional respondents: dark blue
pub const INSTITUTIONAL_COLOR: Color32 = Color32::from_rgb(0x00, 0x35, 0x6B);
/// Individual respondents: coral
pub const INDIVIDUAL_COLOR: Color32 = Color32::from_rgb(0xFF, 0x6B, 0x6B);
pub const LINE_WIDTH: f32 = 2.0;
pub const CHART_HEIGHT: f32 = 600.0;

/// One named line of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: &'static str,
    pub values: Vec<Option<f64>>,
    pub color: Color32,
    pub dashed: bool,
}

/// Everything a renderer needs: title, x labels and the two traces.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub mode: DisplayMode,
    pub dates: Vec<String>,
    pub traces: Vec<Trace>,
}

impl ChartData {
    /// Build chart data from a series already matching `mode`.
    pub fn from_series(title: &str, series: &Series, mode: DisplayMode) -> Self {
        let dashed = mode == DisplayMode::Rolling;
        Self {
            title: title.to_string(),
            mode,
            dates: series.dates.clone(),
            traces: vec![
                Trace {
                    name: "Institutional",
                    values: series.institutional.clone(),
                    color: INSTITUTIONAL_COLOR,
                    dashed,
                },
                Trace {
                    name: "Individual",
                    values: series.individual.clone(),
                    color: INDIVIDUAL_COLOR,
                    dashed,
                },
            ],
        }
    }

    /// Span of plottable dates as x coordinates.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let xs = self.dates.iter().filter_map(|d| ChartPlotter::date_to_x(d));
        xs.fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
    }

    /// Min and max of all present values.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.traces
            .iter()
            .flat_map(|t| t.values.iter().flatten().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Draws confidence index line charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Parse a CSV date. Month-only dates land on the first of the month.
    pub fn parse_date(date: &str) -> Option<NaiveDate> {
        let date = date.trim();
        for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
            if let Ok(d) = NaiveDate::parse_from_str(date, fmt) {
                return Some(d);
            }
        }
        // Timestamps such as "2001-01-31 00:00:00"
        if let Some(day) = date.get(..10) {
            if let Ok(d) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
                return Some(d);
            }
        }
        for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
            let sep = if fmt.contains('/') { '/' } else { '-' };
            if let Ok(d) = NaiveDate::parse_from_str(&format!("{}{}01", date, sep), fmt) {
                return Some(d);
            }
        }
        None
    }

    /// Days since 0001-01-01, used as the x coordinate.
    pub fn to_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    pub fn date_to_x(date: &str) -> Option<f64> {
        Self::parse_date(date).map(Self::to_x)
    }

    pub fn x_to_date(x: f64) -> Option<NaiveDate> {
        if !x.is_finite() || x.abs() > i32::MAX as f64 {
            return None;
        }
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
    }

    /// Axis label for an x coordinate, e.g. "2008-10".
    pub fn x_to_label(x: f64) -> String {
        Self::x_to_date(x)
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_default()
    }

    /// Split a trace into contiguous runs of points. Missing values and
    /// undated rows break the line; points outside `range` are dropped.
    pub fn segments(
        dates: &[String],
        values: &[Option<f64>],
        range: Option<(f64, f64)>,
    ) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for (date, value) in dates.iter().zip(values) {
            let point = match (Self::date_to_x(date), value) {
                (Some(x), Some(y)) if y.is_finite() => Some([x, *y]),
                _ => None,
            };
            match point {
                Some([x, _]) if range.is_some_and(|(lo, hi)| x < lo || x > hi) => {}
                Some(p) => current.push(p),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Draw the interactive line chart limited to the `range` window.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &ChartData, range: (f64, f64), reset: bool) {
        let mut plot = Plot::new("confidence_index_chart")
            .height(CHART_HEIGHT)
            .legend(Legend::default().position(Corner::LeftTop))
            .allow_scroll(false)
            .include_x(range.0)
            .include_x(range.1)
            .x_axis_formatter(|mark, _range| ChartPlotter::x_to_label(mark.value))
            .label_formatter(|name, value| {
                let date = Self::x_to_date(value.x)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                if name.is_empty() {
                    date
                } else {
                    format!("{}\n{}: {:.1}", date, name, value.y)
                }
            });
        if reset {
            plot = plot.reset();
        }

        plot.show(ui, |plot_ui| {
            for trace in &chart.traces {
                for segment in Self::segments(&chart.dates, &trace.values, Some(range)) {
                    let mut line = Line::new(PlotPoints::from(segment))
                        .color(trace.color)
                        .width(LINE_WIDTH)
                        .name(trace.name);
                    if trace.dashed {
                        line = line.style(LineStyle::dashed_loose());
                    }
                    plot_ui.line(line);
                }
            }
        });
    }
}
