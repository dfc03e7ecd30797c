//! Chart Viewer Widget
//! Central panel: title, date window, the interactive chart and the
//! collapsible question / calculation notes.

use crate::charts::{ChartData, ChartPlotter};
use crate::views::{IndexSelector, QuestionItems};
use chrono::{Local, NaiveDate};
use egui::{RichText, ScrollArea};

/// Central chart display area.
pub struct ChartViewer {
    /// Visible date window as x coordinates (days since CE)
    pub range: (f64, f64),
    range_start: f64,
    reset_pending: bool,
}

impl ChartViewer {
    pub fn new(range_start: NaiveDate) -> Self {
        Self {
            range: (
                ChartPlotter::to_x(range_start),
                ChartPlotter::to_x(Local::now().date_naive()),
            ),
            range_start: ChartPlotter::to_x(range_start),
            reset_pending: true,
        }
    }

    /// Re-fit the plot on the next frame (new data or mode).
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    /// Slider bounds: earliest of data start and default start, up to today.
    fn slider_bounds(&self, chart: Option<&ChartData>) -> (f64, f64) {
        let today = ChartPlotter::to_x(Local::now().date_naive());
        let first = chart
            .and_then(ChartData::x_range)
            .map(|(lo, _)| lo)
            .unwrap_or(self.range_start)
            .min(self.range_start);
        (first, today.max(self.range.1))
    }

    pub fn show(&mut self, ui: &mut egui::Ui, selector: IndexSelector, chart: Option<&ChartData>) {
        ui.heading(RichText::new(selector.title()).size(22.0).strong());
        ui.add_space(8.0);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                match chart {
                    Some(chart) => self.draw_chart(ui, chart),
                    None => {
                        ui.add_space(40.0);
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new("No Data").size(20.0));
                        });
                        ui.add_space(40.0);
                    }
                }

                ui.add_space(10.0);
                Self::draw_notes(ui, selector);
            });
    }

    fn draw_chart(&mut self, ui: &mut egui::Ui, chart: &ChartData) {
        let (min, max) = self.slider_bounds(Some(chart));
        let before = self.range;

        ui.horizontal(|ui| {
            ui.label("From");
            ui.add(
                egui::Slider::new(&mut self.range.0, min..=max)
                    .show_value(true)
                    .custom_formatter(|v, _| ChartPlotter::x_to_label(v)),
            );
            ui.label("To");
            ui.add(
                egui::Slider::new(&mut self.range.1, min..=max)
                    .show_value(true)
                    .custom_formatter(|v, _| ChartPlotter::x_to_label(v)),
            );
        });
        if self.range.0 > self.range.1 {
            std::mem::swap(&mut self.range.0, &mut self.range.1);
        }
        if self.range != before {
            self.reset_pending = true;
        }

        ui.add_space(6.0);
        ChartPlotter::draw_line_chart(ui, chart, self.range, self.reset_pending);
        self.reset_pending = false;
    }

    fn draw_notes(ui: &mut egui::Ui, selector: IndexSelector) {
        let info = selector.info();
        egui::CollapsingHeader::new(RichText::new("Question & Calculation").size(14.0).strong())
            .id_salt("calculation_notes")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(RichText::new("Question:").strong());
                ui.label(info.question);
                match info.items {
                    QuestionItems::None => {}
                    QuestionItems::Bulleted(items) => {
                        for item in items {
                            ui.label(format!("  • {}", item));
                        }
                    }
                    QuestionItems::Numbered(items) => {
                        for (i, item) in items.iter().enumerate() {
                            ui.label(format!("  {}. {}", i + 1, item));
                        }
                    }
                }
                ui.add_space(6.0);
                ui.label(RichText::new("Calculation:").strong());
                ui.label(info.calculation);
            });
    }
}
