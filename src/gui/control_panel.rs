//! Control Panel Widget
//! Left side panel: index selection, smoothing toggle, downloads and status.

use crate::downloads::Download;
use crate::state::DisplayMode;
use crate::views::IndexSelector;
use egui::{Color32, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
    pub is_loading: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            is_loading: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        selected: IndexSelector,
        mode: DisplayMode,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Confidence Indices")
                    .size(22.0)
                    .color(Color32::from_rgb(0x00, 0x35, 0x6B)),
            );
            ui.label(
                RichText::new("Stock Market Confidence Survey")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Index Section =====
        ui.label(RichText::new("📊 Index").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                for selector in IndexSelector::ALL {
                    if ui
                        .selectable_label(selector == selected, selector.label())
                        .clicked()
                    {
                        action = ControlPanelAction::SelectView(selector.id().to_string());
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Display Section =====
        ui.label(RichText::new("⚙️ Display").size(14.0).strong());
        ui.add_space(5.0);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new(mode.toggle_label()).size(14.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ToggleSmoothing;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let export = egui::Button::new(RichText::new("🖼 Export Chart").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export).clicked() {
                    action = ControlPanelAction::ExportChart;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Downloads Section =====
        ui.label(RichText::new("📁 Downloads").size(14.0).strong());
        ui.add_space(5.0);

        for download in Download::ALL {
            if ui.button(download.label()).clicked() {
                action = ControlPanelAction::Download(download);
            }
        }
        if ui.small_button("Open Questionnaire").clicked() {
            action = ControlPanelAction::OpenQuestionnaire;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.horizontal(|ui| {
            if self.is_loading {
                ui.spinner();
            }
            let status_color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectView(String),
    ToggleSmoothing,
    ExportChart,
    Download(Download),
    OpenQuestionnaire,
}
