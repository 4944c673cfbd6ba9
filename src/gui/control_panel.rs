//! Control Panel Widget
//! Left side panel with dataset summary, layout selection and export.

use crate::config::DashboardVariant;
use crate::data::CleaningReport;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Which layout drives the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChoice {
    /// Layout read from the layout file.
    Custom,
    Preset(DashboardVariant),
}

/// Left side control panel.
pub struct ControlPanel {
    pub source: Option<PathBuf>,
    pub columns: Vec<String>,
    pub report: CleaningReport,
    pub layout: LayoutChoice,
    pub has_custom_layout: bool,
    pub status: String,
    /// False while the page has no charts to export.
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(
        source: Option<PathBuf>,
        columns: Vec<String>,
        report: CleaningReport,
        has_custom_layout: bool,
    ) -> Self {
        let layout = if has_custom_layout {
            LayoutChoice::Custom
        } else {
            LayoutChoice::Preset(DashboardVariant::default())
        };

        Self {
            source,
            columns,
            report,
            layout,
            has_custom_layout,
            status: "Ready".to_string(),
            export_enabled: true,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🦄 Unicorns")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = self
                    .source
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "In-memory data".to_string());
                ui.label(RichText::new(file_name).size(12.0));
                ui.label(
                    RichText::new(format!(
                        "{} rows × {} columns",
                        self.report.rows,
                        self.columns.len()
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                )
                .on_hover_text(self.columns.join(", "));
                ui.label(
                    RichText::new(format!(
                        "{} without valuation, {} without join date",
                        self.report.missing_valuations, self.report.missing_dates
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Layout Section =====
        ui.label(RichText::new("⚙️ Layout").size(14.0).strong());
        ui.add_space(5.0);

        let previous = self.layout;
        if self.has_custom_layout {
            ui.radio_value(&mut self.layout, LayoutChoice::Custom, "From dashboard.json");
        }
        for variant in DashboardVariant::ALL {
            ui.radio_value(
                &mut self.layout,
                LayoutChoice::Preset(variant),
                variant.label(),
            );
        }
        if self.layout != previous {
            action = ControlPanelAction::LayoutChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNGs").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(10.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

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
    LayoutChanged,
    ExportPng,
}
