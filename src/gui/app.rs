//! Unicorn Dashboard Main Application
//! Main window with control panel and the dashboard page.

use crate::charts::{Presenter, StaticChartRenderer};
use crate::config::DashboardConfig;
use crate::data::{Aggregates, Dataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, LayoutChoice};
use egui::SidePanel;
use tracing::{info, warn};

/// Main application window.
pub struct DashboardApp {
    aggregates: Aggregates,
    custom_layout: Option<DashboardConfig>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    /// Build the app from an already loaded dataset. `custom_layout` is the
    /// layout file content, if one was found.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: &Dataset,
        aggregates: Aggregates,
        custom_layout: Option<DashboardConfig>,
    ) -> Self {
        let control_panel = ControlPanel::new(
            dataset.source().cloned(),
            dataset.columns().to_vec(),
            dataset.cleaning_report(),
            custom_layout.is_some(),
        );

        let mut app = Self {
            aggregates,
            custom_layout,
            control_panel,
            chart_viewer: ChartViewer::new(),
        };
        app.apply_layout();
        app
    }

    fn current_layout(&self) -> DashboardConfig {
        match self.control_panel.layout {
            LayoutChoice::Custom => self.custom_layout.clone().unwrap_or_default(),
            LayoutChoice::Preset(variant) => variant.config(),
        }
    }

    /// Re-run the presenter for the selected layout.
    fn apply_layout(&mut self) {
        let config = self.current_layout();
        let page = Presenter::present(&config, &self.aggregates);
        info!("Showing {} sections", page.sections.len());
        self.chart_viewer.set_page(page);
        self.control_panel.export_enabled = self.chart_viewer.has_charts();
    }

    /// Handle PNG export - render every shown chart into a chosen folder
    fn handle_export_png(&mut self) {
        let page = match self.chart_viewer.page() {
            Some(page) if self.chart_viewer.has_charts() => page,
            _ => {
                self.control_panel.set_status("No charts to export");
                return;
            }
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_page(page, &dir) {
            Ok(paths) => {
                self.control_panel
                    .set_status(&format!("Exported {} charts", paths.len()));
                if let Err(e) = open::that(&dir) {
                    warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::LayoutChanged => self.apply_layout(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard page
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
