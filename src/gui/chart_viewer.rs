//! Chart Viewer Widget
//! Central scrollable page: title, intro paragraph and numbered chart sections.

use crate::charts::{ChartData, ChartPlotter, Page, Section};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 20.0;
const CHART_HEIGHT: f32 = 380.0;

/// Scrollable display of one dashboard page.
#[derive(Default)]
pub struct ChartViewer {
    page: Option<Page>,
    /// Render data per section, same order as `page.sections`.
    charts: Vec<ChartData>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed page and precompute chart geometry.
    pub fn set_page(&mut self, page: Page) {
        self.charts = page
            .sections
            .iter()
            .map(|s| ChartData::new(s.chart.clone()))
            .collect();
        self.page = Some(page);
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Whether the current page has at least one chart.
    pub fn has_charts(&self) -> bool {
        !self.charts.is_empty()
    }

    /// Plot id unique within a page, even when a layout repeats a kind.
    fn plot_id(section: &Section) -> String {
        format!("{}_{}", section.number, section.kind.slug())
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(page) = &self.page else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(10.0);
                ui.label(RichText::new(&page.title).size(28.0).strong());

                if let Some(intro) = &page.intro {
                    ui.add_space(8.0);
                    Self::draw_markdown_paragraph(ui, intro);
                }

                for (section, chart) in page.sections.iter().zip(&self.charts) {
                    ui.add_space(SECTION_SPACING);
                    ui.label(RichText::new(section.numbered_heading()).size(20.0).strong());
                    ui.add_space(6.0);

                    egui::Frame::none()
                        .rounding(8.0)
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ChartPlotter::draw_chart(
                                ui,
                                &Self::plot_id(section),
                                chart,
                                CHART_HEIGHT,
                            );
                        });

                    if let Some(caption) = &section.caption {
                        ui.add_space(6.0);
                        ui.label(RichText::new(caption).size(13.0).color(Color32::GRAY));
                    }
                }
                ui.add_space(SECTION_SPACING);
            });
    }

    /// Render a paragraph where `**text**` spans are bold.
    fn draw_markdown_paragraph(ui: &mut egui::Ui, text: &str) {
        for line in text.lines() {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for (i, span) in line.split("**").enumerate() {
                    if span.is_empty() {
                        continue;
                    }
                    let rich = RichText::new(span).size(14.0);
                    // Odd spans sit between a pair of `**` markers.
                    ui.label(if i % 2 == 1 { rich.strong() } else { rich });
                }
            });
        }
    }
}
