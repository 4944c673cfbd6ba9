//! Chart Plotter Module
//! Draws chart requests interactively using egui_plot.

use super::geometry::{category_rgb, index_label, padded_range, HistogramGeometry};
use super::spec::{Bar, BoxSpec, ChartBody, ChartSpec};
use egui::{Align2, Color32, RichText};
use egui_plot::{
    Bar as PlotBar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoint, PlotPoints,
    Points, Text,
};

pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(135, 206, 235); // Sky blue
pub const DENSITY_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Precomputed render data for one chart, built once per page.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub spec: ChartSpec,
    pub histogram: Option<HistogramGeometry>,
}

impl ChartData {
    pub fn new(spec: ChartSpec) -> Self {
        let histogram = match &spec.body {
            ChartBody::Histogram {
                values,
                bins,
                density_overlay,
            } => Some(HistogramGeometry::from_values(values, *bins, *density_overlay)),
            _ => None,
        };
        Self { spec, histogram }
    }
}

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the n-th category.
    pub fn get_category_color(index: usize) -> Color32 {
        let (r, g, b) = category_rgb(index);
        Color32::from_rgb(r, g, b)
    }

    /// Draw any chart; `id` must be unique on the page.
    pub fn draw_chart(ui: &mut egui::Ui, id: &str, chart: &ChartData, height: f32) {
        if let Some(title) = &chart.spec.title {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(title).size(14.0).strong());
            });
        }

        match &chart.spec.body {
            ChartBody::Histogram { .. } => {
                let geometry = chart.histogram.clone().unwrap_or_default();
                Self::draw_histogram(ui, id, &chart.spec, &geometry, height);
            }
            ChartBody::HorizontalBar { bars } => {
                Self::draw_horizontal_bars(ui, id, &chart.spec, bars, height)
            }
            ChartBody::BoxPlot { boxes, .. } => {
                Self::draw_boxplot(ui, id, &chart.spec, boxes, height)
            }
            ChartBody::Line { points, markers } => {
                Self::draw_line(ui, id, &chart.spec, points, *markers, height)
            }
        }
    }

    /// Histogram bars with the density curve on top.
    fn draw_histogram(
        ui: &mut egui::Ui,
        id: &str,
        spec: &ChartSpec,
        geometry: &HistogramGeometry,
        height: f32,
    ) {
        let bars: Vec<PlotBar> = geometry
            .bins
            .iter()
            .map(|bin| {
                PlotBar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .fill(HISTOGRAM_COLOR)
                    .stroke(egui::Stroke::new(0.5, Color32::WHITE))
            })
            .collect();

        Plot::new(id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Count"));

                if !geometry.density.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from(geometry.density.clone()))
                            .color(DENSITY_COLOR)
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }

    /// Horizontal bars, first bar at the top.
    fn draw_horizontal_bars(
        ui: &mut egui::Ui,
        id: &str,
        spec: &ChartSpec,
        bars: &[Bar],
        height: f32,
    ) {
        let n = bars.len();
        let labels: Vec<String> = bars.iter().rev().map(|b| b.label.clone()).collect();

        let plot_bars: Vec<PlotBar> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                PlotBar::new((n - 1 - i) as f64, bar.value)
                    .width(0.7)
                    .name(&bar.label)
                    .fill(Self::get_category_color(i))
            })
            .collect();

        Plot::new(id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .include_x(0.0)
            .y_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(plot_bars).horizontal());
            });
    }

    /// Boxes without flier points, median labels above each box.
    fn draw_boxplot(
        ui: &mut egui::Ui,
        id: &str,
        spec: &ChartSpec,
        boxes: &[BoxSpec],
        height: f32,
    ) {
        let labels: Vec<String> = boxes.iter().map(|b| b.label.clone()).collect();
        let (y_min, y_max) = padded_range(
            boxes
                .iter()
                .filter_map(|b| b.summary)
                .flat_map(|s| [s.whisker_low, s.whisker_high])
                .chain(boxes.iter().filter_map(|b| b.annotation.as_ref().map(|a| a.y))),
            0.05,
        );

        Plot::new(id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .include_y(y_min)
            .include_y(y_max)
            .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, box_spec) in boxes.iter().enumerate() {
                    let color = Self::get_category_color(i);

                    if let Some(s) = box_spec.summary {
                        let elem = BoxElem::new(
                            i as f64,
                            BoxSpread::new(s.whisker_low, s.q1, s.median, s.q3, s.whisker_high),
                        )
                        .box_width(0.6)
                        .fill(color.gamma_multiply(0.8))
                        .stroke(egui::Stroke::new(1.5, Color32::DARK_GRAY));

                        plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&box_spec.label));
                    }

                    if let Some(annotation) = &box_spec.annotation {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(i as f64, annotation.y),
                                RichText::new(&annotation.text).size(12.0).strong(),
                            )
                            .anchor(Align2::CENTER_BOTTOM),
                        );
                    }
                }
            });
    }

    /// Line plot with optional point markers.
    fn draw_line(
        ui: &mut egui::Ui,
        id: &str,
        spec: &ChartSpec,
        points: &[[f64; 2]],
        markers: bool,
        height: f32,
    ) {
        Plot::new(id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.to_vec()))
                        .color(LINE_COLOR)
                        .width(2.0),
                );
                if markers {
                    plot_ui.points(
                        Points::new(PlotPoints::from(points.to_vec()))
                            .radius(4.0)
                            .color(LINE_COLOR),
                    );
                }
            });
    }
}
