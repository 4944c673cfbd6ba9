//! Static Chart Renderer
//! Exports dashboard sections to PNG files using plotters.
//!
//! Each section becomes one image named `NN_<kind>.png`, where `NN` is the
//! section number, so files sort in display order.

use super::geometry::{category_rgb, index_label, padded_range, HistogramGeometry};
use super::spec::{Bar, BoxSpec, ChartBody, ChartSpec, Page, Section};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const EXPORT_SIZE: (u32, u32) = (1400, 700);

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const STEEL_BLUE: RGBColor = RGBColor(31, 119, 180);
const BOX_GRAY: RGBColor = RGBColor(80, 80, 80);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ExportError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ExportError::Drawing(err.to_string())
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every section of the page into `dir`, returning written paths.
    pub fn export_page(page: &Page, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(page.sections.len());
        for section in &page.sections {
            let path = dir.join(Self::file_name(section));
            Self::render_chart(&section.chart, &path, EXPORT_SIZE)?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        info!("Exported {} charts to {}", written.len(), dir.display());
        Ok(written)
    }

    pub fn file_name(section: &Section) -> String {
        format!("{:02}_{}.png", section.number, section.kind.slug())
    }

    /// Render one chart to a PNG file.
    pub fn render_chart(
        spec: &ChartSpec,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ExportError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        match &spec.body {
            ChartBody::Histogram {
                values,
                bins,
                density_overlay,
            } => {
                let geometry = HistogramGeometry::from_values(values, *bins, *density_overlay);
                Self::draw_histogram(&root, spec, &geometry)?;
            }
            ChartBody::HorizontalBar { bars } => Self::draw_horizontal_bars(&root, spec, bars)?,
            ChartBody::BoxPlot { boxes, .. } => Self::draw_boxplot(&root, spec, boxes)?,
            ChartBody::Line { points, markers } => {
                Self::draw_line(&root, spec, points, *markers)?
            }
        }

        root.present()?;
        Ok(())
    }

    fn builder<'a, 'b>(
        root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
        spec: &ChartSpec,
    ) -> ChartBuilder<'a, 'static, BitMapBackend<'b>> {
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80);
        if let Some(title) = &spec.title {
            builder.caption(title, ("sans-serif", 26));
        }
        builder
    }

    fn draw_histogram(
        root: &DrawingArea<BitMapBackend, Shift>,
        spec: &ChartSpec,
        geometry: &HistogramGeometry,
    ) -> Result<(), ExportError> {
        let (x_min, x_max) = geometry.x_range();
        let y_max = geometry.y_max() * 1.1;

        let mut chart = Self::builder(root, spec).build_cartesian_2d(x_min..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()?;

        chart.draw_series(geometry.bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], SKY_BLUE.filled())
        }))?;
        chart.draw_series(geometry.bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], WHITE.stroke_width(1))
        }))?;

        if !geometry.density.is_empty() {
            chart.draw_series(LineSeries::new(
                geometry.density.iter().map(|p| (p[0], p[1])),
                STEEL_BLUE.stroke_width(2),
            ))?;
        }

        Ok(())
    }

    fn draw_horizontal_bars(
        root: &DrawingArea<BitMapBackend, Shift>,
        spec: &ChartSpec,
        bars: &[Bar],
    ) -> Result<(), ExportError> {
        let n = bars.len();
        let x_max = bars.iter().map(|b| b.value).fold(1.0, f64::max) * 1.1;
        let labels: Vec<String> = bars.iter().rev().map(|b| b.label.clone()).collect();
        let label_of = |y: &f64| index_label(&labels, *y);

        let mut chart = Self::builder(root, spec)
            .y_label_area_size(160)
            .build_cartesian_2d(0f64..x_max, -0.5f64..(n.max(1) as f64 - 0.5))?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1) * 2 + 1)
            .y_label_formatter(&label_of)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let y = (n - 1 - i) as f64;
            let color = Self::category_color(i);
            Rectangle::new([(0.0, y - 0.35), (bar.value, y + 0.35)], color.filled())
        }))?;

        Ok(())
    }

    fn draw_boxplot(
        root: &DrawingArea<BitMapBackend, Shift>,
        spec: &ChartSpec,
        boxes: &[BoxSpec],
    ) -> Result<(), ExportError> {
        let n = boxes.len().max(1);
        let labels: Vec<String> = boxes.iter().map(|b| b.label.clone()).collect();
        let label_of = |x: &f64| index_label(&labels, *x);
        let (y_min, y_max) = padded_range(
            boxes
                .iter()
                .filter_map(|b| b.summary)
                .flat_map(|s| [s.whisker_low, s.whisker_high])
                .chain(boxes.iter().filter_map(|b| b.annotation.as_ref().map(|a| a.y))),
            0.05,
        );

        let mut chart = Self::builder(root, spec)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n * 2 + 1)
            .x_label_formatter(&label_of)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()?;

        for (i, box_spec) in boxes.iter().enumerate() {
            let x = i as f64;
            let color = Self::category_color(i);

            if let Some(s) = box_spec.summary {
                let (left, right) = (x - 0.3, x + 0.3);
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(left, s.q1), (right, s.q3)],
                    color.filled(),
                )))?;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(left, s.q1), (right, s.q3)],
                    BOX_GRAY.stroke_width(1),
                )))?;

                let cap = 0.15;
                let segments = [
                    [(left, s.median), (right, s.median)],
                    [(x, s.whisker_low), (x, s.q1)],
                    [(x, s.q3), (x, s.whisker_high)],
                    [(x - cap, s.whisker_low), (x + cap, s.whisker_low)],
                    [(x - cap, s.whisker_high), (x + cap, s.whisker_high)],
                ];
                chart.draw_series(
                    segments
                        .iter()
                        .map(|seg| PathElement::new(seg.to_vec(), BOX_GRAY.stroke_width(2))),
                )?;
            }

            if let Some(annotation) = &box_spec.annotation {
                let style = TextStyle::from(("sans-serif", 16).into_font())
                    .pos(Pos::new(HPos::Center, VPos::Bottom));
                chart.draw_series(std::iter::once(Text::new(
                    annotation.text.clone(),
                    (x, annotation.y),
                    style,
                )))?;
            }
        }

        Ok(())
    }

    fn draw_line(
        root: &DrawingArea<BitMapBackend, Shift>,
        spec: &ChartSpec,
        points: &[[f64; 2]],
        markers: bool,
    ) -> Result<(), ExportError> {
        let (x_min, x_max) = padded_range(points.iter().map(|p| p[0]), 0.02);
        let y_max = points.iter().map(|p| p[1]).fold(1.0, f64::max) * 1.1;

        let mut chart = Self::builder(root, spec).build_cartesian_2d(x_min..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_label_formatter(&|x| format!("{:.0}", x))
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()?;

        chart.draw_series(LineSeries::new(
            points.iter().map(|p| (p[0], p[1])),
            STEEL_BLUE.stroke_width(2),
        ))?;
        if markers {
            chart.draw_series(
                points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), 5, STEEL_BLUE.filled())),
            )?;
        }

        Ok(())
    }

    fn category_color(index: usize) -> RGBColor {
        let (r, g, b) = category_rgb(index);
        RGBColor(r, g, b)
    }
}
