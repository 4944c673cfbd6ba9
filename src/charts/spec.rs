//! Chart requests handed from the presenter to the rendering layer.

use crate::config::SectionKind;
use crate::stats::BoxSummary;

/// One horizontal bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Text placed above a box at a given y value.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub y: f64,
}

/// One box of a boxplot. `summary` is `None` for a category without values.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpec {
    pub label: String,
    pub summary: Option<BoxSummary>,
    pub annotation: Option<Annotation>,
}

/// Chart geometry, one variant per chart type.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// Raw values; the renderer bins them.
    Histogram {
        values: Vec<f64>,
        bins: usize,
        density_overlay: bool,
    },
    HorizontalBar {
        bars: Vec<Bar>,
    },
    BoxPlot {
        boxes: Vec<BoxSpec>,
        show_fliers: bool,
    },
    Line {
        points: Vec<[f64; 2]>,
        markers: bool,
    },
}

/// A complete chart request: labels plus geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub body: ChartBody,
}

/// A numbered page section holding exactly one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub number: usize,
    pub kind: SectionKind,
    pub heading: String,
    pub caption: Option<String>,
    pub chart: ChartSpec,
}

impl Section {
    /// Heading prefixed with the section number, e.g. `"2. Top Countries"`.
    pub fn numbered_heading(&self) -> String {
        format!("{}. {}", self.number, self.heading)
    }
}

/// Everything the display surface shows for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub intro: Option<String>,
    pub sections: Vec<Section>,
}
