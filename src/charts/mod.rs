//! Charts module - chart requests, interactive plotting and PNG export

mod geometry;
mod plotter;
mod presenter;
mod renderer;
mod spec;

pub use geometry::{padded_range, HistogramGeometry, DENSITY_POINTS};
pub use plotter::{ChartData, ChartPlotter};
pub use presenter::{Presenter, HISTOGRAM_BINS, MEDIAN_LABEL_OFFSET};
pub use renderer::{ExportError, StaticChartRenderer, EXPORT_SIZE};
pub use spec::{Annotation, Bar, BoxSpec, ChartBody, ChartSpec, Page, Section};
