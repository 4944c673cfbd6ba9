//! Stats module - descriptive statistics for chart geometry

mod calculator;

pub use calculator::{BoxSummary, HistogramBin, StatsCalculator, WHISKER_IQR};
