//! Presenter Module
//! Maps aggregated series onto chart requests. No aggregation happens here.

use super::spec::{Annotation, Bar, BoxSpec, ChartBody, ChartSpec, Page, Section};
use crate::config::{DashboardConfig, SectionKind};
use crate::data::{Aggregates, CategoryCount, IndustryValuation, YearCount};

/// Histogram bar count for the valuation distribution.
pub const HISTOGRAM_BINS: usize = 30;

/// Vertical offset of a median label above its median line, in $B.
pub const MEDIAN_LABEL_OFFSET: f64 = 0.5;

/// Builds the dashboard page from aggregates and a layout.
pub struct Presenter;

impl Presenter {
    /// Lay out every enabled section in configured order, numbered from 1.
    pub fn present(config: &DashboardConfig, aggregates: &Aggregates) -> Page {
        let sections = config
            .enabled_sections()
            .enumerate()
            .map(|(i, section)| Section {
                number: i + 1,
                kind: section.kind,
                heading: section.heading.clone(),
                caption: section.caption.clone(),
                chart: Self::chart_for(section.kind, aggregates),
            })
            .collect();

        Page {
            title: config.title.clone(),
            intro: config.intro.clone(),
            sections,
        }
    }

    pub fn chart_for(kind: SectionKind, aggregates: &Aggregates) -> ChartSpec {
        match kind {
            SectionKind::ValuationDistribution => {
                Self::valuation_histogram(&aggregates.valuation_subset)
            }
            SectionKind::TopCountries => Self::country_bars(&aggregates.top_countries),
            SectionKind::IndustryValuations => Self::industry_boxes(&aggregates.top_industries),
            SectionKind::FoundingsPerYear => Self::year_line(&aggregates.year_counts),
        }
    }

    pub fn valuation_histogram(values: &[f64]) -> ChartSpec {
        ChartSpec {
            title: Some("Distribution of Unicorn Valuations".to_string()),
            x_label: "Valuation ($B)".to_string(),
            y_label: "Count".to_string(),
            body: ChartBody::Histogram {
                values: values.to_vec(),
                bins: HISTOGRAM_BINS,
                density_overlay: true,
            },
        }
    }

    pub fn country_bars(countries: &[CategoryCount]) -> ChartSpec {
        ChartSpec {
            title: Some("Top Countries".to_string()),
            x_label: "Number of Unicorns".to_string(),
            y_label: "Country".to_string(),
            body: ChartBody::HorizontalBar {
                bars: countries
                    .iter()
                    .map(|c| Bar {
                        label: c.label.clone(),
                        value: c.count as f64,
                    })
                    .collect(),
            },
        }
    }

    /// Boxes in the aggregator's median order, each labelled with its median.
    pub fn industry_boxes(industries: &[IndustryValuation]) -> ChartSpec {
        let boxes = industries
            .iter()
            .map(|industry| BoxSpec {
                label: industry.industry.clone(),
                summary: industry.summary,
                annotation: industry.median.map(|median| Annotation {
                    text: Self::median_label(median),
                    y: median + MEDIAN_LABEL_OFFSET,
                }),
            })
            .collect();

        ChartSpec {
            title: None,
            x_label: "Industry".to_string(),
            y_label: "Valuation in Billions of Dollars ($B)".to_string(),
            body: ChartBody::BoxPlot {
                boxes,
                show_fliers: false,
            },
        }
    }

    pub fn year_line(years: &[YearCount]) -> ChartSpec {
        ChartSpec {
            title: Some("Unicorns Founded Per Year".to_string()),
            x_label: "Year".to_string(),
            y_label: "Number of Unicorns".to_string(),
            body: ChartBody::Line {
                points: years
                    .iter()
                    .map(|y| [y.year as f64, y.count as f64])
                    .collect(),
                markers: true,
            },
        }
    }

    /// Median label text: one decimal, suffixed with "B".
    pub fn median_label(median: f64) -> String {
        format!("{:.1}B", median)
    }
}
