//! Dashboard layout configuration.
//!
//! One `DashboardConfig` describes which sections are shown, in what order,
//! under which headings and with which captions. The built-in variants are
//! presets of it; a `dashboard.json` next to the data file overrides them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional location of the optional layout file.
pub const DEFAULT_CONFIG_PATH: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid dashboard layout: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The four chart sections the dashboard knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ValuationDistribution,
    TopCountries,
    IndustryValuations,
    FoundingsPerYear,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::ValuationDistribution,
        SectionKind::TopCountries,
        SectionKind::IndustryValuations,
        SectionKind::FoundingsPerYear,
    ];

    /// File-name friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            SectionKind::ValuationDistribution => "valuation_distribution",
            SectionKind::TopCountries => "top_countries",
            SectionKind::IndustryValuations => "industry_valuations",
            SectionKind::FoundingsPerYear => "foundings_per_year",
        }
    }
}

/// Settings for one numbered section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub kind: SectionKind,

    /// Heading text, without the section number.
    pub heading: String,

    /// One-sentence caption shown under the chart.
    #[serde(default)]
    pub caption: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SectionConfig {
    fn new(kind: SectionKind, heading: &str, caption: Option<&str>) -> Self {
        Self {
            kind,
            heading: heading.to_string(),
            caption: caption.map(str::to_string),
            enabled: true,
        }
    }
}

/// Page-level layout: title, optional intro and the ordered sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: String,

    #[serde(default)]
    pub intro: Option<String>,

    /// Display order is the order of this list.
    pub sections: Vec<SectionConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardVariant::Narrated.config()
    }
}

impl DashboardConfig {
    /// Parse a layout from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a layout file if it exists. A missing file is not an error.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map(Some)
    }

    /// Sections that will actually be rendered, in display order.
    pub fn enabled_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter().filter(|s| s.enabled)
    }
}

/// Built-in layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardVariant {
    /// Intro paragraph and a caption under every chart.
    #[default]
    Narrated,
    /// Same headings, no narrative text.
    Plain,
    /// Short headings, no narrative text.
    Compact,
}

impl DashboardVariant {
    pub const ALL: [DashboardVariant; 3] = [
        DashboardVariant::Narrated,
        DashboardVariant::Plain,
        DashboardVariant::Compact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DashboardVariant::Narrated => "Narrated",
            DashboardVariant::Plain => "Plain",
            DashboardVariant::Compact => "Compact",
        }
    }

    pub fn config(self) -> DashboardConfig {
        match self {
            DashboardVariant::Narrated => DashboardConfig {
                title: "🦄 Unicorn Startups Dashboard".to_string(),
                intro: Some(
                    "Welcome to the **Unicorn Startups Analysis App**!\n\
                     This dashboard presents visual insights into unicorn companies \
                     (startups valued at over $1 billion).\n\
                     It covers key aspects like company valuation distribution, geographic \
                     concentration, industry trends, and founding timelines."
                        .to_string(),
                ),
                sections: vec![
                    SectionConfig::new(
                        SectionKind::ValuationDistribution,
                        "Distribution of Unicorn Company Valuations",
                        Some(
                            "This histogram shows how unicorn valuations are distributed, \
                             revealing a concentration of companies around lower valuation \
                             ranges and fewer outliers with extreme values.",
                        ),
                    ),
                    SectionConfig::new(
                        SectionKind::TopCountries,
                        "Top 10 Countries by Number of Unicorns",
                        Some(
                            "This bar chart highlights the top countries with the highest \
                             number of unicorn companies, showcasing global centers of \
                             innovation and investment.",
                        ),
                    ),
                    SectionConfig::new(
                        SectionKind::IndustryValuations,
                        "Valuation Distribution by Industry (Top 10 Industries)",
                        Some(
                            "This colorful boxplot compares company valuations across the \
                             top 10 industries. It helps highlight industries where startups \
                             tend to be valued higher.",
                        ),
                    ),
                    SectionConfig::new(
                        SectionKind::FoundingsPerYear,
                        "Number of Unicorns Founded Per Year",
                        Some(
                            "This line plot reveals trends in unicorn company formations \
                             across years, highlighting periods of growth and slowdowns in \
                             the startup ecosystem.",
                        ),
                    ),
                ],
            },
            DashboardVariant::Plain => {
                let mut config = DashboardVariant::Narrated.config();
                config.title = "Unicorn Startups Dashboard".to_string();
                config.intro = None;
                for section in &mut config.sections {
                    section.caption = None;
                }
                config
            }
            DashboardVariant::Compact => DashboardConfig {
                title: "Unicorn Companies".to_string(),
                intro: None,
                sections: vec![
                    SectionConfig::new(SectionKind::ValuationDistribution, "Valuations", None),
                    SectionConfig::new(SectionKind::TopCountries, "Top Countries", None),
                    SectionConfig::new(SectionKind::IndustryValuations, "Industries", None),
                    SectionConfig::new(SectionKind::FoundingsPerYear, "Foundings by Year", None),
                ],
            },
        }
    }
}
