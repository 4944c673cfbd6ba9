//! Unicorn Dashboard - CSV Cleaning, Aggregation & Interactive Charts
//!
//! Reads `unicorns.csv` from the working directory, optionally applies the
//! layout in `dashboard.json`, and opens the dashboard window.
//!
//! Exit codes:
//!   0 - Window closed normally
//!   1 - Data or layout could not be loaded, or the window failed to start

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use unicorn_dashboard::config::{DashboardConfig, DEFAULT_CONFIG_PATH};
use unicorn_dashboard::data::{Aggregator, DataLoader, DEFAULT_CSV_PATH};
use unicorn_dashboard::gui::DashboardApp;

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    info!("Unicorn Dashboard v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        error!("Dashboard failed: {:#}", e);
        eprintln!("\n❌ Error: {e:#}");
        std::process::exit(1);
    }
}

/// Initialize logging; `RUST_LOG` overrides the default `info` level.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load once, aggregate once, then hand everything to the window.
fn run() -> Result<()> {
    let custom_layout = DashboardConfig::load_optional(DEFAULT_CONFIG_PATH)
        .with_context(|| format!("Failed to load layout from {DEFAULT_CONFIG_PATH}"))?;
    if custom_layout.is_some() {
        info!("Using layout from {}", DEFAULT_CONFIG_PATH);
    }

    let dataset = DataLoader::load_csv(DEFAULT_CSV_PATH)
        .with_context(|| format!("Failed to load {DEFAULT_CSV_PATH}"))?;
    let aggregates = Aggregator::aggregate(&dataset);

    let title = custom_layout
        .as_ref()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| DashboardConfig::default().title);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title(title.as_str()),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                &dataset,
                aggregates,
                custom_layout,
            )))
        }),
    )
    .map_err(|e| anyhow!("Failed to start dashboard window: {e}"))
}
