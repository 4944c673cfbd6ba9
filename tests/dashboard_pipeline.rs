//! End-to-end tests: CSV file -> cleaned dataset -> aggregates -> page.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use unicorn_dashboard::charts::{ChartBody, Presenter};
use unicorn_dashboard::config::{DashboardConfig, DashboardVariant, SectionKind};
use unicorn_dashboard::data::{Aggregator, DataLoader, LoaderError, YearCount};

const HEADER: &str = "Company, Valuation ($B) ,Date Joined,Country,City,Industry,Select Investors";

fn write_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("unicorns.csv");
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn worked_example_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &[
            "Alpha,$1.2B,2015-03-01,United States,San Francisco,Fintech,\"Sequoia, Accel\"",
            "Beta,abc,2016-01-10,China,Beijing,Fintech,Tencent",
            "Gamma,$3.0B,not-a-date,United States,Austin,AI,",
        ],
    );

    let dataset = DataLoader::load_csv(&path).unwrap();
    assert_eq!(dataset.source(), Some(&path));

    let valuations: Vec<Option<f64>> = dataset.records().iter().map(|r| r.valuation).collect();
    assert_eq!(valuations, vec![Some(1.2), None, Some(3.0)]);

    let years: Vec<Option<i32>> = dataset.records().iter().map(|r| r.year_joined).collect();
    assert_eq!(years, vec![Some(2015), Some(2016), None]);

    let report = dataset.cleaning_report();
    assert_eq!(report.rows, 3);
    assert_eq!(report.missing_valuations, 1);
    assert_eq!(report.missing_dates, 1);

    let aggregates = Aggregator::aggregate(&dataset);
    assert_eq!(aggregates.valuation_subset, vec![1.2, 3.0]);
    assert_eq!(
        aggregates.year_counts,
        vec![
            YearCount {
                year: 2015,
                count: 1
            },
            YearCount {
                year: 2016,
                count: 1
            },
        ]
    );

    assert_eq!(aggregates.top_countries[0].label, "United States");
    assert_eq!(aggregates.top_countries[0].count, 2);

    // AI (median 3.0) outranks the more frequent Fintech (median 1.2).
    let order: Vec<&str> = aggregates
        .top_industries
        .iter()
        .map(|i| i.industry.as_str())
        .collect();
    assert_eq!(order, vec!["AI", "Fintech"]);
}

#[test]
fn outliers_are_kept_out_of_the_histogram_only() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &[
            "Big,$350B,2012-12-07,China,Beijing,Artificial intelligence,",
            "Small,$1B,2021-06-01,China,Shanghai,Artificial intelligence,",
            "Odd,\"$1,500\",2021-07-01,India,Pune,Edtech,",
        ],
    );

    let dataset = DataLoader::load_csv(&path).unwrap();
    let aggregates = Aggregator::aggregate(&dataset);

    assert!(aggregates.valuation_subset.iter().all(|v| *v < 200.0));
    assert_eq!(aggregates.valuation_subset, vec![1.0]);

    let ai = aggregates
        .top_industries
        .iter()
        .find(|i| i.industry == "Artificial intelligence")
        .unwrap();
    assert_eq!(ai.median, Some(175.5));
}

#[test]
fn page_follows_the_selected_layout() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &["Alpha,$2B,4/7/2017,Germany,Berlin,Fintech,Index Ventures"],
    );
    let dataset = DataLoader::load_csv(&path).unwrap();
    let aggregates = Aggregator::aggregate(&dataset);

    let narrated = Presenter::present(&DashboardVariant::Narrated.config(), &aggregates);
    assert_eq!(narrated.sections.len(), 4);
    assert!(narrated.intro.is_some());
    assert!(narrated.sections.iter().all(|s| s.caption.is_some()));

    let plain = Presenter::present(&DashboardVariant::Plain.config(), &aggregates);
    assert!(plain.intro.is_none());
    assert!(plain.sections.iter().all(|s| s.caption.is_none()));

    let boxes = narrated
        .sections
        .iter()
        .find(|s| s.kind == SectionKind::IndustryValuations)
        .map(|s| &s.chart.body)
        .unwrap();
    let ChartBody::BoxPlot { boxes, .. } = boxes else {
        panic!("industry section should be a boxplot");
    };
    assert_eq!(boxes[0].annotation.as_ref().unwrap().text, "2.0B");

    let line = &narrated.sections[3].chart.body;
    assert_eq!(
        line,
        &ChartBody::Line {
            points: vec![[2017.0, 1.0]],
            markers: true,
        }
    );
}

#[test]
fn layout_file_overrides_presets() {
    let dir = TempDir::new().unwrap();
    let layout_path = dir.path().join("dashboard.json");
    let mut layout = DashboardVariant::Compact.config();
    layout.sections.reverse();
    layout.sections[0].caption = Some("Yearly cadence.".to_string());
    fs::write(&layout_path, layout.to_json().unwrap()).unwrap();

    let loaded = DashboardConfig::load_optional(&layout_path).unwrap().unwrap();
    assert_eq!(loaded, layout);

    let csv = write_csv(&dir, &["Alpha,$2B,2020-01-01,Japan,Tokyo,Fintech,"]);
    let aggregates = Aggregator::aggregate(&DataLoader::load_csv(&csv).unwrap());
    let page = Presenter::present(&loaded, &aggregates);

    assert_eq!(page.sections[0].kind, SectionKind::FoundingsPerYear);
    assert_eq!(page.sections[0].numbered_heading(), "1. Foundings by Year");
    assert_eq!(page.sections[0].caption.as_deref(), Some("Yearly cadence."));
}

#[test]
fn missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = DataLoader::load_csv(dir.path().join("unicorns.csv")).unwrap_err();
    assert!(matches!(err, LoaderError::NotFound(_)));
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unicorns.csv");
    fs::write(&path, "Company,Country,Industry\nAlpha,US,AI\n").unwrap();

    let err = DataLoader::load_csv(&path).unwrap_err();
    assert!(matches!(err, LoaderError::MissingColumn(_)));
}

#[test]
fn date_time_stamps_count_toward_years() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &[
            "Alpha,$2B,2017-04-07T00:00:00.000,Japan,Tokyo,Fintech,",
            "Beta,$3B,4/7/2017 12:00:00 AM,Japan,Osaka,Fintech,",
            "Gamma,$4B,Apr 7 2018,Japan,Kyoto,AI,",
        ],
    );

    let dataset = DataLoader::load_csv(&path).unwrap();
    assert_eq!(dataset.cleaning_report().missing_dates, 0);

    let aggregates = Aggregator::aggregate(&dataset);
    assert_eq!(
        aggregates.year_counts,
        vec![
            YearCount {
                year: 2017,
                count: 2
            },
            YearCount {
                year: 2018,
                count: 1
            },
        ]
    );
}
