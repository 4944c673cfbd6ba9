//! CSV Data Loader Module
//! Handles CSV file loading and cleaning into a typed `Dataset` using Polars.

use super::cleaner::clean_record;
use super::dataset::{
    Dataset, Record, COL_COMPANY, COL_COUNTRY, COL_DATE_JOINED, COL_INDUSTRY, COL_VALUATION,
};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Conventional location of the source table, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "unicorns.csv";

/// How many distinct unparseable valuation texts to log.
const UNPARSED_SAMPLE: usize = 5;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column missing: {0:?}")]
    MissingColumn(&'static str),
}

/// Loads the unicorn CSV and cleans every row.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars and clean it into a `Dataset`.
    ///
    /// Every column is read as text so the cleaner sees the raw cell values.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        info!("Reading {}", path.display());
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Self::from_dataframe(df, Some(path.to_path_buf()))
    }

    /// Clean an already-loaded frame of text columns.
    pub fn from_dataframe(df: DataFrame, source: Option<PathBuf>) -> Result<Dataset, LoaderError> {
        let columns = Self::stripped_column_names(&df);

        let valuation = Self::text_column(&df, COL_VALUATION)?;
        let date_joined = Self::text_column(&df, COL_DATE_JOINED)?;
        let country = Self::text_column(&df, COL_COUNTRY)?;
        let industry = Self::text_column(&df, COL_INDUSTRY)?;
        let company = Self::text_column(&df, COL_COMPANY).ok();

        let records: Vec<Record> = (0..df.height())
            .map(|i| {
                clean_record(
                    company.as_ref().and_then(|c| c.get(i)),
                    country.get(i),
                    industry.get(i),
                    valuation.get(i),
                    date_joined.get(i),
                )
            })
            .collect();

        let dataset = Dataset::new(records, columns, source);
        let report = dataset.cleaning_report();
        info!(
            "Loaded {} rows ({} missing valuations, {} missing join dates)",
            report.rows, report.missing_valuations, report.missing_dates
        );
        let unparsed = dataset.unparsed_valuations(UNPARSED_SAMPLE);
        if !unparsed.is_empty() {
            debug!("Unparseable valuations (sample): {:?}", unparsed);
        }

        Ok(dataset)
    }

    /// Header labels with leading/trailing whitespace removed.
    fn stripped_column_names(df: &DataFrame) -> Vec<String> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.as_str().trim().to_string())
            .collect();
        debug!("Columns: {:?}", names);
        names
    }

    /// Fetch a column as text by its trimmed label, casting if needed.
    fn text_column(df: &DataFrame, name: &'static str) -> Result<StringChunked, LoaderError> {
        let column = df
            .get_columns()
            .iter()
            .find(|c| c.name().as_str().trim() == name)
            .ok_or(LoaderError::MissingColumn(name))?;
        let text = column.cast(&DataType::String)?;

        Ok(text.str()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_headers_and_cleans_rows() {
        let df = df!(
            " Company " => ["A", "B", "C"],
            "Valuation ($B) " => ["$1.2B", "abc", "$3.0B"],
            " Date Joined" => ["2015-03-01", "2016-01-10", "not-a-date"],
            "Country" => ["US", "US", "China"],
            "Industry" => ["Fintech", "AI", "Fintech"]
        )
        .unwrap();

        let ds = DataLoader::from_dataframe(df, None).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.columns().iter().any(|c| c == "Valuation ($B)"));

        let valuations: Vec<Option<f64>> = ds.records().iter().map(|r| r.valuation).collect();
        assert_eq!(valuations, vec![Some(1.2), None, Some(3.0)]);

        let years: Vec<Option<i32>> = ds.records().iter().map(|r| r.year_joined).collect();
        assert_eq!(years, vec![Some(2015), Some(2016), None]);
    }

    #[test]
    fn company_column_is_optional() {
        let df = df!(
            "Valuation ($B)" => ["$2B"],
            "Date Joined" => ["2020-01-01"],
            "Country" => ["India"],
            "Industry" => ["Edtech"]
        )
        .unwrap();

        let ds = DataLoader::from_dataframe(df, None).unwrap();
        assert_eq!(ds.records()[0].company, None);
        assert_eq!(ds.records()[0].valuation, Some(2.0));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let df = df!(
            "Valuation ($B)" => ["$2B"],
            "Country" => ["India"],
            "Industry" => ["Edtech"]
        )
        .unwrap();

        let err = DataLoader::from_dataframe(df, None).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(COL_DATE_JOINED)));
    }

    #[test]
    fn null_cells_become_missing() {
        let df = df!(
            "Valuation ($B)" => [None, Some("$5B")],
            "Date Joined" => [Some("2019-05-05"), None],
            "Country" => [None::<&str>, Some("UK")],
            "Industry" => ["AI", "AI"]
        )
        .unwrap();

        let ds = DataLoader::from_dataframe(df, None).unwrap();
        let first = &ds.records()[0];
        assert_eq!(first.valuation, None);
        assert_eq!(first.country, None);
        assert_eq!(first.year_joined, Some(2019));
        assert_eq!(ds.records()[1].date_joined, None);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = DataLoader::load_csv("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }
}
