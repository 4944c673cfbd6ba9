//! Cleaned dataset types.

use chrono::NaiveDate;
use std::path::PathBuf;

/// Column labels expected in the source CSV (after header trimming).
pub const COL_COMPANY: &str = "Company";
pub const COL_VALUATION: &str = "Valuation ($B)";
pub const COL_DATE_JOINED: &str = "Date Joined";
pub const COL_COUNTRY: &str = "Country";
pub const COL_INDUSTRY: &str = "Industry";

/// One cleaned row of the unicorn table.
///
/// Every field that could fail to parse is an `Option`; `None` means the raw
/// value was absent or unusable and must be skipped by aggregates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub company: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    /// Raw valuation text as it appeared in the file.
    pub valuation_raw: Option<String>,
    /// Valuation in billions of dollars.
    pub valuation: Option<f64>,
    pub date_joined: Option<NaiveDate>,
    pub year_joined: Option<i32>,
}

/// Counts of field-level failures absorbed while cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows: usize,
    pub missing_valuations: usize,
    pub missing_dates: usize,
}

/// The full in-memory collection of records for one run.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    columns: Vec<String>,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, columns: Vec<String>, source: Option<PathBuf>) -> Self {
        Self {
            records,
            columns,
            source,
        }
    }

    /// Build a dataset straight from records (no source file).
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(records, Vec::new(), None)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Trimmed column labels of the source table.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct raw valuation texts that could not be coerced, in file order,
    /// at most `limit` of them. Blank cells are not listed.
    pub fn unparsed_valuations(&self, limit: usize) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for raw in self
            .records
            .iter()
            .filter(|r| r.valuation.is_none())
            .filter_map(|r| r.valuation_raw.as_deref())
            .filter(|raw| !raw.trim().is_empty())
        {
            if seen.len() == limit {
                break;
            }
            if !seen.contains(&raw) {
                seen.push(raw);
            }
        }
        seen
    }

    /// Summarize how many rows lost their valuation or join date.
    pub fn cleaning_report(&self) -> CleaningReport {
        CleaningReport {
            rows: self.records.len(),
            missing_valuations: self.records.iter().filter(|r| r.valuation.is_none()).count(),
            missing_dates: self.records.iter().filter(|r| r.date_joined.is_none()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: Option<&str>, valuation: Option<f64>) -> Record {
        Record {
            valuation_raw: raw.map(str::to_string),
            valuation,
            ..Default::default()
        }
    }

    #[test]
    fn unparsed_valuations_are_distinct_and_capped() {
        let ds = Dataset::from_records(vec![
            record(Some("abc"), None),
            record(Some("$1.2B"), Some(1.2)),
            record(Some("abc"), None),
            record(Some("  "), None),
            record(None, None),
            record(Some("n/a"), None),
            record(Some("tbd"), None),
        ]);

        assert_eq!(ds.unparsed_valuations(10), vec!["abc", "n/a", "tbd"]);
        assert_eq!(ds.unparsed_valuations(2), vec!["abc", "n/a"]);
        assert!(ds.unparsed_valuations(0).is_empty());
    }

    #[test]
    fn cleaning_report_counts_missing_fields() {
        let mut dated = record(Some("$2B"), Some(2.0));
        dated.date_joined = NaiveDate::from_ymd_opt(2020, 1, 1);
        let ds = Dataset::from_records(vec![dated, record(Some("abc"), None)]);

        let report = ds.cleaning_report();
        assert_eq!(report.rows, 2);
        assert_eq!(report.missing_valuations, 1);
        assert_eq!(report.missing_dates, 2);
    }
}
