//! Data Aggregator Module
//! Derives the four chart series from a cleaned dataset. Every function here
//! is read-only over the `Dataset`.

use super::dataset::{Dataset, Record};
use crate::stats::{BoxSummary, StatsCalculator};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Valuations at or above this many billions are treated as outliers.
pub const VALUATION_OUTLIER_CUTOFF: f64 = 200.0;

/// Number of categories kept by the frequency rankings.
pub const TOP_N: usize = 10;

/// Row count for one category value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Valuations of one top industry, with its median used as the sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryValuation {
    pub industry: String,
    /// Number of rows in the industry, missing valuations included.
    pub count: usize,
    pub valuations: Vec<f64>,
    /// `None` when no row in the industry has a valuation.
    pub median: Option<f64>,
    pub summary: Option<BoxSummary>,
}

/// Number of unicorns that joined in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// All derived series for one dashboard run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub valuation_subset: Vec<f64>,
    pub top_countries: Vec<CategoryCount>,
    pub top_industries: Vec<IndustryValuation>,
    pub year_counts: Vec<YearCount>,
}

/// Computes derived series over a dataset.
pub struct Aggregator;

impl Aggregator {
    /// Compute every derived series for the dashboard.
    pub fn aggregate(dataset: &Dataset) -> Aggregates {
        let aggregates = Aggregates {
            valuation_subset: Self::valuation_subset(dataset),
            top_countries: Self::top_countries(dataset),
            top_industries: Self::top_industries(dataset),
            year_counts: Self::year_counts(dataset),
        };

        debug!(
            "Aggregated {} valuations, {} countries, {} industries, {} years",
            aggregates.valuation_subset.len(),
            aggregates.top_countries.len(),
            aggregates.top_industries.len(),
            aggregates.year_counts.len()
        );

        aggregates
    }

    /// Present valuations strictly below the outlier cutoff, in row order.
    pub fn valuation_subset(dataset: &Dataset) -> Vec<f64> {
        dataset
            .records()
            .iter()
            .filter_map(|r| r.valuation)
            .filter(|v| *v < VALUATION_OUTLIER_CUTOFF)
            .collect()
    }

    /// Rank category values by descending count, ties in first-seen order.
    pub fn rank_by_frequency<'a, I>(values: I, limit: usize) -> Vec<CategoryCount>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut counts: Vec<CategoryCount> = Vec::new();

        for value in values {
            match index.get(value) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push(CategoryCount {
                        label: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // sort_by is stable, so equal counts keep first-seen order
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(limit);
        counts
    }

    pub fn top_countries(dataset: &Dataset) -> Vec<CategoryCount> {
        Self::rank_by_frequency(
            dataset.records().iter().filter_map(|r| r.country.as_deref()),
            TOP_N,
        )
    }

    /// The most frequent industries, ordered by descending median valuation.
    pub fn top_industries(dataset: &Dataset) -> Vec<IndustryValuation> {
        let ranked = Self::rank_by_frequency(
            dataset.records().iter().filter_map(|r| r.industry.as_deref()),
            TOP_N,
        );

        let mut industries: Vec<IndustryValuation> = ranked
            .into_iter()
            .map(|category| {
                let valuations: Vec<f64> = dataset
                    .records()
                    .iter()
                    .filter(|r| r.industry.as_deref() == Some(category.label.as_str()))
                    .filter_map(|r: &Record| r.valuation)
                    .collect();

                IndustryValuation {
                    median: StatsCalculator::median(&valuations),
                    summary: StatsCalculator::box_summary(&valuations),
                    industry: category.label,
                    count: category.count,
                    valuations,
                }
            })
            .collect();

        industries.sort_by(|a, b| Self::compare_medians_desc(a.median, b.median));
        industries
    }

    /// Descending by median; industries without a median go last.
    fn compare_medians_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Rows per join year, ascending, years without a date excluded.
    pub fn year_counts(dataset: &Dataset) -> Vec<YearCount> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for year in dataset.records().iter().filter_map(|r| r.year_joined) {
            *counts.entry(year).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, industry: &str, valuation: Option<f64>, year: Option<i32>) -> Record {
        Record {
            country: Some(country.to_string()),
            industry: Some(industry.to_string()),
            valuation,
            year_joined: year,
            ..Record::default()
        }
    }

    #[test]
    fn subset_excludes_outliers_and_missing() {
        let ds = Dataset::from_records(vec![
            record("US", "AI", Some(1.2), None),
            record("US", "AI", None, None),
            record("US", "AI", Some(200.0), None),
            record("US", "AI", Some(199.9), None),
        ]);
        assert_eq!(Aggregator::valuation_subset(&ds), vec![1.2, 199.9]);
    }

    #[test]
    fn ranking_breaks_ties_by_first_seen() {
        let ranked = Aggregator::rank_by_frequency(["b", "a", "c", "a", "b", "d"], 3);
        let labels: Vec<&str> = ranked.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn ranking_is_case_sensitive() {
        let ranked = Aggregator::rank_by_frequency(["US", "us", "US"], TOP_N);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn top_countries_caps_at_ten() {
        let records = (0..15)
            .flat_map(|i| {
                (0..=i).map(move |_| record(&format!("C{i}"), "AI", Some(1.0), Some(2020)))
            })
            .collect();
        let ds = Dataset::from_records(records);

        let top = Aggregator::top_countries(&ds);
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0].label, "C14");
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn fewer_categories_yield_fewer_groups() {
        let ds = Dataset::from_records(vec![record("US", "AI", Some(1.0), None)]);
        assert_eq!(Aggregator::top_countries(&ds).len(), 1);
        assert_eq!(Aggregator::top_industries(&ds).len(), 1);
    }

    #[test]
    fn industries_ordered_by_median_not_frequency() {
        let ds = Dataset::from_records(vec![
            record("US", "Fintech", Some(1.0), None),
            record("US", "Fintech", Some(2.0), None),
            record("US", "Fintech", Some(3.0), None),
            record("US", "AI", Some(10.0), None),
            record("US", "AI", Some(20.0), None),
            record("US", "Health", None, None),
        ]);

        let industries = Aggregator::top_industries(&ds);
        let order: Vec<&str> = industries.iter().map(|i| i.industry.as_str()).collect();
        assert_eq!(order, vec!["AI", "Fintech", "Health"]);
        assert_eq!(industries[0].median, Some(15.0));
        assert_eq!(industries[2].median, None);
        assert_eq!(industries[2].count, 1);
        assert!(industries[2].summary.is_none());
    }

    #[test]
    fn only_top_ten_industries_are_ranked() {
        let mut records: Vec<Record> = (0..10)
            .flat_map(|i| {
                (0..2).map(move |_| record("US", &format!("I{i}"), Some(i as f64), None))
            })
            .collect();
        records.push(record("US", "Rare", Some(999.0), None));
        let ds = Dataset::from_records(records);

        let industries = Aggregator::top_industries(&ds);
        assert_eq!(industries.len(), TOP_N);
        assert!(industries.iter().all(|i| i.industry != "Rare"));
        assert_eq!(industries[0].industry, "I9");
    }

    #[test]
    fn year_counts_are_ascending_and_unique() {
        let ds = Dataset::from_records(vec![
            record("US", "AI", None, Some(2021)),
            record("US", "AI", None, Some(2015)),
            record("US", "AI", None, None),
            record("US", "AI", None, Some(2021)),
        ]);

        assert_eq!(
            Aggregator::year_counts(&ds),
            vec![
                YearCount {
                    year: 2015,
                    count: 1
                },
                YearCount {
                    year: 2021,
                    count: 2
                },
            ]
        );
    }
}
