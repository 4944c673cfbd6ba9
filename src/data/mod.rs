//! Data module - CSV loading, cleaning and aggregation

mod aggregator;
mod cleaner;
mod dataset;
mod loader;

pub use aggregator::{
    Aggregates, Aggregator, CategoryCount, IndustryValuation, YearCount, TOP_N,
    VALUATION_OUTLIER_CUTOFF,
};
pub use cleaner::{clean_record, coerce_valuation, parse_join_date};
pub use dataset::{
    CleaningReport, Dataset, Record, COL_COMPANY, COL_COUNTRY, COL_DATE_JOINED, COL_INDUSTRY,
    COL_VALUATION,
};
pub use loader::{DataLoader, LoaderError, DEFAULT_CSV_PATH};
