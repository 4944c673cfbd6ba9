//! Unicorn Dashboard - CSV Cleaning, Aggregation & Interactive Charts
//!
//! Loads a table of unicorn startups, coerces its valuation and join-date
//! columns, derives four chart series and lays them out as a dashboard page.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
