//! Aggregations feeding the charts.
//!
//! - rookie-year cohorts (`cohort`)
//! - per-cohort averages (`stats`)
//! - minutes histogram buckets (`histogram`)
//! - join-year/league counts (`bar`)

pub mod bar;
pub mod cohort;
pub mod histogram;
pub mod stats;

pub use bar::count_by_join;
pub use cohort::{cohort_counts, raw_counts};
pub use histogram::{bucket_of, bucketize, minutes_bins, minutes_by_league};
pub use stats::{CohortAverage, StatTotals, cohort_averages, sum_by_year_and_league};
