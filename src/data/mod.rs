//! Data sources other than user CSVs.

pub mod sample;

pub use sample::{SampleData, generate_sample, write_players_csv, write_stats_csv};
