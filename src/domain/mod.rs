//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - full input rows (`PlayerRecord`, `StatRecord`) and the `League` enum
//! - the narrow per-chart views of those rows (`PlayerLabel`, `PlayerJoin`,
//!   `PlayTime`, `SeasonStat`)
//! - derived cohort counts (`CohortCount`) and the zero-cohort policy
//! - layout constants and the default color palette
//! - run configuration (`ChartConfig`)

pub mod types;

pub use types::*;
