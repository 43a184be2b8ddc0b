//! Terminal reports for finished charts.
//!
//! Formatting lives here so the aggregation code stays free of presentation,
//! and output changes stay in one place.

mod format;

pub use format::{
    format_average_summary, format_bar_counts, format_histogram_summary, format_run_header,
    format_scatter_summary,
};
