//! `rookie-charts` library crate.
//!
//! The binary (`rookie`) is a thin wrapper around this library so that:
//!
//! - the chart-data pipeline is testable without spawning processes
//! - chart specs can be consumed by other front-ends (notebooks, web)
//! - rendering stays behind the `render::Renderer` seam

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod layout;
pub mod logging;
pub mod render;
pub mod report;
