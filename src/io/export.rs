//! Export chart specs (JSON) and rendered figures (SVG).
//!
//! The JSON is meant to be easy to consume from a notebook or a web front-end:
//! it is the `ChartSpec` as-is, wrapped with what produced it and when.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::spec::ChartSpec;
use crate::domain::ChartKind;
use crate::error::AppError;

/// On-disk JSON document for one chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartFile {
    pub chart: String,
    pub generated_at: DateTime<Utc>,
    pub players_csv: String,
    pub stats_csv: String,
    pub spec: ChartSpec,
}

impl ChartFile {
    pub fn new(kind: ChartKind, spec: ChartSpec, players_csv: &Path, stats_csv: &Path) -> Self {
        Self {
            chart: kind.file_stem().to_string(),
            generated_at: Utc::now(),
            players_csv: players_csv.display().to_string(),
            stats_csv: stats_csv.display().to_string(),
            spec,
        }
    }
}

/// `<out_dir>/<stem>.<ext>`
pub fn output_path(out_dir: &Path, kind: ChartKind, ext: &str) -> PathBuf {
    out_dir.join(format!("{}.{ext}", kind.file_stem()))
}

pub fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create output directory '{}': {e}", dir.display())))
}

pub fn write_chart_json(path: &Path, file: &ChartFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create chart JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut writer, file)
        .map_err(|e| AppError::new(2, format!("Failed to write chart JSON '{}': {e}", path.display())))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write chart JSON '{}': {e}", path.display())))
}

pub fn write_svg(path: &Path, svg: &str) -> Result<(), AppError> {
    fs::write(path, svg).map_err(|e| AppError::new(2, format!("Failed to write SVG '{}': {e}", path.display())))
}
