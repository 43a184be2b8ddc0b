//! Shared "chart run" logic behind every chart subcommand.
//!
//! CSV load -> schema check -> chart pipeline -> render (with retry) -> files
//!
//! The binary only decides what to print.

use std::path::PathBuf;

use crate::chart::{self, BuiltChart};
use crate::domain::ChartConfig;
use crate::error::AppError;
use crate::io::Datasets;
use crate::io::export::{self, ChartFile};
use crate::logging::PipelineLog;
use crate::render::{AsciiRenderer, Renderer, RetryPolicy, SvgRenderer, render_with_retry};

/// One chart's results.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub chart: BuiltChart,
    /// Terminal preview, when requested and drawable.
    pub ascii: Option<String>,
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub outputs: Vec<ChartOutput>,
}

/// Load both datasets and run every chart in `config.charts`.
pub fn run_charts(config: &ChartConfig, log: &dyn PipelineLog) -> Result<RunOutput, AppError> {
    let data = Datasets::load(&config.players_csv, &config.stats_csv)?;
    run_charts_with_data(config, &data, log)
}

/// Run the charts against already loaded datasets.
pub fn run_charts_with_data(config: &ChartConfig, data: &Datasets, log: &dyn PipelineLog) -> Result<RunOutput, AppError> {
    if config.format.wants_json() || config.format.wants_svg() {
        export::ensure_dir(&config.out_dir)?;
    }

    let mut outputs = Vec::with_capacity(config.charts.len());
    for &kind in &config.charts {
        let built = chart::build(kind, data, &config.player_filter, log)?;
        let mut written = Vec::new();

        if config.format.wants_json() {
            let path = export::output_path(&config.out_dir, kind, "json");
            let file = ChartFile::new(kind, built.spec.clone(), &config.players_csv, &config.stats_csv);
            export::write_chart_json(&path, &file)?;
            written.push(path);
        }

        if config.format.wants_svg() {
            let mut renderer = SvgRenderer { width: config.svg_width };
            let svg = render_with_retry(|| renderer.render(&built.spec), RetryPolicy::default(), log, &built.spec)?;
            let path = export::output_path(&config.out_dir, kind, "svg");
            export::write_svg(&path, &svg)?;
            written.push(path);
        }

        // Best-effort preview.
        let ascii = if config.print_summary {
            AsciiRenderer::default().render(&built.spec).ok()
        } else {
            None
        };

        outputs.push(ChartOutput {
            chart: built,
            ascii,
            written,
        });
    }

    Ok(RunOutput { outputs })
}
