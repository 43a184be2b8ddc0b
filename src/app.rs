//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the `tracing` subscriber
//! - parses CLI arguments
//! - runs the chart pipelines
//! - prints reports/plots
//! - writes the chart files

use clap::Parser;

use crate::cli::{ChartArgs, Command, DemoArgs};
use crate::domain::{ChartConfig, ChartKind};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rookie` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; the environment and flags still apply.
    let _ = dotenvy::dotenv();
    crate::logging::init_tracing();

    let cli = crate::cli::Cli::parse();
    let charts = cli.command.charts();

    match cli.command {
        Command::Demo(args) => handle_demo(&args),
        Command::Scatter(args)
        | Command::Avg(args)
        | Command::Histogram(args)
        | Command::Bar(args)
        | Command::All(args) => handle_charts(&chart_config_from_args(&args, charts)),
    }
}

fn handle_charts(config: &ChartConfig) -> Result<(), AppError> {
    if config.print_summary {
        println!("{}", crate::report::format_run_header(config));
    }

    let run = pipeline::run_charts(config, &crate::logging::TracingLog)?;

    for output in &run.outputs {
        if config.print_summary {
            println!("{}", output.chart.summary);
            if let Some(plot) = &output.ascii {
                println!("{plot}");
            }
        }
        for path in &output.written {
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

fn handle_demo(args: &DemoArgs) -> Result<(), AppError> {
    let sample = crate::data::generate_sample(args.seed, args.players)?;

    crate::io::export::ensure_dir(&args.out)?;
    let players_csv = args.out.join("players.csv");
    let stats_csv = args.out.join("stats.csv");
    crate::data::write_players_csv(&players_csv, &sample.players)?;
    crate::data::write_stats_csv(&stats_csv, &sample.stats)?;

    tracing::info!(
        players = sample.players.len(),
        stat_rows = sample.stats.len(),
        seed = args.seed,
        "demo dataset written"
    );
    println!("wrote {}", players_csv.display());
    println!("wrote {}", stats_csv.display());
    println!(
        "try: rookie all --players {} --stats {}",
        players_csv.display(),
        stats_csv.display()
    );
    Ok(())
}

pub fn chart_config_from_args(args: &ChartArgs, charts: Vec<ChartKind>) -> ChartConfig {
    ChartConfig {
        players_csv: args.players.clone(),
        stats_csv: args.stats.clone(),
        out_dir: args.out.clone(),
        charts,
        format: args.format,
        player_filter: args.player.clone(),
        svg_width: args.width,
        print_summary: args.plot && !args.no_plot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutputFormat;

    #[test]
    fn no_plot_disables_terminal_output() {
        let cli = crate::cli::Cli::try_parse_from([
            "rookie", "avg", "--players", "p.csv", "--stats", "s.csv", "--no-plot", "--format", "svg",
        ])
        .unwrap();
        let charts = cli.command.charts();
        let Command::Avg(args) = &cli.command else {
            panic!("expected avg");
        };

        let config = chart_config_from_args(args, charts);
        assert!(!config.print_summary);
        assert_eq!(config.format, OutputFormat::Svg);
        assert_eq!(config.charts, [ChartKind::Avg]);
    }
}
