//! Command-line parsing for the rookie chart builder.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation/layout code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ChartKind, OutputFormat};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rookie", version, about = "J-League rookie play-time charts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Per-player play time by rookie year and league.
    Scatter(ChartArgs),
    /// Average play time per active player, with the cohort table.
    Avg(ChartArgs),
    /// Histogram of minutes per season, split by league.
    Histogram(ChartArgs),
    /// Players per join year, stacked by join league.
    Bar(ChartArgs),
    /// Build every chart above.
    All(ChartArgs),
    /// Write a synthetic players/stats CSV pair to play with.
    Demo(DemoArgs),
}

impl Command {
    /// Charts a chart subcommand builds (empty for `demo`).
    pub fn charts(&self) -> Vec<ChartKind> {
        match self {
            Command::Scatter(_) => vec![ChartKind::Scatter],
            Command::Avg(_) => vec![ChartKind::Avg],
            Command::Histogram(_) => vec![ChartKind::Histogram],
            Command::Bar(_) => vec![ChartKind::Bar],
            Command::All(_) => ChartKind::ALL.to_vec(),
            Command::Demo(_) => Vec::new(),
        }
    }
}

/// Common options for every chart subcommand.
#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Player CSV (player_name, player_label, joined_year, joined_league, cur_rookie_year).
    #[arg(long, env = "ROOKIE_PLAYERS_CSV", value_name = "CSV")]
    pub players: PathBuf,

    /// Stat CSV (player_name, rookie_year, league_id, league, minutes, apps, goals).
    #[arg(long, env = "ROOKIE_STATS_CSV", value_name = "CSV")]
    pub stats: PathBuf,

    /// Output directory for chart JSON/SVG files.
    #[arg(short = 'o', long, env = "ROOKIE_OUT_DIR", default_value = "charts")]
    pub out: PathBuf,

    /// Which files to write per chart.
    #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,

    /// Only show these players in the scatter (repeatable; dataset order is kept).
    #[arg(long = "player", value_name = "NAME")]
    pub player: Vec<String>,

    /// SVG width (pixels).
    #[arg(long, default_value_t = 900)]
    pub width: u32,

    /// Print summaries and an ASCII preview in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal output.
    #[arg(long)]
    pub no_plot: bool,
}

/// Options for the synthetic dataset.
#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Random seed; the same seed always writes the same files.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of synthetic players.
    #[arg(short = 'n', long, default_value_t = 40)]
    pub players: usize,

    /// Directory the two CSVs are written to.
    #[arg(short = 'o', long, env = "ROOKIE_OUT_DIR", default_value = "demo-data")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn player_filter_is_repeatable() {
        let cli = Cli::try_parse_from([
            "rookie", "scatter", "--players", "p.csv", "--stats", "s.csv", "--player", "a", "--player", "b",
        ])
        .unwrap();
        let Command::Scatter(args) = &cli.command else {
            panic!("expected scatter, got {:?}", cli.command);
        };
        assert_eq!(args.player, ["a", "b"]);
        assert_eq!(args.format, OutputFormat::Both);
        assert_eq!(cli.command.charts(), [ChartKind::Scatter]);
    }

    #[test]
    fn all_builds_every_chart() {
        let cli = Cli::try_parse_from(["rookie", "all", "--players", "p.csv", "--stats", "s.csv", "--format", "json"])
            .unwrap();
        assert_eq!(cli.command.charts(), ChartKind::ALL);
    }
}
