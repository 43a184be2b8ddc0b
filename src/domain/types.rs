//! Shared domain types.
//!
//! Records are created once from CSV input and then only read. Derived data
//! (indices, cohorts, aggregates, chart specs) is built as new values by each
//! pipeline step.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Vertical units reserved per player: one row per league plus a spacer.
pub const BAND_HEIGHT: u32 = 4;

/// Number of rookie-year slots on the horizontal axis (1..=7).
pub const ROOKIE_YEAR_SLOTS: u32 = 7;

/// Upper bound of the minutes domain (40 full matches).
pub const MAX_MINUTES: f64 = 3600.0;

/// J-League division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum League {
    J1,
    J2,
    J3,
}

impl League {
    /// Fixed category order used by every chart.
    pub const ALL: [League; 3] = [League::J1, League::J2, League::J3];

    pub fn id(self) -> u32 {
        match self {
            League::J1 => 1,
            League::J2 => 2,
            League::J3 => 3,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(League::J1),
            2 => Some(League::J2),
            3 => Some(League::J3),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            League::J1 => "J1",
            League::J2 => "J2",
            League::J3 => "J3",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "J1" => Ok(League::J1),
            "J2" => Ok(League::J2),
            "J3" => Ok(League::J3),
            other => Err(format!("unknown league '{other}' (expected J1, J2 or J3)")),
        }
    }
}

/// One row of the player dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_name: String,
    pub player_label: String,
    pub joined_year: i32,
    pub joined_league: League,
    pub cur_rookie_year: u32,
}

/// One (player, rookie year, league) row of the stat dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub player_name: String,
    pub rookie_year: u32,
    pub league: League,
    pub minutes: f64,
    pub apps: f64,
    pub goals: f64,
}

impl StatRecord {
    pub fn league_id(&self) -> u32 {
        self.league.id()
    }
}

// Narrow views of the two datasets. Each chart reads only the columns it
// draws, so a file missing an unrelated column still charts.

/// Who a player is and how their axis tick reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLabel {
    pub player_name: String,
    pub player_label: String,
}

/// When and where a player joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerJoin {
    pub joined_year: i32,
    pub joined_league: League,
}

/// One player's minutes in one rookie year and league.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayTime {
    pub player_name: String,
    pub rookie_year: u32,
    pub league: League,
    pub minutes: f64,
}

/// A season's statistics, without the player it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonStat {
    pub rookie_year: u32,
    pub league: League,
    pub minutes: f64,
    pub apps: f64,
    pub goals: f64,
}

/// Number of players still active at a given rookie year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortCount {
    pub rookie_year: u32,
    pub player_count: u32,
}

/// What to do with rookie years whose cumulative count is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CohortPolicy {
    /// Drop them; a zero cohort cannot be averaged over.
    #[default]
    DropEmpty,
    /// Keep them in the output (the average step will then refuse them).
    KeepEmpty,
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS notation, e.g. `rgb(31, 119, 180)`.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Default qualitative palette; series take colors from it in order.
pub const DEFAULT_PALETTE: [Rgb; 10] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
    Rgb(127, 127, 127),
    Rgb(188, 189, 34),
    Rgb(23, 190, 207),
];

/// Which charts a run should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Per-player minutes by rookie year.
    Scatter,
    /// Per-active-player average minutes by rookie year.
    Avg,
    /// Minutes distribution per league.
    Histogram,
    /// Players per join year and league.
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Scatter, ChartKind::Avg, ChartKind::Histogram, ChartKind::Bar];

    /// File stem used for exported artifacts.
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Scatter => "play_time_scatter",
            ChartKind::Avg => "avg_play_time_scatter",
            ChartKind::Histogram => "play_time_histogram",
            ChartKind::Bar => "player_count_bar",
        }
    }
}

/// Output artifacts written per chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Chart spec JSON only.
    Json,
    /// Rendered SVG only.
    Svg,
    /// Both.
    Both,
}

impl OutputFormat {
    pub fn wants_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn wants_svg(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Both)
    }
}

/// Runtime configuration for a chart run (built from CLI args/env).
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub players_csv: PathBuf,
    pub stats_csv: PathBuf,
    pub out_dir: PathBuf,
    pub charts: Vec<ChartKind>,
    pub format: OutputFormat,
    /// Restrict the per-player scatter to these names (input order is kept).
    pub player_filter: Vec<String>,
    pub svg_width: u32,
    pub print_summary: bool,
}
