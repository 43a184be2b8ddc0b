//! Typed record extraction.
//!
//! Turns `Table`s into the narrow row views each chart reads.
//!
//! - **Per-chart schema**: every extractor validates its own column list
//!   before the first row is touched; other columns may be absent
//! - **Fail fast**: a malformed cell aborts the load with its line and column,
//!   since silently skipping a stat row would skew every aggregate downstream
//! - **No aggregation logic here**

use std::path::Path;

use crate::domain::{League, PlayTime, PlayerJoin, PlayerLabel, SeasonStat};
use crate::error::{AppError, ChartError};
use crate::io::schema::{
    self, AVG_PLAYER_COLUMNS, AVG_STAT_COLUMNS, BAR_PLAYER_COLUMNS, HISTOGRAM_STAT_COLUMNS, SCATTER_PLAYER_COLUMNS,
    SCATTER_STAT_COLUMNS,
};
use crate::io::table::{Row, Table};

/// Both input datasets of a run, still untyped.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub players: Table,
    pub stats: Table,
}

impl Datasets {
    pub fn load(players_csv: &Path, stats_csv: &Path) -> Result<Self, AppError> {
        Ok(Self {
            players: Table::from_path("players", players_csv)?,
            stats: Table::from_path("stats", stats_csv)?,
        })
    }
}

fn extract<T>(
    table: &Table,
    required: &[&str],
    parse: impl Fn(&Row<'_>) -> Result<T, ChartError>,
) -> Result<Vec<T>, ChartError> {
    schema::validate(table, required)?;
    table.rows().map(|row| parse(&row)).collect()
}

/// Names and tick labels, in row order.
pub fn player_labels(table: &Table) -> Result<Vec<PlayerLabel>, ChartError> {
    extract(table, &SCATTER_PLAYER_COLUMNS, |row| {
        Ok(PlayerLabel {
            player_name: row.get("player_name")?.to_string(),
            player_label: row.get("player_label")?.to_string(),
        })
    })
}

/// One `cur_rookie_year` per player.
pub fn player_rookie_years(table: &Table) -> Result<Vec<u32>, ChartError> {
    extract(table, &AVG_PLAYER_COLUMNS, |row| positive_u32(row, "cur_rookie_year"))
}

pub fn player_joins(table: &Table) -> Result<Vec<PlayerJoin>, ChartError> {
    extract(table, &BAR_PLAYER_COLUMNS, |row| {
        let joined_year = row.parse_integral("joined_year")?;
        let joined_year = i32::try_from(joined_year)
            .map_err(|_| row.error("joined_year", format!("year {joined_year} out of range")))?;
        Ok(PlayerJoin {
            joined_year,
            joined_league: row.parse::<League>("joined_league")?,
        })
    })
}

/// Per-player minutes for the scatter.
pub fn play_times(table: &Table) -> Result<Vec<PlayTime>, ChartError> {
    extract(table, &SCATTER_STAT_COLUMNS, |row| {
        Ok(PlayTime {
            player_name: row.get("player_name")?.to_string(),
            rookie_year: positive_u32(row, "rookie_year")?,
            league: checked_league(row)?,
            minutes: non_negative(row, "minutes")?,
        })
    })
}

/// Season statistics for the cohort averages. Player names are not read.
pub fn season_stats(table: &Table) -> Result<Vec<SeasonStat>, ChartError> {
    extract(table, &AVG_STAT_COLUMNS, |row| {
        Ok(SeasonStat {
            rookie_year: positive_u32(row, "rookie_year")?,
            league: checked_league(row)?,
            minutes: non_negative(row, "minutes")?,
            apps: non_negative(row, "apps")?,
            goals: non_negative(row, "goals")?,
        })
    })
}

/// `(league, minutes)` per stat row. The league comes from `league_id` alone.
pub fn league_minutes(table: &Table) -> Result<Vec<(League, f64)>, ChartError> {
    extract(table, &HISTOGRAM_STAT_COLUMNS, |row| {
        Ok((league_from_id(row)?, non_negative(row, "minutes")?))
    })
}

fn league_from_id(row: &Row<'_>) -> Result<League, ChartError> {
    let league_id = row.parse_integral("league_id")?;
    League::from_id(league_id).ok_or_else(|| row.error("league_id", format!("expected 1, 2 or 3, got {league_id}")))
}

/// Both league columns, which must name the same league.
fn checked_league(row: &Row<'_>) -> Result<League, ChartError> {
    let league_id = row.parse_integral("league_id")?;
    let league = row.parse::<League>("league")?;
    if League::from_id(league_id) != Some(league) {
        return Err(ChartError::LeagueMismatch {
            line: row.line(),
            league: league.to_string(),
            league_id,
        });
    }
    Ok(league)
}

fn positive_u32(row: &Row<'_>, column: &str) -> Result<u32, ChartError> {
    let v = row.parse_integral(column)?;
    match u32::try_from(v) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(row.error(column, format!("expected a positive integer, got {v}"))),
    }
}

fn non_negative(row: &Row<'_>, column: &str) -> Result<f64, ChartError> {
    let v = row.parse::<f64>(column)?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(row.error(column, format!("expected a finite value >= 0, got {v}")))
    }
}
