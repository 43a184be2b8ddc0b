//! Required-column checks.
//!
//! Every pipeline calls `validate` on each input table before reading a row,
//! so a missing column surfaces as one error naming all absent columns rather
//! than as a parse failure on line 2. Each chart requires only the columns it
//! reads; the full dataset layouts are what `demo` writes.

use crate::error::ChartError;
use crate::io::table::Table;

/// Columns of the player dataset.
pub const PLAYER_COLUMNS: [&str; 5] = [
    "player_name",
    "player_label",
    "joined_year",
    "joined_league",
    "cur_rookie_year",
];

/// Columns of the per-season stat dataset.
pub const STAT_COLUMNS: [&str; 7] = [
    "player_name",
    "rookie_year",
    "league_id",
    "league",
    "minutes",
    "apps",
    "goals",
];

/// Per-player scatter: who the players are and their minutes.
pub const SCATTER_PLAYER_COLUMNS: [&str; 2] = ["player_name", "player_label"];
pub const SCATTER_STAT_COLUMNS: [&str; 5] = ["player_name", "rookie_year", "league_id", "league", "minutes"];

/// Cohort averages: the players' current rookie years and every season stat.
pub const AVG_PLAYER_COLUMNS: [&str; 1] = ["cur_rookie_year"];
pub const AVG_STAT_COLUMNS: [&str; 6] = ["rookie_year", "league_id", "league", "minutes", "apps", "goals"];

pub const HISTOGRAM_STAT_COLUMNS: [&str; 2] = ["league_id", "minutes"];

pub const BAR_PLAYER_COLUMNS: [&str; 2] = ["joined_year", "joined_league"];

/// Fail with `ChartError::Schema` if any of `required` is absent from `table`.
///
/// Missing names are reported in the order they were requested.
pub fn validate(table: &Table, required: &[&str]) -> Result<(), ChartError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !table.has_column(column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ChartError::Schema {
            dataset: table.name().to_string(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_table_passes() {
        let table = Table::from_reader("players", PLAYER_COLUMNS.join(",").as_bytes()).unwrap();
        assert!(validate(&table, &PLAYER_COLUMNS).is_ok());
    }

    #[test]
    fn reports_every_missing_column() {
        let table = Table::from_reader("stats", "player_name,league\n".as_bytes()).unwrap();
        let err = validate(&table, &STAT_COLUMNS).unwrap_err();
        assert_eq!(
            err,
            ChartError::Schema {
                dataset: "stats".to_string(),
                missing: vec![
                    "rookie_year".to_string(),
                    "league_id".to_string(),
                    "minutes".to_string(),
                    "apps".to_string(),
                    "goals".to_string(),
                ],
            }
        );
    }

    #[test]
    fn chart_columns_are_subsets_of_the_full_layouts() {
        for column in SCATTER_PLAYER_COLUMNS.iter().chain(&AVG_PLAYER_COLUMNS).chain(&BAR_PLAYER_COLUMNS) {
            assert!(PLAYER_COLUMNS.contains(column), "{column}");
        }
        for column in SCATTER_STAT_COLUMNS.iter().chain(&AVG_STAT_COLUMNS).chain(&HISTOGRAM_STAT_COLUMNS) {
            assert!(STAT_COLUMNS.contains(column), "{column}");
        }
    }

    #[test]
    fn empty_requirement_always_passes() {
        let table = Table::from_reader("stats", "a\n".as_bytes()).unwrap();
        assert!(validate(&table, &[]).is_ok());
    }
}
