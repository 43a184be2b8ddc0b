//! Per-cohort averages of season statistics.
//!
//! Stat rows are summed per `(rookie_year, league)` and divided by the number
//! of players still active in that rookie year, giving an average per
//! surviving player (players who already left contribute zero, not a gap).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{CohortCount, League, SeasonStat};
use crate::error::ChartError;

/// Summed statistics of one `(rookie_year, league)` group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatTotals {
    pub minutes: f64,
    pub apps: f64,
    pub goals: f64,
}

impl StatTotals {
    fn add(&mut self, s: &SeasonStat) {
        self.minutes += s.minutes;
        self.apps += s.apps;
        self.goals += s.goals;
    }

    fn per_player(&self, player_count: u32) -> Self {
        let n = player_count as f64;
        Self {
            minutes: self.minutes / n,
            apps: self.apps / n,
            goals: self.goals / n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CohortAverage {
    pub rookie_year: u32,
    pub league: League,
    pub player_count: u32,
    pub average: StatTotals,
}

/// Sum `minutes`, `apps` and `goals` per `(rookie_year, league)`, ordered by key.
pub fn sum_by_year_and_league(stats: &[SeasonStat]) -> BTreeMap<(u32, League), StatTotals> {
    let mut totals: BTreeMap<(u32, League), StatTotals> = BTreeMap::new();
    for s in stats {
        totals.entry((s.rookie_year, s.league)).or_default().add(s);
    }
    totals
}

/// Average each group over its cohort's active player count.
///
/// Groups whose rookie year has no cohort entry are dropped (inner join). A
/// joined cohort with zero players is a precondition violation and fails with
/// `ChartError::DegenerateCohort`.
pub fn cohort_averages(stats: &[SeasonStat], cohorts: &[CohortCount]) -> Result<Vec<CohortAverage>, ChartError> {
    let counts: BTreeMap<u32, u32> = cohorts.iter().map(|c| (c.rookie_year, c.player_count)).collect();

    let mut out = Vec::new();
    for ((rookie_year, league), totals) in sum_by_year_and_league(stats) {
        let Some(&player_count) = counts.get(&rookie_year) else {
            continue;
        };
        if player_count == 0 {
            return Err(ChartError::DegenerateCohort { rookie_year });
        }
        out.push(CohortAverage {
            rookie_year,
            league,
            player_count,
            average: totals.per_player(player_count),
        });
    }
    Ok(out)
}
