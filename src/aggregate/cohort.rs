//! Rookie-year cohorts.
//!
//! `player_count` for year `y` is the number of players whose current rookie
//! year is `y` or later, i.e. the players who were still active in their
//! `y`-th season. Computed as a suffix sum over years `1..=7`.

use std::collections::BTreeMap;

use crate::domain::{CohortCount, CohortPolicy, ROOKIE_YEAR_SLOTS};

/// Raw number of players per current rookie year, over the full `1..=7` domain.
///
/// Takes one `cur_rookie_year` per player. Years with no players are present
/// with a zero count. Rookie years outside the domain are not counted.
pub fn raw_counts(cur_rookie_years: &[u32]) -> Vec<CohortCount> {
    let mut by_year: BTreeMap<u32, u32> = (1..=ROOKIE_YEAR_SLOTS).map(|y| (y, 0)).collect();
    for year in cur_rookie_years {
        if let Some(count) = by_year.get_mut(year) {
            *count += 1;
        }
    }
    by_year
        .into_iter()
        .map(|(rookie_year, player_count)| CohortCount {
            rookie_year,
            player_count,
        })
        .collect()
}

/// Players still active at each rookie year, ascending by year.
pub fn cohort_counts(cur_rookie_years: &[u32], policy: CohortPolicy) -> Vec<CohortCount> {
    let mut counts = raw_counts(cur_rookie_years);

    let mut running = 0u32;
    for c in counts.iter_mut().rev() {
        running += c.player_count;
        c.player_count = running;
    }

    if policy == CohortPolicy::DropEmpty {
        counts.retain(|c| c.player_count > 0);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_pairs(counts: &[CohortCount]) -> Vec<(u32, u32)> {
        counts.iter().map(|c| (c.rookie_year, c.player_count)).collect()
    }

    #[test]
    fn suffix_sum_counts_players_still_active() {
        let players = [1, 1, 2, 4, 4, 4];
        let counts = cohort_counts(&players, CohortPolicy::DropEmpty);
        assert_eq!(as_pairs(&counts), [(1, 6), (2, 4), (3, 3), (4, 3)]);
    }

    #[test]
    fn counts_are_non_increasing_and_raw_sums_match() {
        let years = [3, 1, 7, 2, 2, 5, 1, 6];

        let raw = raw_counts(&years);
        assert_eq!(raw.len(), 7);
        assert_eq!(raw.iter().map(|c| c.player_count).sum::<u32>(), years.len() as u32);

        let counts = cohort_counts(&years, CohortPolicy::DropEmpty);
        assert!(counts.windows(2).all(|w| w[0].player_count >= w[1].player_count));
        assert_eq!(counts[0].player_count, years.len() as u32);
    }

    #[test]
    fn empty_tail_years_are_dropped() {
        // Everyone is in their second season: years 3..=7 have nobody left.
        let players = [2, 2];
        let counts = cohort_counts(&players, CohortPolicy::DropEmpty);
        assert_eq!(as_pairs(&counts), [(1, 2), (2, 2)]);

        let kept = cohort_counts(&players, CohortPolicy::KeepEmpty);
        assert_eq!(kept.len(), 7);
        assert_eq!(kept[6].player_count, 0);
    }

    #[test]
    fn out_of_domain_years_are_ignored() {
        let players = [1, 9];
        let counts = cohort_counts(&players, CohortPolicy::DropEmpty);
        assert_eq!(as_pairs(&counts), [(1, 1)]);
    }

    #[test]
    fn no_players_no_cohorts() {
        assert!(cohort_counts(&[], CohortPolicy::DropEmpty).is_empty());
    }
}
