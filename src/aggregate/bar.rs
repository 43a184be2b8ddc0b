//! Player counts per join year and league.

use std::collections::BTreeMap;

use crate::chart::spec::BarCount;
use crate::domain::PlayerJoin;

/// Count players per `(joined_year, joined_league)`, ordered by year then league.
pub fn count_by_join(players: &[PlayerJoin]) -> Vec<BarCount> {
    let mut counts = BTreeMap::new();
    for p in players {
        *counts.entry((p.joined_year, p.joined_league)).or_insert(0u32) += 1;
    }
    counts
        .into_iter()
        .map(|((year, league), count)| BarCount { year, league, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::League;

    fn player(year: i32, league: League) -> PlayerJoin {
        PlayerJoin {
            joined_year: year,
            joined_league: league,
        }
    }

    #[test]
    fn counts_per_year_and_league() {
        let players = vec![
            player(2020, League::J1),
            player(2020, League::J2),
            player(2020, League::J1),
        ];
        let counts = count_by_join(&players);
        assert_eq!(
            counts,
            [
                BarCount { year: 2020, league: League::J1, count: 2 },
                BarCount { year: 2020, league: League::J2, count: 1 },
            ]
        );
    }

    #[test]
    fn ordered_by_year_then_league() {
        let players = vec![
            player(2021, League::J3),
            player(2015, League::J2),
            player(2021, League::J1),
        ];
        let keys: Vec<(i32, League)> = count_by_join(&players).iter().map(|c| (c.year, c.league)).collect();
        assert_eq!(keys, [(2015, League::J2), (2021, League::J1), (2021, League::J3)]);
    }
}
