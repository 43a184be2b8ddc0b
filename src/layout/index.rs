//! Stable player ordinals.
//!
//! A player's ordinal is its row position in the player dataset and nothing
//! else: reordering the input reorders the ordinals, and the same input order
//! always yields the same ordinals.

use std::collections::HashMap;

use crate::domain::{PlayTime, PlayerLabel};
use crate::error::ChartError;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPlayer {
    pub player_name: String,
    pub player_label: String,
    pub player_index: usize,
}

/// `player_name -> ordinal` over `[0, N)`, in input order.
#[derive(Debug, Clone, Default)]
pub struct PlayerIndex {
    entries: Vec<IndexedPlayer>,
    by_name: HashMap<String, usize>,
}

impl PlayerIndex {
    /// Index `(name, label)` pairs by position. Names must be unique.
    pub fn from_labels<I, N, L>(players: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<String>,
        L: Into<String>,
    {
        let mut index = Self::default();
        for (name, label) in players {
            let player_name: String = name.into();
            let player_index = index.entries.len();
            if index.by_name.insert(player_name.clone(), player_index).is_some() {
                return Err(ChartError::DuplicatePlayer(player_name));
            }
            index.entries.push(IndexedPlayer {
                player_name,
                player_label: label.into(),
                player_index,
            });
        }
        Ok(index)
    }

    pub fn from_players(players: &[PlayerLabel]) -> Result<Self, ChartError> {
        Self::from_labels(
            players
                .iter()
                .map(|p| (p.player_name.as_str(), p.player_label.as_str())),
        )
    }

    /// A one-entry index for a synthetic player (e.g. the average row).
    pub fn single(name: &str) -> Self {
        let player_index = 0;
        Self {
            entries: vec![IndexedPlayer {
                player_name: name.to_string(),
                player_label: name.to_string(),
                player_index,
            }],
            by_name: HashMap::from([(name.to_string(), player_index)]),
        }
    }

    pub fn get(&self, player_name: &str) -> Option<usize> {
        self.by_name.get(player_name).copied()
    }

    pub fn entries(&self) -> &[IndexedPlayer] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inner join: pair each stat row with its player's ordinal, dropping rows
    /// for players not in the index. Stat row order is kept.
    pub fn join<'a>(&self, stats: &'a [PlayTime]) -> Vec<(usize, &'a PlayTime)> {
        stats
            .iter()
            .filter_map(|s| self.get(&s.player_name).map(|idx| (idx, s)))
            .collect()
    }
}

/// Keep only the named players, preserving the dataset's row order.
///
/// An empty filter keeps everyone.
pub fn select_players(players: &[PlayerLabel], names: &[String]) -> Vec<PlayerLabel> {
    if names.is_empty() {
        return players.to_vec();
    }
    players
        .iter()
        .filter(|p| names.iter().any(|n| n == &p.player_name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::League;

    fn player(name: &str) -> PlayerLabel {
        PlayerLabel {
            player_name: name.to_string(),
            player_label: name.to_uppercase(),
        }
    }

    fn stat(name: &str) -> PlayTime {
        PlayTime {
            player_name: name.to_string(),
            rookie_year: 1,
            league: League::J1,
            minutes: 90.0,
        }
    }

    #[test]
    fn ordinals_follow_row_order() {
        let players = vec![player("c"), player("a"), player("b")];
        let index = PlayerIndex::from_players(&players).unwrap();

        let ordinals: Vec<usize> = index.entries().iter().map(|e| e.player_index).collect();
        assert_eq!(ordinals, [0, 1, 2]);
        assert_eq!(index.get("c"), Some(0));
        assert_eq!(index.get("b"), Some(2));
        assert_eq!(index.entries()[1].player_label, "A");
    }

    #[test]
    fn every_ordering_yields_contiguous_ordinals() {
        let names = ["a", "b", "c", "d"];
        // All rotations plus the reverse.
        let mut orderings: Vec<Vec<&str>> = (0..names.len())
            .map(|k| names.iter().cycle().skip(k).take(names.len()).copied().collect())
            .collect();
        orderings.push(names.iter().rev().copied().collect());

        for order in orderings {
            let players: Vec<PlayerLabel> = order.iter().map(|n| player(n)).collect();
            let index = PlayerIndex::from_players(&players).unwrap();

            let mut seen: Vec<usize> = order.iter().map(|n| index.get(n).unwrap()).collect();
            // Row i precedes row j => index[i] < index[j].
            assert!(seen.windows(2).all(|w| w[0] < w[1]));
            seen.sort_unstable();
            assert_eq!(seen, (0..names.len()).collect::<Vec<_>>());

            // Same order, same result.
            let again = PlayerIndex::from_players(&players).unwrap();
            assert_eq!(index.entries(), again.entries());
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let players = vec![player("a"), player("a")];
        assert_eq!(
            PlayerIndex::from_players(&players).unwrap_err(),
            ChartError::DuplicatePlayer("a".to_string())
        );
    }

    #[test]
    fn join_drops_unknown_players() {
        let index = PlayerIndex::from_players(&[player("a"), player("b")]).unwrap();
        let stats = vec![stat("b"), stat("zzz"), stat("a")];
        let joined: Vec<(usize, &str)> = index
            .join(&stats)
            .into_iter()
            .map(|(i, s)| (i, s.player_name.as_str()))
            .collect();
        assert_eq!(joined, [(1, "b"), (0, "a")]);
    }

    #[test]
    fn select_keeps_dataset_order() {
        let players = vec![player("a"), player("b"), player("c")];
        let picked = select_players(&players, &["c".to_string(), "a".to_string()]);
        let names: Vec<&str> = picked.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(select_players(&players, &[]).len(), 3);
    }
}
