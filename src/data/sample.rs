//! Synthetic rookie datasets for demos and smoke tests.
//!
//! The generator is fully determined by `(seed, players)`: the same pair always
//! yields the same CSV files, so demo output is reproducible.

use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{League, MAX_MINUTES, PlayerRecord, ROOKIE_YEAR_SLOTS, StatRecord};
use crate::error::AppError;
use crate::io::schema::{PLAYER_COLUMNS, STAT_COLUMNS};

/// First and last join year drawn (the bar chart window).
const JOIN_YEARS: (i32, i32) = (2015, 2021);

/// Season the `cur_rookie_year` of every player is measured at.
const CURRENT_SEASON: i32 = 2022;

/// Mean minutes per season by league for a first-year player.
const MEAN_MINUTES: [f64; 3] = [700.0, 1300.0, 1700.0];

/// Extra mean minutes per additional rookie year.
const MINUTES_PER_YEAR: f64 = 250.0;

/// Season-to-season spread of minutes.
const MINUTES_SD: f64 = 600.0;

/// Chance a player moves to a neighbouring league between seasons.
const MOVE_PROB: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct SampleData {
    pub players: Vec<PlayerRecord>,
    pub stats: Vec<StatRecord>,
}

pub fn generate_sample(seed: u64, players: usize) -> Result<SampleData, AppError> {
    if players == 0 {
        return Err(AppError::new(2, "Sample player count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, MINUTES_SD)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut out = SampleData {
        players: Vec::with_capacity(players),
        stats: Vec::new(),
    };

    for i in 0..players {
        let joined_year = rng.gen_range(JOIN_YEARS.0..=JOIN_YEARS.1);
        let joined_league = League::ALL[rng.gen_range(0..League::ALL.len())];

        // Players can leave before reaching the current season.
        let max_rookie_year = (CURRENT_SEASON - joined_year).clamp(1, ROOKIE_YEAR_SLOTS as i32) as u32;
        let cur_rookie_year = rng.gen_range(1..=max_rookie_year);

        let player_name = format!("player_{:03}", i + 1);
        let player_label = format!("Player {:03} ({joined_league})", i + 1);

        let mut league = joined_league;
        for rookie_year in 1..=cur_rookie_year {
            if rookie_year > 1 && rng.gen_bool(MOVE_PROB) {
                league = neighbour(league, &mut rng);
            }

            let mean = MEAN_MINUTES[(league.id() - 1) as usize] + MINUTES_PER_YEAR * (rookie_year - 1) as f64;
            let minutes = (mean + noise.sample(&mut rng)).clamp(0.0, MAX_MINUTES).round();
            // Roughly one appearance per 75 minutes, and at least one if they played.
            let apps = if minutes > 0.0 { (minutes / 75.0).ceil() } else { 0.0 };
            let goals = (apps * rng.gen_range(0.0..0.2)).floor();

            out.stats.push(StatRecord {
                player_name: player_name.clone(),
                rookie_year,
                league,
                minutes,
                apps,
                goals,
            });
        }

        out.players.push(PlayerRecord {
            player_name,
            player_label,
            joined_year,
            joined_league,
            cur_rookie_year,
        });
    }

    Ok(out)
}

fn neighbour(league: League, rng: &mut StdRng) -> League {
    match league {
        League::J1 => League::J2,
        League::J3 => League::J2,
        League::J2 => {
            if rng.gen_bool(0.5) {
                League::J1
            } else {
                League::J3
            }
        }
    }
}

/// Write the players CSV in the input column order.
pub fn write_players_csv(path: &Path, players: &[PlayerRecord]) -> Result<(), AppError> {
    let mut w = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    let io_err = |e: csv::Error| AppError::new(2, format!("Failed to write '{}': {e}", path.display()));

    w.write_record(PLAYER_COLUMNS).map_err(io_err)?;
    for p in players {
        w.write_record([
            p.player_name.clone(),
            p.player_label.clone(),
            p.joined_year.to_string(),
            p.joined_league.to_string(),
            p.cur_rookie_year.to_string(),
        ])
        .map_err(io_err)?;
    }
    w.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}

/// Write the stats CSV in the input column order (with `league_id` next to `league`).
pub fn write_stats_csv(path: &Path, stats: &[StatRecord]) -> Result<(), AppError> {
    let mut w = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    let io_err = |e: csv::Error| AppError::new(2, format!("Failed to write '{}': {e}", path.display()));

    w.write_record(STAT_COLUMNS).map_err(io_err)?;
    for s in stats {
        w.write_record([
            s.player_name.clone(),
            s.rookie_year.to_string(),
            s.league_id().to_string(),
            s.league.to_string(),
            s.minutes.to_string(),
            s.apps.to_string(),
            s.goals.to_string(),
        ])
        .map_err(io_err)?;
    }
    w.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{Table, play_times, player_joins, player_labels, player_rookie_years, season_stats};

    #[test]
    fn same_seed_same_sample() {
        let a = generate_sample(7, 25).unwrap();
        let b = generate_sample(7, 25).unwrap();
        assert_eq!(a.players, b.players);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn sample_respects_domains() {
        let sample = generate_sample(42, 60).unwrap();
        assert_eq!(sample.players.len(), 60);

        for p in &sample.players {
            assert!((JOIN_YEARS.0..=JOIN_YEARS.1).contains(&p.joined_year));
            assert!((1..=ROOKIE_YEAR_SLOTS).contains(&p.cur_rookie_year));
            let rows = sample.stats.iter().filter(|s| s.player_name == p.player_name).count();
            assert_eq!(rows, p.cur_rookie_year as usize);
        }
        for s in &sample.stats {
            assert!((0.0..=MAX_MINUTES).contains(&s.minutes));
            assert!(s.goals <= s.apps);
        }
    }

    #[test]
    fn zero_players_is_rejected() {
        assert_eq!(generate_sample(1, 0).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn written_csvs_load_back() {
        let sample = generate_sample(3, 10).unwrap();
        let dir = std::env::temp_dir().join(format!("rookie-sample-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let players_csv = dir.join("players.csv");
        let stats_csv = dir.join("stats.csv");

        write_players_csv(&players_csv, &sample.players).unwrap();
        write_stats_csv(&stats_csv, &sample.stats).unwrap();

        let players = Table::from_path("players", &players_csv).unwrap();
        let stats = Table::from_path("stats", &stats_csv).unwrap();

        let labels = player_labels(&players).unwrap();
        let names: Vec<&str> = labels.iter().map(|l| l.player_name.as_str()).collect();
        let expected: Vec<&str> = sample.players.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, expected);

        let years = player_rookie_years(&players).unwrap();
        assert!(years.iter().zip(&sample.players).all(|(y, p)| *y == p.cur_rookie_year));
        assert_eq!(player_joins(&players).unwrap().len(), sample.players.len());

        let times = play_times(&stats).unwrap();
        assert_eq!(times.len(), sample.stats.len());
        assert!(times.iter().zip(&sample.stats).all(|(t, s)| t.minutes == s.minutes && t.league == s.league));

        let seasons = season_stats(&stats).unwrap();
        assert!(seasons.iter().zip(&sample.stats).all(|(t, s)| t.apps == s.apps && t.goals == s.goals));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
