//! Chart pipelines: validated tables in, `ChartSpec` out.
//!
//! Every pipeline validates the columns it reads before reading a row, logs
//! its input size, and returns a finished `ChartSpec`. Nothing here renders.

use crate::aggregate::{cohort_averages, cohort_counts, count_by_join, minutes_bins, minutes_by_league};
use crate::chart::spec::{Axis, BarSpec, ChartSpec, HistogramSpec, PointDetail, ScatterSpec};
use crate::domain::{ChartKind, CohortCount, CohortPolicy, DEFAULT_PALETTE, League, MAX_MINUTES, PlayTime};
use crate::error::ChartError;
use crate::io::{
    Datasets, Table, league_minutes, play_times, player_joins, player_labels, player_rookie_years, season_stats,
};
use crate::layout::{CoordinateMapper, PlayerIndex, select_players};
use crate::logging::PipelineLog;

pub mod spec;

pub use crate::aggregate::CohortAverage;

/// Pseudo player the average scatter is drawn under.
pub const AVERAGE_PLAYER: &str = "Avg.";

/// Join-year window of the player count chart.
pub const BAR_YEAR_RANGE: [f64; 2] = [2014.5, 2021.5];

/// Headroom above the tallest bar.
const COUNT_HEADROOM: f64 = 1.1;

/// One finished chart plus its terminal summary.
#[derive(Debug, Clone)]
pub struct BuiltChart {
    pub kind: ChartKind,
    pub spec: ChartSpec,
    pub summary: String,
}

/// Build `kind` from both datasets.
pub fn build(
    kind: ChartKind,
    data: &Datasets,
    player_filter: &[String],
    log: &dyn PipelineLog,
) -> Result<BuiltChart, ChartError> {
    let (spec, summary) = match kind {
        ChartKind::Scatter => {
            let s = play_time_scatter(&data.players, &data.stats, player_filter, log)?;
            let summary = crate::report::format_scatter_summary(&s);
            (ChartSpec::Scatter(s), summary)
        }
        ChartKind::Avg => {
            let avg = average_play_time(&data.players, &data.stats, log)?;
            let summary = crate::report::format_average_summary(&avg.cohorts, &avg.averages);
            (ChartSpec::Scatter(avg.spec), summary)
        }
        ChartKind::Histogram => {
            let h = play_time_histogram(&data.stats, log)?;
            let summary = crate::report::format_histogram_summary(&h);
            (ChartSpec::Histogram(h), summary)
        }
        ChartKind::Bar => {
            let b = player_count_bar(&data.players, log)?;
            let summary = crate::report::format_bar_counts(&b.bars);
            (ChartSpec::Bar(b), summary)
        }
    };
    Ok(BuiltChart { kind, spec, summary })
}

/// Per-player play time: one marker per `(player, rookie_year, league)` row.
///
/// `player_filter` restricts the players shown (dataset order is kept); an
/// empty filter shows everyone.
pub fn play_time_scatter(
    players: &Table,
    stats: &Table,
    player_filter: &[String],
    log: &dyn PipelineLog,
) -> Result<ScatterSpec, ChartError> {
    let players = player_labels(players)?;
    let stats = play_times(stats)?;
    log.info(&format!(
        "play time scatter: {} players, {} stat rows",
        players.len(),
        stats.len()
    ));

    let selected = select_players(&players, player_filter);
    let index = PlayerIndex::from_players(&selected)?;
    Ok(CoordinateMapper::default().map(&index, &stats))
}

/// Average scatter plus the aggregates it was built from.
#[derive(Debug, Clone)]
pub struct AverageChart {
    pub spec: ScatterSpec,
    pub cohorts: Vec<CohortCount>,
    pub averages: Vec<CohortAverage>,
}

/// Average play time per surviving player, drawn as a single "Avg." row.
///
/// Every stat row counts, including rows of players missing from the player
/// dataset. Cohort sizes come from the player dataset alone.
pub fn average_play_time(players: &Table, stats: &Table, log: &dyn PipelineLog) -> Result<AverageChart, ChartError> {
    let rookie_years = player_rookie_years(players)?;
    let stats = season_stats(stats)?;
    log.info(&format!(
        "average play time: {} players, {} stat rows",
        rookie_years.len(),
        stats.len()
    ));

    let cohorts = cohort_counts(&rookie_years, CohortPolicy::DropEmpty);
    let averages = cohort_averages(&stats, &cohorts)?;

    let mapper = CoordinateMapper::default();
    let avg_index = PlayerIndex::single(AVERAGE_PLAYER);
    let points = averages
        .iter()
        .filter_map(|a| {
            let row = PlayTime {
                player_name: AVERAGE_PLAYER.to_string(),
                rookie_year: a.rookie_year,
                league: a.league,
                minutes: a.average.minutes,
            };
            let detail = PointDetail {
                minutes: round1(a.average.minutes),
                apps: round1(a.average.apps),
                goals: round1(a.average.goals),
                players: a.player_count,
            };
            mapper.place(&avg_index, &row, Some(detail))
        })
        .collect();

    Ok(AverageChart {
        spec: mapper.layout(&avg_index, points),
        cohorts,
        averages,
    })
}

/// Minutes per season, bucketed per league.
pub fn play_time_histogram(stats: &Table, log: &dyn PipelineLog) -> Result<HistogramSpec, ChartError> {
    let minutes = league_minutes(stats)?;
    log.info(&format!("play time histogram: {} stat rows", minutes.len()));

    let bins = minutes_bins();
    let series = minutes_by_league(&minutes, &bins);
    let dropped: u32 = series.iter().map(|s| s.out_of_range).sum();
    if dropped > 0 {
        log.info(&format!("play time histogram: {dropped} value(s) outside [0, {MAX_MINUTES}]"));
    }

    let tallest = series
        .iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0);

    Ok(HistogramSpec {
        series,
        bins,
        x_axis: Axis::new("minutes", [0.0, MAX_MINUTES]),
        y_axis: Axis::new("#players", count_range(tallest)),
        bargap: 0.2,
        bargroupgap: 0.1,
    })
}

/// Players per join year, stacked by join league.
pub fn player_count_bar(players: &Table, log: &dyn PipelineLog) -> Result<BarSpec, ChartError> {
    let joins = player_joins(players)?;
    log.info(&format!("player count bar: {} players", joins.len()));

    let bars = count_by_join(&joins);
    let mut tallest = 0u32;
    let mut year_total = 0u32;
    let mut year = None;
    for b in &bars {
        if year != Some(b.year) {
            year = Some(b.year);
            year_total = 0;
        }
        year_total += b.count;
        tallest = tallest.max(year_total);
    }

    Ok(BarSpec {
        bars,
        category_order: League::ALL.to_vec(),
        colors: DEFAULT_PALETTE[..League::ALL.len()].to_vec(),
        x_axis: Axis::new("year", BAR_YEAR_RANGE),
        y_axis: Axis::new("#player", count_range(tallest)),
        legend_title: "league".to_string(),
    })
}

fn count_range(tallest: u32) -> [f64; 2] {
    [0.0, tallest.max(1) as f64 * COUNT_HEADROOM]
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;
    use crate::logging::MemoryLog;

    const PLAYERS: &str = "\
player_name,player_label,joined_year,joined_league,cur_rookie_year
tanaka,Tanaka (FW),2019,J1,2
suzuki,Suzuki (MF),2020,J2,1
sato,Sato (DF),2020,J1,1
";

    const STATS: &str = "\
player_name,rookie_year,league_id,league,minutes,apps,goals
tanaka,1,1,J1,900,10,2
tanaka,2,2,J2,3600,40,5
suzuki,1,2,J2,450,5,0
sato,1,1,J1,300,4,1
ghost,1,3,J3,3000,30,3
";

    fn table(name: &str, csv: &str) -> Table {
        Table::from_reader(name, csv.as_bytes()).unwrap()
    }

    #[test]
    fn scatter_places_players_in_bands() {
        let log = MemoryLog::new();
        let spec = play_time_scatter(&table("players", PLAYERS), &table("stats", STATS), &[], &log).unwrap();

        assert_eq!(spec.y_axis.range, [12.0, 0.0]);
        // ghost is not a known player.
        assert_eq!(spec.points.len(), 4);
        let tanaka_j2 = &spec.points[1];
        assert_eq!((tanaka_j2.x, tanaka_j2.y), (2.0, 2.0));
        let sato = &spec.points[3];
        assert_eq!(sato.y, 9.0);

        let info = log.at(Level::INFO);
        assert!(info[0].contains("3 players, 5 stat rows"));
    }

    #[test]
    fn scatter_filter_keeps_dataset_order() {
        let filter = vec!["sato".to_string(), "tanaka".to_string()];
        let spec = play_time_scatter(&table("players", PLAYERS), &table("stats", STATS), &filter, &MemoryLog::new())
            .unwrap();

        let labels = &spec.y_axis.ticks.as_ref().unwrap().labels;
        assert_eq!(labels, &["Tanaka (FW)", "Sato (DF)"]);
        assert_eq!(spec.y_axis.range, [8.0, 0.0]);
    }

    #[test]
    fn missing_column_fails_before_any_row() {
        let broken = table("stats", "player_name,rookie_year\ntanaka,oops\n");
        let err = average_play_time(&table("players", PLAYERS), &broken, &MemoryLog::new()).unwrap_err();
        match err {
            ChartError::Schema { dataset, missing } => {
                assert_eq!(dataset, "stats");
                assert_eq!(missing, ["league_id", "league", "minutes", "apps", "goals"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn average_divides_by_surviving_players() {
        let avg = average_play_time(&table("players", PLAYERS), &table("stats", STATS), &MemoryLog::new()).unwrap();

        // Three players reached year 1, one reached year 2.
        assert_eq!(
            avg.cohorts,
            [
                CohortCount { rookie_year: 1, player_count: 3 },
                CohortCount { rookie_year: 2, player_count: 1 },
            ]
        );

        let j1_year1 = avg
            .averages
            .iter()
            .find(|a| a.rookie_year == 1 && a.league == League::J1)
            .unwrap();
        assert!((j1_year1.average.minutes - 400.0).abs() < 1e-9);

        // One pseudo player row; J1 year 1 sits at y = 1.
        assert_eq!(avg.spec.y_axis.range, [4.0, 0.0]);
        let point = avg.spec.points.iter().find(|p| p.x == 1.0 && p.league == League::J1).unwrap();
        assert_eq!(point.player_name, AVERAGE_PLAYER);
        assert_eq!(point.y, 1.0);
        let detail = point.detail.unwrap();
        assert_eq!(detail.players, 3);
        assert_eq!(detail.apps, 4.7);

        // ghost is not in the player dataset, but its season still counts.
        let j3_year1 = avg
            .averages
            .iter()
            .find(|a| a.rookie_year == 1 && a.league == League::J3)
            .unwrap();
        assert!((j3_year1.average.minutes - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn average_keeps_stats_of_players_missing_from_the_player_dataset() {
        let players = table(
            "players",
            "player_name,player_label,joined_year,joined_league,cur_rookie_year\na,A,2020,J1,1\nb,B,2020,J1,1\n",
        );
        let stats = table(
            "stats",
            "player_name,rookie_year,league_id,league,minutes,apps,goals\na,1,1,J1,100,1,0\nretired,1,1,J1,300,3,0\n",
        );
        let avg = average_play_time(&players, &stats, &MemoryLog::new()).unwrap();

        assert_eq!(avg.averages.len(), 1);
        assert_eq!(avg.averages[0].player_count, 2);
        assert!((avg.averages[0].average.minutes - 200.0).abs() < 1e-9);
        assert!((avg.averages[0].average.apps - 2.0).abs() < 1e-9);
    }

    #[test]
    fn each_chart_needs_only_its_own_columns() {
        let log = MemoryLog::new();

        let joins = table("players", "player_name,joined_year,joined_league\na,2020,J1\n");
        let bar = player_count_bar(&joins, &log).unwrap();
        assert_eq!(bar.bars.len(), 1);

        let minutes = table("stats", "league_id,minutes\n2,450\n");
        let histogram = play_time_histogram(&minutes, &log).unwrap();
        assert_eq!(histogram.series[1].counts[4], 1);

        let labels = table("players", "player_name,player_label\na,A\n");
        let times = table("stats", "player_name,rookie_year,league_id,league,minutes\na,1,1,J1,90\n");
        let scatter = play_time_scatter(&labels, &times, &[], &log).unwrap();
        assert_eq!(scatter.points.len(), 1);

        let years = table("players", "cur_rookie_year\n1\n");
        let seasons = table("stats", "rookie_year,league_id,league,minutes,apps,goals\n1,1,J1,90,1,0\n");
        let avg = average_play_time(&years, &seasons, &log).unwrap();
        assert_eq!(avg.averages[0].average.minutes, 90.0);
    }

    #[test]
    fn histogram_counts_full_season_in_last_bin() {
        let spec = play_time_histogram(&table("stats", STATS), &MemoryLog::new()).unwrap();

        let names: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["J1", "J2", "J3"]);
        assert_eq!(spec.series[1].counts[35], 1);
        assert_eq!(spec.series[0].counts[9], 1);
        assert_eq!(spec.x_axis.range, [0.0, 3600.0]);
        assert!(spec.y_axis.range[1] > 1.0);
    }

    #[test]
    fn bar_range_covers_tallest_stack() {
        let spec = player_count_bar(&table("players", PLAYERS), &MemoryLog::new()).unwrap();

        assert_eq!(spec.bars.len(), 3);
        assert_eq!(spec.x_axis.range, BAR_YEAR_RANGE);
        assert!((spec.y_axis.range[1] - 2.2).abs() < 1e-9);
        assert_eq!(spec.legend_title, "league");
    }

    #[test]
    fn build_dispatches_every_kind() {
        let data = Datasets {
            players: table("players", PLAYERS),
            stats: table("stats", STATS),
        };
        for kind in ChartKind::ALL {
            let built = build(kind, &data, &[], &MemoryLog::new()).unwrap();
            assert_eq!(built.kind, kind);
            assert!(!built.summary.is_empty());
        }
    }
}
