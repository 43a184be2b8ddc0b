use crate::aggregate::CohortAverage;
use crate::chart::spec::{BarCount, HistogramSpec, ScatterSpec};
use crate::domain::{ChartConfig, CohortCount};

/// Inputs and outputs of a run, printed once before the charts.
pub fn format_run_header(config: &ChartConfig) -> String {
    let mut out = String::new();
    out.push_str("=== rookie - J-League rookie play-time charts ===\n");
    out.push_str(&format!("Players: {}\n", config.players_csv.display()));
    out.push_str(&format!("Stats: {}\n", config.stats_csv.display()));
    out.push_str(&format!("Output: {} ({:?})\n", config.out_dir.display(), config.format));
    if !config.player_filter.is_empty() {
        out.push_str(&format!("Players shown: {}\n", config.player_filter.join(", ")));
    }
    out
}

pub fn format_scatter_summary(spec: &ScatterSpec) -> String {
    let players = spec.y_axis.ticks.as_ref().map_or(0, |t| t.labels.len());
    format!(
        "Play time scatter: {} player(s), {} point(s), height={}px\n",
        players,
        spec.points.len(),
        spec.height
    )
}

/// Cohort sizes followed by the per-year, per-league averages.
pub fn format_average_summary(cohorts: &[CohortCount], averages: &[CohortAverage]) -> String {
    let mut out = String::new();

    out.push_str("Active players per rookie year:\n");
    out.push_str(&table_line(&format!("{:<12} {:>8}", "rookie_year", "players")));
    out.push_str(&table_line(&format!("{:-<12} {:-<8}", "", "")));
    for c in cohorts {
        out.push_str(&table_line(&format!("{:<12} {:>8}", c.rookie_year, c.player_count)));
    }
    out.push('\n');

    out.push_str("Average per active player:\n");
    out.push_str(&table_line(&format!(
        "{:<12} {:<6} {:>8} {:>8} {:>8} {:>8}",
        "rookie_year", "league", "minutes", "apps", "goals", "players"
    )));
    out.push_str(&table_line(&format!(
        "{:-<12} {:-<6} {:-<8} {:-<8} {:-<8} {:-<8}",
        "", "", "", "", "", ""
    )));
    for a in averages {
        out.push_str(&table_line(&format!(
            "{:<12} {:<6} {:>8.1} {:>8.1} {:>8.1} {:>8}",
            a.rookie_year,
            a.league.name(),
            a.average.minutes,
            a.average.apps,
            a.average.goals,
            a.player_count
        )));
    }

    out
}

pub fn format_histogram_summary(spec: &HistogramSpec) -> String {
    let mut out = format!(
        "Play time histogram: {} bins of {} {}\n",
        spec.bins.bin_count(),
        spec.bins.size,
        spec.x_axis.title
    );
    for s in &spec.series {
        let binned: u32 = s.counts.iter().sum();
        let mut line = format!("  {:<3} {:>5} value(s)", s.name, binned);
        if s.out_of_range > 0 {
            line.push_str(&format!(", {} out of range", s.out_of_range));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Players per join year and league, one row per non-zero group.
pub fn format_bar_counts(bars: &[BarCount]) -> String {
    let mut out = String::from("Players per join year:\n");
    out.push_str(&table_line(&format!("{:<6} {:<6} {:>7}", "year", "league", "players")));
    out.push_str(&table_line(&format!("{:-<6} {:-<6} {:-<7}", "", "", "")));
    for b in bars {
        out.push_str(&table_line(&format!("{:<6} {:<6} {:>7}", b.year, b.league.name(), b.count)));
    }
    let total: u32 = bars.iter().map(|b| b.count).sum();
    out.push_str(&format!("total: {total}\n"));
    out
}

fn table_line(row: &str) -> String {
    let mut line = row.trim_end().to_string();
    line.push('\n');
    line
}
