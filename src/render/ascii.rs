//! Plain-text rendering for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for quick visual
//! sanity checks and deterministic output (helpful for golden tests).
//!
//! - scatter: one digit per point, the league id (`1`/`2`/`3`), with player
//!   labels in a left gutter
//! - histogram: one row per non-empty bin, one `#` per value
//! - bar: one row per year, stacked league segments

use std::collections::BTreeMap;

use crate::chart::spec::{Axis, BarSpec, ChartSpec, HistogramSpec, ScatterSpec};
use crate::render::{RenderFailure, Renderer, drawable};

#[derive(Debug, Clone, Copy)]
pub struct AsciiRenderer {
    pub width: usize,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self { width: 60 }
    }
}

impl Renderer for AsciiRenderer {
    type Figure = String;

    fn render(&mut self, spec: &ChartSpec) -> Result<String, RenderFailure> {
        let widened = drawable(spec)?;
        let spec: &ChartSpec = &widened;

        Ok(match spec {
            ChartSpec::Scatter(s) => render_scatter(s, self.width),
            ChartSpec::Histogram(h) => render_histogram(h, self.width),
            ChartSpec::Bar(b) => render_bar(b, self.width),
        })
    }
}

fn render_scatter(spec: &ScatterSpec, width: usize) -> String {
    let width = width.max(10);
    let (lo, hi) = spec.y_axis.bounds();
    // One text row per axis unit, so every league row of every band is visible.
    let height = ((hi - lo).round() as usize).max(1) + 1;

    let mut grid = vec![vec![' '; width]; height];
    for p in &spec.points {
        let x = map_x(p.x, &spec.x_axis, width);
        let y = map_row(p.y, &spec.y_axis, height);
        grid[y][x] = char::from_digit(p.league.id(), 10).unwrap_or('o');
    }

    let mut gutter = vec![String::new(); height];
    if let Some(ticks) = &spec.y_axis.ticks {
        for (&v, label) in ticks.values.iter().zip(&ticks.labels) {
            gutter[map_row(v, &spec.y_axis, height)] = label.clone();
        }
    }
    let gutter_width = gutter.iter().map(|g| g.chars().count()).max().unwrap_or(0);

    let [x0, x1] = spec.x_axis.range;
    let mut out = format!("Scatter: {}=[{x0}, {x1}] | y=[{}, {}]\n", spec.x_axis.title, spec.y_axis.range[0], spec.y_axis.range[1]);
    for (label, row) in gutter.iter().zip(&grid) {
        let line: String = row.iter().collect();
        out.push_str(&format!("{label:>gutter_width$} |{}\n", line.trim_end()));
    }
    out
}

fn render_histogram(spec: &HistogramSpec, width: usize) -> String {
    let mut out = format!("Histogram: {} per {}\n", spec.y_axis.title, spec.x_axis.title);
    let max = spec
        .series
        .iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0);
    let scale = scale_for(max, width);

    for idx in 0..spec.bins.bin_count() {
        if spec.series.iter().all(|s| s.counts.get(idx).copied().unwrap_or(0) == 0) {
            continue;
        }
        let (lo, hi) = spec.bins.edges(idx);
        for s in &spec.series {
            let count = s.counts.get(idx).copied().unwrap_or(0);
            if count == 0 {
                continue;
            }
            out.push_str(&format!(
                "[{lo:>6.0}, {hi:>6.0}) {:<3} {} {count}\n",
                s.name,
                "#".repeat(scaled(count, scale))
            ));
        }
    }
    out
}

fn render_bar(spec: &BarSpec, width: usize) -> String {
    let mut per_year: BTreeMap<i32, Vec<(usize, u32)>> = BTreeMap::new();
    for bar in &spec.bars {
        let order = spec
            .category_order
            .iter()
            .position(|&l| l == bar.league)
            .unwrap_or(spec.category_order.len());
        per_year.entry(bar.year).or_default().push((order, bar.count));
    }

    let max_total = per_year
        .values()
        .map(|v| v.iter().map(|(_, c)| c).sum::<u32>())
        .max()
        .unwrap_or(0);
    let scale = scale_for(max_total, width);

    let mut out = format!("Bar: {} per {} by {}\n", spec.y_axis.title, spec.x_axis.title, spec.legend_title);
    for (year, mut segments) in per_year {
        segments.sort_by_key(|(order, _)| *order);
        let bar: String = segments
            .iter()
            .map(|&(order, count)| {
                let ch = char::from_digit(order as u32 + 1, 10).unwrap_or('?');
                std::iter::repeat_n(ch, scaled(count, scale)).collect::<String>()
            })
            .collect();
        let total: u32 = segments.iter().map(|(_, c)| c).sum();
        out.push_str(&format!("{year} |{bar} {total}\n"));
    }
    out
}

fn map_x(x: f64, axis: &Axis, width: usize) -> usize {
    let [a, b] = axis.range;
    let u = ((x - a) / (b - a)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

/// Row 0 is the top of the plot. `range[0]` sits at the bottom and
/// `range[1]` at the top, so an inverted range puts small values first.
fn map_row(y: f64, axis: &Axis, height: usize) -> usize {
    let [a, b] = axis.range;
    let u = ((y - a) / (b - a)).clamp(0.0, 1.0);
    (height as f64 - 1.0 - u * (height as f64 - 1.0)).round() as usize
}

fn scale_for(max: u32, width: usize) -> f64 {
    if max as usize > width && max > 0 {
        width as f64 / max as f64
    } else {
        1.0
    }
}

fn scaled(count: u32, scale: f64) -> usize {
    if count == 0 {
        return 0;
    }
    ((count as f64 * scale).round() as usize).max(1)
}
