//! SVG renderer backed by Plotters.
//!
//! Draws exactly what the `ChartSpec` says: axis ranges, tick labels, marker
//! sizes and colors all come from the `ChartSpec`. Plotters drawing errors are
//! treated as transient; unusable axis ranges are input failures.

use std::collections::BTreeMap;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::chart::spec::{BarSpec, ChartSpec, HistogramSpec, ScatterSpec};
use crate::domain::Rgb;
use crate::render::{RenderFailure, Renderer, drawable};

/// Figure height used when the chart has no height hint.
const DEFAULT_HEIGHT: u32 = 480;

#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub width: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self { width: 900 }
    }
}

impl Renderer for SvgRenderer {
    type Figure = String;

    fn render(&mut self, spec: &ChartSpec) -> Result<String, RenderFailure> {
        let size = (self.width, spec.height_hint().unwrap_or(DEFAULT_HEIGHT));

        let widened = drawable(spec)?;
        let spec: &ChartSpec = &widened;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            let drawn = match spec {
                ChartSpec::Scatter(s) => draw_scatter(&root, s),
                ChartSpec::Histogram(h) => draw_histogram(&root, h),
                ChartSpec::Bar(b) => draw_bar(&root, b),
            };
            drawn.map_err(|e| RenderFailure::transient(e.to_string()))?;
            root.present()
                .map_err(|e| RenderFailure::transient(e.to_string()))?;
        }
        Ok(svg)
    }
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn draw_scatter<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ScatterSpec) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let [x0, x1] = spec.x_axis.range;
    let (y_lo, y_hi) = spec.y_axis.bounds();
    // Plotters wants ascending ranges; flip values ourselves for inverted axes.
    let inverted = spec.y_axis.is_inverted();
    let flip = move |y: f64| if inverted { y_lo + y_hi - y } else { y };

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 20)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d(x0..x1, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_labels((x1 - x0).round().max(1.0) as usize)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .x_desc(spec.x_axis.title.as_str())
        .draw()?;

    if let Some(ticks) = &spec.y_axis.ticks {
        let style = ("sans-serif", 12).into_font().color(&BLACK);
        chart.draw_series(
            ticks
                .values
                .iter()
                .zip(ticks.labels.iter())
                .map(|(&v, label)| Text::new(label.clone(), (x0, flip(v)), style.clone())),
        )?;
    }

    for league in &spec.category_order {
        let Some(color) = spec.color_of(*league) else {
            continue;
        };
        let style = rgb(color).mix(0.7).filled();
        chart
            .draw_series(
                spec.points
                    .iter()
                    .filter(|p| p.league == *league)
                    .map(|p| {
                        let radius = (spec.marker.diameter(p.size) / 2.0).round().max(1.0) as i32;
                        Circle::new((p.x, flip(p.y)), radius, style)
                    }),
            )?
            .label(league.name())
            .legend(move |(x, y)| Circle::new((x, y), 4, style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_histogram<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &HistogramSpec) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let [x0, x1] = spec.x_axis.range;
    let (y_lo, y_hi) = spec.y_axis.bounds();

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 40)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d(x0..x1, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_axis.title.as_str())
        .y_desc(spec.y_axis.title.as_str())
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    // Each bin is split into one slot per series; `bargap` trims the group,
    // `bargroupgap` trims each bar within its slot.
    let n_series = spec.series.len().max(1) as f64;
    let group_width = spec.bins.size * (1.0 - spec.bargap);
    let slot = group_width / n_series;
    let bar_width = slot * (1.0 - spec.bargroupgap);

    for (s_idx, series) in spec.series.iter().enumerate() {
        let style = rgb(series.color).filled();
        chart
            .draw_series(series.counts.iter().enumerate().filter(|(_, c)| **c > 0).map(|(b_idx, &count)| {
                let (lo, _) = spec.bins.edges(b_idx);
                let left = lo + spec.bins.size * spec.bargap / 2.0 + slot * s_idx as f64 + (slot - bar_width) / 2.0;
                Rectangle::new([(left, 0.0), (left + bar_width, count as f64)], style)
            }))?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_bar<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &BarSpec) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let [x0, x1] = spec.x_axis.range;
    let (y_lo, y_hi) = spec.y_axis.bounds();

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 40)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d(x0..x1, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels((x1 - x0).round().max(1.0) as usize)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .x_desc(spec.x_axis.title.as_str())
        .y_desc(spec.y_axis.title.as_str())
        .draw()?;

    // Stack leagues bottom-up in category order.
    let half = 0.4;
    let mut base: BTreeMap<i32, u32> = BTreeMap::new();
    for (idx, league) in spec.category_order.iter().enumerate() {
        let Some(&color) = spec.colors.get(idx) else {
            continue;
        };
        let style = rgb(color).filled();
        let mut rects = Vec::new();
        for bar in spec.bars.iter().filter(|b| b.league == *league) {
            let bottom = base.entry(bar.year).or_default();
            let x = bar.year as f64;
            rects.push(Rectangle::new(
                [(x - half, *bottom as f64), (x + half, (*bottom + bar.count) as f64)],
                style,
            ));
            *bottom += bar.count;
        }
        chart
            .draw_series(rects)?
            .label(league.name())
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::Axis;
    use crate::domain::{DEFAULT_PALETTE, League};
    use crate::layout::{CoordinateMapper, PlayerIndex};
    use crate::render::FailureKind;

    fn bar_spec(range: [f64; 2]) -> ChartSpec {
        ChartSpec::Bar(BarSpec {
            bars: vec![crate::chart::spec::BarCount {
                year: 2020,
                league: League::J1,
                count: 2,
            }],
            category_order: League::ALL.to_vec(),
            colors: DEFAULT_PALETTE[..3].to_vec(),
            x_axis: Axis::new("year", range),
            y_axis: Axis::new("#player", [0.0, 2.0]),
            legend_title: "league".to_string(),
        })
    }

    #[test]
    fn renders_svg_document() {
        let svg = SvgRenderer::default().render(&bar_spec([2014.5, 2021.5])).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn non_finite_range_is_an_input_failure() {
        let err = SvgRenderer::default().render(&bar_spec([f64::NAN, 2021.5])).unwrap_err();
        assert_eq!(err.kind, FailureKind::Input);
        assert!(err.message.contains("bar x axis"));
    }

    #[test]
    fn scatter_without_players_still_renders() {
        let spec = ChartSpec::Scatter(CoordinateMapper::default().map(&PlayerIndex::default(), &[]));
        let svg = SvgRenderer::default().render(&spec).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(spec.axes().1.range, [0.0, 0.0]);
    }
}
