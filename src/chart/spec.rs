//! Renderer-agnostic chart specifications.
//!
//! A `ChartSpec` holds every number a renderer needs: axis ranges, tick
//! positions and labels, marker sizing and series. Renderers only draw it;
//! they never compute layout.

use serde::{Deserialize, Serialize};

use crate::domain::{League, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Scatter(ScatterSpec),
    Histogram(HistogramSpec),
    Bar(BarSpec),
}

impl ChartSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChartSpec::Scatter(_) => "scatter",
            ChartSpec::Histogram(_) => "histogram",
            ChartSpec::Bar(_) => "bar",
        }
    }

    /// `(x_axis, y_axis)` of any chart.
    pub fn axes(&self) -> (&Axis, &Axis) {
        match self {
            ChartSpec::Scatter(s) => (&s.x_axis, &s.y_axis),
            ChartSpec::Histogram(h) => (&h.x_axis, &h.y_axis),
            ChartSpec::Bar(b) => (&b.x_axis, &b.y_axis),
        }
    }

    pub fn axes_mut(&mut self) -> (&mut Axis, &mut Axis) {
        match self {
            ChartSpec::Scatter(s) => (&mut s.x_axis, &mut s.y_axis),
            ChartSpec::Histogram(h) => (&mut h.x_axis, &mut h.y_axis),
            ChartSpec::Bar(b) => (&mut b.x_axis, &mut b.y_axis),
        }
    }

    /// Preferred figure height in pixels, if the chart defines one.
    pub fn height_hint(&self) -> Option<u32> {
        match self {
            ChartSpec::Scatter(s) => Some(s.height),
            _ => None,
        }
    }
}

/// Explicit tick positions with their labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticks {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    /// `[from, to]`; `from > to` means the axis is drawn inverted.
    pub range: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

impl Axis {
    pub fn new(title: impl Into<String>, range: [f64; 2]) -> Self {
        Self {
            title: title.into(),
            range,
            ticks: None,
        }
    }

    pub fn with_ticks(mut self, ticks: Ticks) -> Self {
        self.ticks = Some(ticks);
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.range[0] > self.range[1]
    }

    /// `(min, max)` regardless of direction.
    pub fn bounds(&self) -> (f64, f64) {
        let [a, b] = self.range;
        (a.min(b), a.max(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    Diameter,
    Area,
}

/// How a marker's size value maps to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSizing {
    pub mode: SizeMode,
    pub sizeref: f64,
}

impl MarkerSizing {
    /// Marker diameter in pixels for a size value.
    pub fn diameter(&self, value: f64) -> f64 {
        if !(value.is_finite() && value > 0.0 && self.sizeref > 0.0) {
            return 0.0;
        }
        match self.mode {
            SizeMode::Area => (value / self.sizeref).sqrt(),
            SizeMode::Diameter => value / self.sizeref,
        }
    }
}

/// Aggregate values shown alongside an averaged point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDetail {
    pub minutes: f64,
    pub apps: f64,
    pub goals: f64,
    pub players: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub player_name: String,
    pub x: f64,
    pub y: f64,
    /// Marker size value (minutes played).
    pub size: f64,
    pub league: League,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<PointDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub points: Vec<ScatterPoint>,
    pub category_order: Vec<League>,
    pub colors: Vec<Rgb>,
    pub marker: MarkerSizing,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub height: u32,
}

impl ScatterSpec {
    /// Color of a league's markers, following `category_order`.
    pub fn color_of(&self, league: League) -> Option<Rgb> {
        let idx = self.category_order.iter().position(|&l| l == league)?;
        self.colors.get(idx).copied()
    }
}

/// Fixed-width histogram bins `[start, end)` of width `size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

impl BinSpec {
    pub fn bin_count(&self) -> usize {
        if !(self.size > 0.0 && self.end > self.start) {
            return 0;
        }
        ((self.end - self.start) / self.size).ceil() as usize
    }

    /// `[lo, hi)` edges of bin `idx`.
    pub fn edges(&self, idx: usize) -> (f64, f64) {
        let lo = self.start + self.size * idx as f64;
        (lo, (lo + self.size).min(self.end))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub name: String,
    pub color: Rgb,
    /// Raw values, as handed to the renderer.
    pub values: Vec<f64>,
    /// Pre-computed counts per bin.
    pub counts: Vec<u32>,
    /// Values outside the bin range (or non-finite).
    pub out_of_range: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSpec {
    pub series: Vec<HistogramSeries>,
    pub bins: BinSpec,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub bargap: f64,
    pub bargroupgap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarCount {
    pub year: i32,
    pub league: League,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub bars: Vec<BarCount>,
    pub category_order: Vec<League>,
    pub colors: Vec<Rgb>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend_title: String,
}
