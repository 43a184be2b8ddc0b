//! Scatter layout: player bands, axis ranges and marker sizing.
//!
//! Each player owns a band of `BAND_HEIGHT` (4) vertical units. Within the
//! band, offset 0 is a spacer and offsets 1..=3 hold the J1/J2/J3 rows:
//!
//! `y = 4 * player_index + league_id`
//!
//! The y-axis runs from `4N` down to `0` so the first player is drawn at the
//! top, and the player's label sits at the band center `4 * player_index + 2`.
//! Tick alignment depends on this formula staying fixed.

use crate::chart::spec::{Axis, MarkerSizing, PointDetail, ScatterPoint, ScatterSpec, SizeMode, Ticks};
use crate::domain::{BAND_HEIGHT, DEFAULT_PALETTE, League, MAX_MINUTES, PlayTime, ROOKIE_YEAR_SLOTS};
use crate::layout::index::PlayerIndex;

/// Reference marker diameter (px) for a full `MAX_MINUTES` season.
const MAX_MARKER_DIAMETER: f64 = 30.0;

/// Minimum figure height (px) of a scatter chart.
const MIN_HEIGHT: u32 = 230;

/// Height (px) per player row, including one extra row for axes.
const ROW_HEIGHT: u32 = 80;

/// Axis-sizing policy for play-time scatters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub marker: MarkerSizing,
    pub x_range: [f64; 2],
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            marker: MarkerSizing {
                mode: SizeMode::Area,
                // Area mode: a 3600-minute season maps to a 30px-wide marker.
                sizeref: 2.0 * MAX_MINUTES / (MAX_MARKER_DIAMETER * MAX_MARKER_DIAMETER),
            },
            x_range: [0.5, ROOKIE_YEAR_SLOTS as f64 + 0.5],
        }
    }
}

impl CoordinateMapper {
    pub fn y(&self, player_index: usize, league: League) -> f64 {
        (BAND_HEIGHT as usize * player_index) as f64 + league.id() as f64
    }

    /// Band center, where the player's tick label goes.
    pub fn tick_value(&self, player_index: usize) -> f64 {
        (BAND_HEIGHT as usize * player_index) as f64 + BAND_HEIGHT as f64 / 2.0
    }

    /// Inverted range `[4N, 0]`.
    pub fn y_range(&self, player_count: usize) -> [f64; 2] {
        [(BAND_HEIGHT as usize * player_count) as f64, 0.0]
    }

    pub fn height(&self, player_count: usize) -> u32 {
        let rows = u32::try_from(player_count).unwrap_or(u32::MAX).saturating_add(1);
        MIN_HEIGHT.max(rows.saturating_mul(ROW_HEIGHT))
    }

    /// Place one stat row, or `None` when its player is not indexed.
    pub fn place(&self, index: &PlayerIndex, stat: &PlayTime, detail: Option<PointDetail>) -> Option<ScatterPoint> {
        let player_index = index.get(&stat.player_name)?;
        Some(ScatterPoint {
            player_name: stat.player_name.clone(),
            x: stat.rookie_year as f64,
            y: self.y(player_index, stat.league),
            size: stat.minutes,
            league: stat.league,
            detail,
        })
    }

    /// Lay out individual players' stat rows.
    pub fn map(&self, index: &PlayerIndex, stats: &[PlayTime]) -> ScatterSpec {
        let points = stats.iter().filter_map(|s| self.place(index, s, None)).collect();
        self.layout(index, points)
    }

    /// Wrap already placed points with axes, ticks and sizing.
    pub fn layout(&self, index: &PlayerIndex, points: Vec<ScatterPoint>) -> ScatterSpec {
        let n = index.len();
        let ticks = Ticks {
            values: index.entries().iter().map(|e| self.tick_value(e.player_index)).collect(),
            labels: index.entries().iter().map(|e| e.player_label.clone()).collect(),
        };

        ScatterSpec {
            points,
            category_order: League::ALL.to_vec(),
            colors: DEFAULT_PALETTE[..League::ALL.len()].to_vec(),
            marker: self.marker,
            x_axis: Axis::new("rookie year", self.x_range),
            y_axis: Axis::new("", self.y_range(n)).with_ticks(ticks),
            height: self.height(n),
        }
    }
}
