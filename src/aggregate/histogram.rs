//! Fixed-width bucketing of minutes per league.

use crate::chart::spec::{BinSpec, HistogramSeries};
use crate::domain::{DEFAULT_PALETTE, League, MAX_MINUTES};

/// Bin width in minutes.
pub const MINUTES_BIN_SIZE: f64 = 100.0;

/// `[0, 3600)` in 100-minute bins (36 bins).
pub fn minutes_bins() -> BinSpec {
    BinSpec {
        start: 0.0,
        end: MAX_MINUTES,
        size: MINUTES_BIN_SIZE,
    }
}

/// Index of the bin containing `value`.
///
/// Bins are half-open `[lo, hi)`, except that `value == end` is folded into
/// the last bin. Values outside `[start, end]` or non-finite give `None`.
pub fn bucket_of(bins: &BinSpec, value: f64) -> Option<usize> {
    let n = bins.bin_count();
    if n == 0 || !value.is_finite() || value < bins.start || value > bins.end {
        return None;
    }
    let idx = ((value - bins.start) / bins.size).floor() as usize;
    Some(idx.min(n - 1))
}

/// Counts per bin plus the number of values that fell outside.
pub fn bucketize(bins: &BinSpec, values: &[f64]) -> (Vec<u32>, u32) {
    let mut counts = vec![0u32; bins.bin_count()];
    let mut out_of_range = 0u32;
    for &v in values {
        match bucket_of(bins, v) {
            Some(idx) => counts[idx] += 1,
            None => out_of_range += 1,
        }
    }
    (counts, out_of_range)
}

/// One series per league, J1/J2/J3 in that order, colored from the default
/// palette in order. Input is one `(league, minutes)` pair per stat row.
pub fn minutes_by_league(minutes: &[(League, f64)], bins: &BinSpec) -> Vec<HistogramSeries> {
    League::ALL
        .iter()
        .zip(DEFAULT_PALETTE.iter())
        .map(|(&league, &color)| {
            let values: Vec<f64> = minutes
                .iter()
                .filter(|(l, _)| *l == league)
                .map(|&(_, m)| m)
                .collect();
            let (counts, out_of_range) = bucketize(bins, &values);
            HistogramSeries {
                name: league.to_string(),
                color,
                values,
                counts,
                out_of_range,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_minutes_land_in_last_bucket_of_their_league() {
        let bins = minutes_bins();
        let series = minutes_by_league(&[(League::J2, 3599.0)], &bins);

        assert_eq!(series.len(), 3);
        let j2 = &series[1];
        assert_eq!(j2.name, "J2");
        let idx = j2.counts.iter().position(|&c| c == 1).unwrap();
        assert_eq!(bins.edges(idx), (3500.0, 3600.0));
        assert!(series[0].counts.iter().all(|&c| c == 0));
        assert!(series[2].counts.iter().all(|&c| c == 0));
    }

    #[test]
    fn bins_are_half_open() {
        let bins = minutes_bins();
        assert_eq!(bucket_of(&bins, 0.0), Some(0));
        assert_eq!(bucket_of(&bins, 99.999), Some(0));
        assert_eq!(bucket_of(&bins, 100.0), Some(1));
        assert_eq!(bucket_of(&bins, 3600.0), Some(35));
        assert_eq!(bucket_of(&bins, 3600.5), None);
        assert_eq!(bucket_of(&bins, f64::NAN), None);
    }

    #[test]
    fn out_of_range_values_are_counted_separately() {
        let (counts, out) = bucketize(&minutes_bins(), &[50.0, 4000.0, 150.0, 120.0]);
        assert_eq!(counts.len(), 36);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 2);
        assert_eq!(out, 1);
    }

    #[test]
    fn series_use_palette_in_order() {
        let series = minutes_by_league(&[], &minutes_bins());
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["J1", "J2", "J3"]);
        assert_eq!(series[0].color, DEFAULT_PALETTE[0]);
        assert_eq!(series[2].color, DEFAULT_PALETTE[2]);
    }
}
