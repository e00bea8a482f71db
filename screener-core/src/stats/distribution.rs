//! Signed-bucket outcome distribution histogram.

use crate::stats::perf::mean;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

/// Default histogram bin width.
pub const DEFAULT_BIN_SIZE: f64 = 0.05;

/// Histogram of outcomes split into non-negative and negative counts per
/// bucket, with bin boundaries aligned to multiples of the bin size.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub bin_start: f64,
    pub bin_end: f64,
    pub bin_size: f64,
    pub pos_counts: Vec<u64>,
    pub neg_counts: Vec<u64>,
    pub mean: f64,
    /// Zero reference line for chart rendering.
    pub border: f64,
}

/// Build the signed histogram.
///
/// The data range is floored/ceiled to the bin width so boundaries land on
/// aligned multiples; each value's bucket is `floor((v - start) / size)`
/// clamped into the valid range (the maximum value falls into the last
/// bucket). Empty input yields an empty, all-zero distribution.
pub fn distribution(values: &[f64], bin_size: f64) -> Distribution {
    if values.is_empty() || bin_size <= 0.0 {
        return Distribution {
            bin_size,
            ..Distribution::default()
        };
    }

    let (min, max) = match values
        .iter()
        .copied()
        .minmax_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    {
        MinMaxResult::NoElements => return Distribution::default(),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let bin_start = (min / bin_size).floor() * bin_size;
    let bin_end = (max / bin_size).ceil() * bin_size;
    let bin_count = (((bin_end - bin_start) / bin_size).round() as usize).max(1);

    let mut pos_counts = vec![0u64; bin_count];
    let mut neg_counts = vec![0u64; bin_count];
    for &value in values {
        let index = ((value - bin_start) / bin_size).floor() as isize;
        let index = index.clamp(0, bin_count as isize - 1) as usize;
        if value >= 0.0 {
            pos_counts[index] += 1;
        } else {
            neg_counts[index] += 1;
        }
    }

    Distribution {
        bin_start,
        bin_end,
        bin_size,
        pos_counts,
        neg_counts,
        mean: mean(values),
        border: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let dist = distribution(&[], DEFAULT_BIN_SIZE);
        assert!(dist.pos_counts.is_empty());
        assert!(dist.neg_counts.is_empty());
        assert_eq!(dist.mean, 0.0);
    }

    #[test]
    fn test_counts_conserved() {
        let values = [-0.12, 0.03, 0.07];
        let dist = distribution(&values, DEFAULT_BIN_SIZE);
        let pos: u64 = dist.pos_counts.iter().sum();
        let neg: u64 = dist.neg_counts.iter().sum();
        assert_eq!(pos, 2); // 0.03 and 0.07 are non-negative
        assert_eq!(neg, 1);
        assert_eq!(dist.pos_counts.len(), dist.neg_counts.len());
    }

    #[test]
    fn test_boundaries_aligned_to_bin_size() {
        let dist = distribution(&[-0.12, 0.03, 0.07], 0.05);
        assert!((dist.bin_start + 0.15).abs() < 1e-9);
        assert!((dist.bin_end - 0.10).abs() < 1e-9);
        assert_eq!(dist.pos_counts.len(), 5);
    }

    #[test]
    fn test_max_value_lands_in_last_bucket() {
        // max = 0.10 sits exactly on bin_end; the clamp pulls it into the
        // last valid bucket instead of overflowing
        let dist = distribution(&[0.01, 0.10], 0.05);
        assert_eq!(dist.pos_counts.len(), 2);
        assert_eq!(dist.pos_counts[1], 1);
    }

    #[test]
    fn test_all_equal_values_single_bucket() {
        let dist = distribution(&[0.05, 0.05, 0.05], 0.05);
        assert_eq!(dist.pos_counts.len(), 1);
        assert_eq!(dist.pos_counts[0], 3);
    }

    #[test]
    fn test_zero_counts_as_positive() {
        let dist = distribution(&[0.0, -0.01], 0.05);
        let pos: u64 = dist.pos_counts.iter().sum();
        let neg: u64 = dist.neg_counts.iter().sum();
        assert_eq!(pos, 1);
        assert_eq!(neg, 1);
    }

    #[test]
    fn test_border_is_zero_reference() {
        let dist = distribution(&[1.0, 2.0], 0.05);
        assert_eq!(dist.border, 0.0);
        assert!((dist.mean - 1.5).abs() < 1e-9);
    }
}
