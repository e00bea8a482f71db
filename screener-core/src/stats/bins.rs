//! Equal-population quantile binning of (feature, outcome) pairs.
//!
//! Quantile (not fixed-width) cut points keep per-bin sample sizes
//! comparable regardless of how skewed the feature distribution is.

use crate::stats::perf::{calc_perf, quantile_sorted, PerfStats};
use serde::{Deserialize, Serialize};

/// Default number of quantile bins.
pub const DEFAULT_BIN_COUNT: usize = 5;

/// Performance of outcomes whose feature value fell into one quantile bin.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinStats {
    pub left: f64,
    pub right: f64,
    pub label: String,
    pub n: u64,
    pub sum: f64,
    pub avg: f64,
    pub median: f64,
    pub std: f64,
    pub bat_pct: f64,
    pub wl: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
}

impl BinStats {
    fn from_perf(left: f64, right: f64, label: String, perf: &PerfStats) -> Self {
        Self {
            left,
            right,
            label,
            n: perf.n,
            sum: perf.sum,
            avg: perf.avg,
            median: perf.median,
            std: perf.std,
            bat_pct: perf.bat_pct,
            wl: perf.wl,
            avg_win: perf.avg_win,
            avg_loss: perf.avg_loss,
        }
    }
}

/// Quantile-binned cross-tabulation output.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct QuantileBins {
    pub bins: Vec<BinStats>,
}

/// Partition `(x, y)` observations into `bin_count` equal-population bins
/// over `x` and compute [`calc_perf`] of the `y` values in each.
///
/// Cut points are linear-interpolation quantiles forced non-decreasing;
/// heavy ties in `x` can therefore produce empty bins, which come out as
/// all-zero records. Every bin is `[left, right)` except the last, which is
/// closed on both ends so the maximum observation is included.
pub fn quantile_bins(observations: &[(f64, f64)], bin_count: usize) -> QuantileBins {
    if observations.is_empty() || bin_count == 0 {
        return QuantileBins::default();
    }

    let mut xs: Vec<f64> = observations.iter().map(|(x, _)| *x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut cuts = Vec::with_capacity(bin_count + 1);
    for i in 0..=bin_count {
        let q = i as f64 / bin_count as f64;
        let mut cut = quantile_sorted(&xs, q);
        // Monotonic clamp: tied x-values can pull a cut below its
        // predecessor; force the sequence non-decreasing
        if let Some(&prev) = cuts.last() {
            cut = f64::max(cut, prev);
        }
        cuts.push(cut);
    }

    let bins = (0..bin_count)
        .map(|i| {
            let left = cuts[i];
            let right = cuts[i + 1];
            let last = i == bin_count - 1;
            let ys: Vec<f64> = observations
                .iter()
                .filter(|(x, _)| *x >= left && if last { *x <= right } else { *x < right })
                .map(|(_, y)| *y)
                .collect();
            let label = if last {
                format!("[{:.2}, {:.2}]", left, right)
            } else {
                format!("[{:.2}, {:.2})", left, right)
            };
            BinStats::from_perf(left, right, label, &calc_perf(&ys))
        })
        .collect();

    QuantileBins { bins }
}
