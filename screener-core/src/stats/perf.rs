//! Summary performance statistics over signed trade outcomes.

use serde::{Deserialize, Serialize};

/// Arithmetic mean. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1). Fewer than two values yields 0.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Linear-interpolation quantile over pre-sorted values, index = q * (n - 1)
/// (the conventional statistical-package definition). `q` in [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let index = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Median via [`quantile_sorted`] on a sorted copy.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    quantile_sorted(&sorted, 0.5)
}

/// Fixed performance record derived from a sequence of signed outcomes.
///
/// Zero counts as a win. Serialized field names match the dashboard wire
/// format consumed by the Scope page charts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PerfStats {
    pub sum: f64,
    pub avg: f64,
    pub median: f64,
    pub std: f64,
    pub n: u64,
    pub n_win: u64,
    pub n_loss: u64,
    /// Sum of wins over absolute sum of losses; 0 when there are no losses.
    #[serde(rename = "W/L")]
    pub wl: f64,
    /// Percentage of non-negative outcomes.
    #[serde(rename = "bat%")]
    pub bat_pct: f64,
    #[serde(rename = "avg win")]
    pub avg_win: f64,
    #[serde(rename = "avg loss")]
    pub avg_loss: f64,
    #[serde(rename = "p_10")]
    pub p10: f64,
    #[serde(rename = "p_90")]
    pub p90: f64,
}

/// Compute the full performance record.
///
/// Degenerate inputs are well-defined: empty input yields the all-zero
/// record; a single value yields std 0 and median/percentiles equal to it.
pub fn calc_perf(values: &[f64]) -> PerfStats {
    if values.is_empty() {
        return PerfStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len() as u64;
    let sum: f64 = values.iter().sum();
    let wins: Vec<f64> = values.iter().copied().filter(|v| *v >= 0.0).collect();
    let losses: Vec<f64> = values.iter().copied().filter(|v| *v < 0.0).collect();
    let sum_wins: f64 = wins.iter().sum();
    let sum_loss_abs: f64 = losses.iter().map(|v| v.abs()).sum();

    PerfStats {
        sum,
        avg: sum / n as f64,
        median: quantile_sorted(&sorted, 0.5),
        std: sample_std(values),
        n,
        n_win: wins.len() as u64,
        n_loss: losses.len() as u64,
        wl: if sum_loss_abs > 0.0 {
            sum_wins / sum_loss_abs
        } else {
            0.0
        },
        bat_pct: wins.len() as f64 / n as f64 * 100.0,
        avg_win: mean(&wins),
        avg_loss: mean(&losses),
        p10: quantile_sorted(&sorted, 0.1),
        p90: quantile_sorted(&sorted, 0.9),
    }
}
