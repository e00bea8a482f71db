//! Sort state for the per-ticker summary table.
//!
//! Numeric columns default to descending (largest effect first), the ticker
//! column to ascending. Toggling the current column flips direction;
//! selecting a different column resets to that column's default. Ties are
//! broken by ticker name ascending.

use crate::group::TickerSummary;
use crate::stats::perf::PerfStats;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable columns of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Ticker,
    Sum,
    Avg,
    Median,
    Std,
    N,
    NWin,
    NLoss,
    Wl,
    BatPct,
    AvgWin,
    AvgLoss,
    P10,
    P90,
}

impl SortColumn {
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortColumn::Ticker => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    fn value(&self, stats: &PerfStats) -> f64 {
        match self {
            SortColumn::Ticker => 0.0,
            SortColumn::Sum => stats.sum,
            SortColumn::Avg => stats.avg,
            SortColumn::Median => stats.median,
            SortColumn::Std => stats.std,
            SortColumn::N => stats.n as f64,
            SortColumn::NWin => stats.n_win as f64,
            SortColumn::NLoss => stats.n_loss as f64,
            SortColumn::Wl => stats.wl,
            SortColumn::BatPct => stats.bat_pct,
            SortColumn::AvgWin => stats.avg_win,
            SortColumn::AvgLoss => stats.avg_loss,
            SortColumn::P10 => stats.p10,
            SortColumn::P90 => stats.p90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Current sort key and direction of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(SortColumn::Sum)
    }
}

impl SortState {
    /// Start sorting by `column` in its default direction.
    pub fn new(column: SortColumn) -> Self {
        Self {
            column,
            direction: column.default_direction(),
        }
    }

    /// Handle a column-header click: same column flips direction, a new
    /// column resets to its default direction.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            *self = Self::new(column);
        }
    }
}

/// Sort summaries in place per the current sort state.
pub fn sort_summaries(summaries: &mut [TickerSummary], state: &SortState) {
    summaries.sort_by(|a, b| {
        let ordering = match state.column {
            SortColumn::Ticker => a.ticker.cmp(&b.ticker),
            column => column
                .value(&a.stats)
                .partial_cmp(&column.value(&b.stats))
                .unwrap_or(Ordering::Equal),
        };
        let ordering = match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        ordering.then_with(|| a.ticker.cmp(&b.ticker))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::perf::calc_perf;
    use smol_str::SmolStr;

    fn summary(ticker: &str, outcomes: &[f64]) -> TickerSummary {
        TickerSummary {
            ticker: SmolStr::new(ticker),
            stats: calc_perf(outcomes),
        }
    }

    fn tickers(summaries: &[TickerSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.ticker.as_str()).collect()
    }

    #[test]
    fn test_numeric_default_is_descending() {
        let mut rows = vec![
            summary("AAPL", &[1.0]),
            summary("MSFT", &[3.0]),
            summary("TSLA", &[2.0]),
        ];
        sort_summaries(&mut rows, &SortState::new(SortColumn::Sum));
        assert_eq!(tickers(&rows), vec!["MSFT", "TSLA", "AAPL"]);
    }

    #[test]
    fn test_ticker_default_is_ascending() {
        let mut rows = vec![
            summary("TSLA", &[1.0]),
            summary("AAPL", &[2.0]),
            summary("MSFT", &[3.0]),
        ];
        sort_summaries(&mut rows, &SortState::new(SortColumn::Ticker));
        assert_eq!(tickers(&rows), vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn test_toggle_same_column_flips_direction() {
        let mut state = SortState::new(SortColumn::Avg);
        assert_eq!(state.direction, SortDirection::Descending);
        state.toggle(SortColumn::Avg);
        assert_eq!(state.direction, SortDirection::Ascending);
        state.toggle(SortColumn::Avg);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_toggle_new_column_resets_to_default() {
        let mut state = SortState::new(SortColumn::Avg);
        state.toggle(SortColumn::Avg); // now ascending
        state.toggle(SortColumn::Ticker);
        assert_eq!(state.column, SortColumn::Ticker);
        assert_eq!(state.direction, SortDirection::Ascending);
        state.toggle(SortColumn::N);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_ties_broken_by_ticker_ascending() {
        let mut rows = vec![
            summary("TSLA", &[2.0]),
            summary("AAPL", &[2.0]),
            summary("MSFT", &[5.0]),
        ];
        sort_summaries(&mut rows, &SortState::new(SortColumn::Sum));
        assert_eq!(tickers(&rows), vec!["MSFT", "AAPL", "TSLA"]);
    }
}
