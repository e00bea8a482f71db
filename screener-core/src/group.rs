//! Per-ticker grouping of trade rows.

use crate::row::TradeRow;
use crate::stats::perf::{calc_perf, PerfStats};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Performance summary for one ticker's trades.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TickerSummary {
    pub ticker: SmolStr,
    pub stats: PerfStats,
}

/// Stable partition of rows by ticker: buckets appear in first-appearance
/// order and each bucket preserves the original row order.
pub fn group_by_ticker(rows: &[TradeRow]) -> IndexMap<SmolStr, Vec<&TradeRow>> {
    let mut groups: IndexMap<SmolStr, Vec<&TradeRow>> = IndexMap::new();
    for row in rows {
        groups.entry(row.ticker.clone()).or_default().push(row);
    }
    groups
}

/// One [`calc_perf`] record per ticker, in first-appearance order.
pub fn ticker_summaries(rows: &[TradeRow]) -> Vec<TickerSummary> {
    group_by_ticker(rows)
        .into_iter()
        .map(|(ticker, rows)| {
            let outcomes: Vec<f64> = rows.iter().map(|r| r.outcome).collect();
            TickerSummary {
                ticker,
                stats: calc_perf(&outcomes),
            }
        })
        .collect()
}
