/// Screener Core - row screening and trade statistics
///
/// This library is the data-processing core behind the market dashboard:
/// - Canonical row model with ingestion normalization of loosely-cased
///   upstream JSON rows
/// - Declarative filter engine for arbitrage-style row screening
/// - Statistics and aggregation layer producing chart payloads
///   (performance stats, cumulative series, signed histograms,
///   quantile bins)
/// - Per-ticker grouping and summary-table sort state
/// - User preferences with an injected persistence port
///
/// All core functions are pure and synchronous over caller-owned immutable
/// inputs; network I/O lives in the `screener-feed` crate.
pub mod error;
pub mod filter;
pub mod group;
pub mod prefs;
pub mod row;
pub mod sort;
pub mod stats;

// Re-export commonly used types for convenience
pub use error::ScreenerError;
pub use filter::{apply_filters, FilterConfig};
pub use group::{group_by_ticker, ticker_summaries, TickerSummary};
pub use prefs::{MemoryStore, Preferences, PrefsStore, Theme};
pub use row::{normalize_rows, ScreenRow, Side, TradeRow};
pub use sort::{sort_summaries, SortColumn, SortDirection, SortState};
pub use stats::{
    calc_perf, cumulative_series, distribution, quantile_bins, CumulativeSeries, Distribution,
    PerfStats, QuantileBins,
};
