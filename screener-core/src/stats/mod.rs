//! Statistics and aggregation layer: chart payload builders over flat
//! sequences of trade-like rows.

pub mod bins;
pub mod distribution;
pub mod perf;
pub mod series;

pub use bins::{quantile_bins, BinStats, QuantileBins, DEFAULT_BIN_COUNT};
pub use distribution::{distribution, Distribution, DEFAULT_BIN_SIZE};
pub use perf::{calc_perf, mean, median, quantile_sorted, sample_std, PerfStats};
pub use series::{cumulative_series, CumulativeSeries};
