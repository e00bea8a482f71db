//! Declarative filter engine for arbitrage-style row screening.

pub mod config;
pub mod engine;

pub use config::{
    ActivityMode, Bound, ExcludeFlags, FilterConfig, IncludeFlags, ListFilter, ListMode,
    MultiFilters, MultiSelect, ReportMode, ZapFilter, ZapMode, CONFIG_VERSION,
    SIGMA_THRESHOLD_FLOOR, ZAP_THRESHOLD_FLOOR,
};
pub use engine::apply_filters;
