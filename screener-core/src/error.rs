use thiserror::Error;

/// All errors generated in `screener-core`.
///
/// Data-quality problems (missing fields, non-numeric values, empty inputs)
/// are absorbed by the filter and statistics layers and never surface here.
/// These variants cover programmer errors only: malformed configuration and
/// preference-store failures.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ScreenerError {
    #[error("unsupported filter config version: {0}")]
    UnsupportedConfigVersion(String),

    #[error("invalid filter config: {0}")]
    InvalidConfig(String),

    #[error("preference store write failed for key {key}: {reason}")]
    PrefsWrite { key: String, reason: String },
}
