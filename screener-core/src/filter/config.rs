//! Declarative screening configuration.
//!
//! Every section is optional and independently a no-op at its default
//! value: a `FilterConfig::default()` keeps every row. Configs originate as
//! JSON presets saved by the dashboard, so the wire shape is versioned and
//! unknown sections are rejected as programmer errors.

use crate::error::ScreenerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire version accepted by [`FilterConfig::from_json`].
pub const CONFIG_VERSION: &str = "v1";

/// Threshold floor for zap-mode signal triggers.
pub const ZAP_THRESHOLD_FLOOR: f64 = 0.3;

/// Threshold floor for sigma-mode signal triggers.
pub const SIGMA_THRESHOLD_FLOOR: f64 = 0.05;

/// Ticker list behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    #[default]
    Off,
    /// Reject tickers present in the ignore set.
    Ignore,
    /// Keep only tickers present in the apply set (no-op when empty).
    Apply,
    /// Keep only tickers present in the pinned set (no-op when empty).
    Pin,
}

/// List-based ticker selection. Set contents are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListFilter {
    pub mode: ListMode,
    pub ignore: Vec<String>,
    pub apply: Vec<String>,
    pub pinned: Vec<String>,
}

/// Gate on whether the row carries a non-zero position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityMode {
    #[default]
    Off,
    OnlyActive,
    OnlyInactive,
}

/// Inclusive numeric range on a named metric. An absent side is
/// unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Bound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bound {
    pub fn min(value: f64) -> Self {
        Self {
            min: Some(value),
            max: None,
        }
    }

    pub fn max(value: f64) -> Self {
        Self {
            min: None,
            max: Some(value),
        }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Inclusive containment; open-ended sides behave as infinities.
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Independent boolean exclusion flags. A set flag rejects rows for which
/// the corresponding condition holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExcludeFlags {
    pub dividend: bool,
    pub news: bool,
    pub ptp: bool,
    pub ssr: bool,
    pub report: bool,
    pub etf: bool,
    pub price_under_5: bool,
}

/// Independent boolean inclusion flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncludeFlags {
    /// Keep only rows whose country is exactly "USA".
    pub usa_only: bool,
    /// Keep only rows whose country mentions China or Hong Kong.
    pub china_only: bool,
}

/// One toggleable multi-select dimension. When disabled the selected values
/// are ignored entirely.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MultiSelect {
    pub enabled: bool,
    pub values: Vec<String>,
}

impl MultiSelect {
    pub fn selected(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            enabled: true,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// The three categorical multi-select dimensions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MultiFilters {
    pub countries: MultiSelect,
    pub exchanges: MultiSelect,
    pub sectors: MultiSelect,
}

/// Tri-state match against the has-report flag. `All` is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportMode {
    #[default]
    All,
    Yes,
    No,
}

/// Directional signal-threshold trigger mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZapMode {
    #[default]
    Off,
    Zap,
    Sigma,
}

/// Zap/sigma directional threshold rule. The threshold is clamped to a
/// mode-specific floor so near-zero triggers can never be configured.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZapFilter {
    pub mode: ZapMode,
    pub threshold_abs: f64,
}

impl Default for ZapFilter {
    fn default() -> Self {
        Self {
            mode: ZapMode::Off,
            threshold_abs: ZAP_THRESHOLD_FLOOR,
        }
    }
}

impl ZapFilter {
    /// The threshold actually applied, never below the mode floor.
    pub fn effective_threshold(&self) -> f64 {
        match self.mode {
            ZapMode::Off | ZapMode::Zap => self.threshold_abs.max(ZAP_THRESHOLD_FLOOR),
            ZapMode::Sigma => self.threshold_abs.max(SIGMA_THRESHOLD_FLOOR),
        }
    }
}

/// The full declarative screening configuration (wire version `v1`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FilterConfig {
    pub lists: ListFilter,
    pub activity: ActivityMode,
    pub bounds: HashMap<String, Bound>,
    pub exclude: ExcludeFlags,
    pub include: IncludeFlags,
    pub multi: MultiFilters,
    pub report: ReportMode,
    /// Case-insensitive substring needle against the equity-type field.
    /// Empty = no-op.
    pub equity_type: String,
    pub zap: ZapFilter,
}

impl FilterConfig {
    /// Parse a saved preset, enforcing the `version` wire tag.
    pub fn from_json(json: &str) -> Result<Self, ScreenerError> {
        let mut value: serde_json::Value = serde_json::from_str(json)
            .map_err(|err| ScreenerError::InvalidConfig(err.to_string()))?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| ScreenerError::InvalidConfig("expected a JSON object".to_string()))?;
        let version = obj
            .remove("version")
            .and_then(|v| v.as_str().map(str::to_owned))
            .ok_or_else(|| ScreenerError::InvalidConfig("missing version tag".to_string()))?;
        if version != CONFIG_VERSION {
            return Err(ScreenerError::UnsupportedConfigVersion(version));
        }
        serde_json::from_value(value).map_err(|err| ScreenerError::InvalidConfig(err.to_string()))
    }
}
