//! Canonical row model and ingestion normalization.
//!
//! Upstream services deliver rows as loose JSON objects whose keys appear in
//! either a canonical camelCase spelling or a legacy PascalCase spelling
//! (`ticker` vs `Ticker`, `positionBp` vs `PositionBp`). All of that
//! duck-typing is resolved once, here, at the ingestion boundary: every row
//! is converted into a single strict [`ScreenRow`] shape so the filter and
//! statistics layers never perform dual-name lookups.

use serde_json::{Map, Value};
use smol_str::SmolStr;
use std::collections::HashMap;
use tracing::debug;

/// Trade direction of a signal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Up,
    Down,
}

impl Side {
    /// Parse a direction field.
    ///
    /// Accepts the spellings seen across upstream payloads: `up`/`long`/`1`
    /// for [`Side::Up`], `down`/`short`/`-1` for [`Side::Down`]. Anything
    /// else is unrecognized and yields `None`.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.trim().to_uppercase().as_str() {
                "UP" | "LONG" | "1" => Some(Side::Up),
                "DOWN" | "SHORT" | "-1" => Some(Side::Down),
                _ => None,
            },
            Value::Number(n) => {
                let n = n.as_f64()?;
                if n > 0.0 {
                    Some(Side::Up)
                } else if n < 0.0 {
                    Some(Side::Down)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Side::Up)
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Side::Down)
    }
}

/// One screening row in canonical shape.
///
/// Field semantics follow the upstream bridge payload; all string
/// identifiers compared by the filter engine (ticker, country, exchange,
/// sector) are stored as received except for the ticker, which is uppercased
/// and trimmed at ingestion because every downstream comparison is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenRow {
    /// Uppercase trimmed security symbol. Never empty.
    pub ticker: SmolStr,
    /// Current position size in basis points. Zero when flat or absent.
    pub position_bp: f64,
    pub country: Option<String>,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub equity_type: Option<String>,
    pub has_dividend: bool,
    pub news_count: u64,
    pub is_ptp: bool,
    pub is_ssr: bool,
    pub has_report: bool,
    pub is_etf: bool,
    pub last_close: Option<f64>,
    pub direction: Option<Side>,
    pub zap: Option<f64>,
    pub sigma: Option<f64>,
    /// Every numeric field of the raw row, keyed by its canonical name.
    /// Bounds filters resolve their metric keys against this map.
    pub metrics: HashMap<String, f64>,
}

/// Resolve a field that may appear under its canonical camelCase name or a
/// legacy PascalCase spelling. Canonical wins when both are present.
fn resolve<'a>(raw: &'a Map<String, Value>, canonical: &str) -> Option<&'a Value> {
    if let Some(value) = raw.get(canonical) {
        return Some(value);
    }
    let mut legacy = String::with_capacity(canonical.len());
    let mut chars = canonical.chars();
    legacy.extend(chars.next().map(|c| c.to_ascii_uppercase()));
    legacy.extend(chars);
    raw.get(legacy.as_str())
}

fn resolve_str(raw: &Map<String, Value>, canonical: &str) -> Option<String> {
    match resolve(raw, canonical)? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn resolve_f64(raw: &Map<String, Value>, canonical: &str) -> Option<f64> {
    resolve(raw, canonical)?.as_f64()
}

fn resolve_bool(raw: &Map<String, Value>, canonical: &str) -> bool {
    match resolve(raw, canonical) {
        Some(Value::Bool(b)) => *b,
        // Some feeds encode flags as 0/1
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

impl ScreenRow {
    /// Convert one raw JSON row into the canonical shape.
    ///
    /// Returns `None` when the row has no resolvable ticker (missing, empty,
    /// or whitespace-only); such rows are undisplayable and are dropped at
    /// the boundary rather than threaded through the filter engine.
    pub fn from_raw(raw: &Map<String, Value>) -> Option<Self> {
        let ticker = resolve_str(raw, "ticker")?;
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return None;
        }

        // Every top-level numeric field is a candidate bounds metric. Keys
        // are canonicalized to lowercase-first so configs written against
        // either spelling resolve to the same entry.
        let mut metrics = HashMap::new();
        for (key, value) in raw {
            if let Some(v) = value.as_f64() {
                metrics.insert(canonical_key(key), v);
            }
        }

        let direction = resolve(raw, "direction").and_then(Side::parse);

        Some(Self {
            ticker: SmolStr::new(&ticker),
            position_bp: resolve_f64(raw, "positionBp").unwrap_or(0.0),
            country: resolve_str(raw, "country"),
            exchange: resolve_str(raw, "exchange"),
            sector: resolve_str(raw, "sector"),
            equity_type: resolve_str(raw, "equityType"),
            has_dividend: resolve_bool(raw, "hasDividend"),
            news_count: resolve(raw, "newsCount")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            is_ptp: resolve_bool(raw, "isPtp"),
            is_ssr: resolve_bool(raw, "isSsr"),
            has_report: resolve_bool(raw, "hasReport"),
            is_etf: resolve_bool(raw, "isEtf"),
            last_close: resolve_f64(raw, "lastClose"),
            direction,
            zap: resolve_f64(raw, "zap"),
            sigma: resolve_f64(raw, "sigma"),
            metrics,
        })
    }

    /// A row is active when it carries a non-zero position.
    pub fn is_active(&self) -> bool {
        self.position_bp != 0.0
    }
}

/// Lowercase the first character of a key so `PositionBp` and `positionBp`
/// collapse to one metrics entry.
fn canonical_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Ingestion boundary: normalize a batch of raw JSON rows.
///
/// Non-object entries and rows without a resolvable ticker are dropped;
/// the drop count is logged at debug level since upstream data is
/// uncurated and partial batches are routine.
pub fn normalize_rows(raw_rows: &[Value]) -> Vec<ScreenRow> {
    let mut rows = Vec::with_capacity(raw_rows.len());
    let mut dropped = 0usize;
    for value in raw_rows {
        match value.as_object().and_then(ScreenRow::from_raw) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, kept = rows.len(), "dropped rows without ticker");
    }
    rows
}

/// One trade-like observation consumed by the statistics layer.
///
/// Independent of [`ScreenRow`]: the filter engine and the statistics layer
/// share no code path, only the calling site that shapes rows for each.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    /// Integer date key, e.g. 20250131 (YYYYMMDD). Integer-comparable;
    /// calendar gaps are not filled.
    pub date_key: i64,
    pub ticker: SmolStr,
    /// Signed trade outcome.
    pub outcome: f64,
    /// Optional secondary numeric features (e.g. `move_1000`) used as the
    /// x-axis of quantile binning.
    pub features: HashMap<String, f64>,
}

impl TradeRow {
    pub fn new(date_key: i64, ticker: impl Into<SmolStr>, outcome: f64) -> Self {
        Self {
            date_key,
            ticker: ticker.into(),
            outcome,
            features: HashMap::new(),
        }
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }
}
