//! Rule evaluation for the declarative screening configuration.
//!
//! [`apply_filters`] is a pure, stable keep-filter: surviving rows retain
//! their original relative order and nothing is mutated. Each rule group is
//! an independent predicate ANDed with the rest; a row is kept only when
//! every active rule passes. Missing data fails a rule rather than passing
//! it (an absent metric cannot be known to satisfy a range constraint),
//! with a single deliberate exception in the zap rule documented below.

use crate::filter::config::{ActivityMode, FilterConfig, ListMode, ReportMode, ZapMode};
use crate::row::ScreenRow;
use std::collections::HashSet;

/// Apply the full configuration to a batch of rows.
///
/// A `FilterConfig::default()` keeps every row unchanged and in order.
pub fn apply_filters(rows: Vec<ScreenRow>, cfg: &FilterConfig) -> Vec<ScreenRow> {
    let prepared = Prepared::new(cfg);
    rows.into_iter().filter(|row| prepared.keep(row)).collect()
}

/// Config with its categorical sets uppercased once, so the per-row loop
/// does set-membership checks instead of repeated normalization.
struct Prepared<'a> {
    cfg: &'a FilterConfig,
    ignore: HashSet<String>,
    apply: HashSet<String>,
    pinned: HashSet<String>,
    countries: HashSet<String>,
    exchanges: HashSet<String>,
    sectors: HashSet<String>,
    equity_needle: String,
}

fn upper_set(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_uppercase())
        .filter(|v| !v.is_empty())
        .collect()
}

impl<'a> Prepared<'a> {
    fn new(cfg: &'a FilterConfig) -> Self {
        Self {
            ignore: upper_set(&cfg.lists.ignore),
            apply: upper_set(&cfg.lists.apply),
            pinned: upper_set(&cfg.lists.pinned),
            countries: upper_set(&cfg.multi.countries.values),
            exchanges: upper_set(&cfg.multi.exchanges.values),
            sectors: upper_set(&cfg.multi.sectors.values),
            equity_needle: cfg.equity_type.trim().to_uppercase(),
            cfg,
        }
    }

    fn keep(&self, row: &ScreenRow) -> bool {
        !row.ticker.is_empty()
            && self.pass_lists(row)
            && self.pass_activity(row)
            && self.pass_include(row)
            && self.pass_multi(row)
            && self.pass_exclude(row)
            && self.pass_report(row)
            && self.pass_equity_type(row)
            && self.pass_bounds(row)
            && self.pass_zap(row)
    }

    fn pass_lists(&self, row: &ScreenRow) -> bool {
        let ticker = row.ticker.as_str();
        match self.cfg.lists.mode {
            ListMode::Off => true,
            ListMode::Ignore => !self.ignore.contains(ticker),
            ListMode::Apply => self.apply.is_empty() || self.apply.contains(ticker),
            ListMode::Pin => self.pinned.is_empty() || self.pinned.contains(ticker),
        }
    }

    fn pass_activity(&self, row: &ScreenRow) -> bool {
        match self.cfg.activity {
            ActivityMode::Off => true,
            ActivityMode::OnlyActive => row.is_active(),
            ActivityMode::OnlyInactive => !row.is_active(),
        }
    }

    fn pass_include(&self, row: &ScreenRow) -> bool {
        if !self.cfg.include.usa_only && !self.cfg.include.china_only {
            return true;
        }
        let Some(country) = row.country.as_deref() else {
            return false;
        };
        let country = country.trim().to_uppercase();
        if self.cfg.include.usa_only && country != "USA" {
            return false;
        }
        if self.cfg.include.china_only && !country.contains("CHINA") && !country.contains("HONG") {
            return false;
        }
        true
    }

    fn pass_multi(&self, row: &ScreenRow) -> bool {
        pass_dimension(
            self.cfg.multi.countries.enabled,
            &self.countries,
            row.country.as_deref(),
        ) && pass_dimension(
            self.cfg.multi.exchanges.enabled,
            &self.exchanges,
            row.exchange.as_deref(),
        ) && pass_dimension(
            self.cfg.multi.sectors.enabled,
            &self.sectors,
            row.sector.as_deref(),
        )
    }

    fn pass_exclude(&self, row: &ScreenRow) -> bool {
        let ex = &self.cfg.exclude;
        if ex.dividend && row.has_dividend {
            return false;
        }
        if ex.news && row.news_count > 0 {
            return false;
        }
        if ex.ptp && row.is_ptp {
            return false;
        }
        if ex.ssr && row.is_ssr {
            return false;
        }
        if ex.report && row.has_report {
            return false;
        }
        if ex.etf && row.is_etf {
            return false;
        }
        if ex.price_under_5 && row.last_close.is_some_and(|close| close < 5.0) {
            return false;
        }
        true
    }

    fn pass_report(&self, row: &ScreenRow) -> bool {
        match self.cfg.report {
            ReportMode::All => true,
            ReportMode::Yes => row.has_report,
            ReportMode::No => !row.has_report,
        }
    }

    fn pass_equity_type(&self, row: &ScreenRow) -> bool {
        if self.equity_needle.is_empty() {
            return true;
        }
        row.equity_type
            .as_deref()
            .is_some_and(|et| et.to_uppercase().contains(&self.equity_needle))
    }

    fn pass_bounds(&self, row: &ScreenRow) -> bool {
        self.cfg.bounds.iter().all(|(metric, bound)| {
            row.metrics
                .get(metric)
                .is_some_and(|value| bound.contains(*value))
        })
    }

    /// Directional signal threshold. A row whose direction field is missing
    /// or unrecognized passes this rule rather than being rejected, to
    /// avoid over-filtering ambiguous upstream data.
    fn pass_zap(&self, row: &ScreenRow) -> bool {
        let magnitude = match self.cfg.zap.mode {
            ZapMode::Off => return true,
            ZapMode::Zap => row.zap,
            ZapMode::Sigma => row.sigma,
        };
        let Some(direction) = row.direction else {
            return true;
        };
        let threshold = self.cfg.zap.effective_threshold();
        match magnitude {
            Some(value) if direction.is_up() => value >= threshold,
            Some(value) => value <= -threshold,
            None => false,
        }
    }
}

fn pass_dimension(enabled: bool, selected: &HashSet<String>, field: Option<&str>) -> bool {
    if !enabled || selected.is_empty() {
        return true;
    }
    field.is_some_and(|value| selected.contains(&value.trim().to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::config::{
        Bound, ExcludeFlags, IncludeFlags, ListFilter, MultiSelect, ZapFilter,
    };
    use crate::row::{ScreenRow, Side};
    use smol_str::SmolStr;

    fn row(ticker: &str) -> ScreenRow {
        ScreenRow {
            ticker: SmolStr::new(ticker),
            ..ScreenRow::default()
        }
    }

    fn tickers(rows: &[ScreenRow]) -> Vec<&str> {
        rows.iter().map(|r| r.ticker.as_str()).collect()
    }

    #[test]
    fn test_default_config_is_identity_in_order() {
        let rows = vec![row("MSFT"), row("AAPL"), row("TSLA")];
        let out = apply_filters(rows.clone(), &FilterConfig::default());
        assert_eq!(out, rows);
    }

    #[test]
    fn test_list_modes() {
        struct TestCase {
            lists: ListFilter,
            expected: Vec<&'static str>,
        }

        let tests = vec![
            TestCase {
                // TC0: ignore rejects listed tickers
                lists: ListFilter {
                    mode: ListMode::Ignore,
                    ignore: vec!["aapl".to_string()],
                    ..ListFilter::default()
                },
                expected: vec!["MSFT"],
            },
            TestCase {
                // TC1: apply keeps only listed tickers, case-insensitive
                lists: ListFilter {
                    mode: ListMode::Apply,
                    apply: vec!["aapl".to_string()],
                    ..ListFilter::default()
                },
                expected: vec!["AAPL"],
            },
            TestCase {
                // TC2: apply with an empty set is a no-op
                lists: ListFilter {
                    mode: ListMode::Apply,
                    ..ListFilter::default()
                },
                expected: vec!["AAPL", "MSFT"],
            },
            TestCase {
                // TC3: pin behaves like apply against the pinned set
                lists: ListFilter {
                    mode: ListMode::Pin,
                    pinned: vec!["MSFT".to_string()],
                    ..ListFilter::default()
                },
                expected: vec!["MSFT"],
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let cfg = FilterConfig {
                lists: test.lists,
                ..FilterConfig::default()
            };
            let out = apply_filters(vec![row("AAPL"), row("MSFT")], &cfg);
            assert_eq!(tickers(&out), test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_activity_modes() {
        let mut active = row("AAPL");
        active.position_bp = 12.5;
        let inactive = row("MSFT");

        let cfg = FilterConfig {
            activity: ActivityMode::OnlyActive,
            ..FilterConfig::default()
        };
        let out = apply_filters(vec![active.clone(), inactive.clone()], &cfg);
        assert_eq!(tickers(&out), vec!["AAPL"]);

        let cfg = FilterConfig {
            activity: ActivityMode::OnlyInactive,
            ..FilterConfig::default()
        };
        let out = apply_filters(vec![active, inactive], &cfg);
        assert_eq!(tickers(&out), vec!["MSFT"]);
    }

    #[test]
    fn test_include_flags() {
        let mut usa = row("AAPL");
        usa.country = Some("usa".to_string());
        let mut hk = row("BABA");
        hk.country = Some("Hong Kong".to_string());
        let no_country = row("ZZZZ");

        let cfg = FilterConfig {
            include: IncludeFlags {
                usa_only: true,
                china_only: false,
            },
            ..FilterConfig::default()
        };
        let out = apply_filters(vec![usa.clone(), hk.clone(), no_country.clone()], &cfg);
        assert_eq!(tickers(&out), vec!["AAPL"]);

        let cfg = FilterConfig {
            include: IncludeFlags {
                usa_only: false,
                china_only: true,
            },
            ..FilterConfig::default()
        };
        let out = apply_filters(vec![usa, hk, no_country], &cfg);
        assert_eq!(tickers(&out), vec!["BABA"]);
    }

    #[test]
    fn test_multi_select_disabled_is_noop() {
        let mut nyse = row("IBM");
        nyse.exchange = Some("NYSE".to_string());
        let mut nasdaq = row("AAPL");
        nasdaq.exchange = Some("nasdaq".to_string());

        let mut cfg = FilterConfig::default();
        cfg.multi.exchanges = MultiSelect {
            enabled: false,
            values: vec!["NASDAQ".to_string()],
        };
        let out = apply_filters(vec![nyse.clone(), nasdaq.clone()], &cfg);
        assert_eq!(out.len(), 2);

        cfg.multi.exchanges.enabled = true;
        let out = apply_filters(vec![nyse, nasdaq], &cfg);
        assert_eq!(tickers(&out), vec!["AAPL"]);
    }

    #[test]
    fn test_multi_select_missing_field_rejected() {
        let mut cfg = FilterConfig::default();
        cfg.multi.sectors = MultiSelect::selected(["Energy"]);
        let out = apply_filters(vec![row("XOM")], &cfg);
        assert!(out.is_empty());
    }

    #[test]
    fn test_exclude_flags() {
        let mut etf = row("SPY");
        etf.is_etf = true;
        let mut cheap = row("PENY");
        cheap.last_close = Some(3.2);
        let mut newsy = row("NWSY");
        newsy.news_count = 2;
        let plain = row("AAPL");

        let cfg = FilterConfig {
            exclude: ExcludeFlags {
                etf: true,
                price_under_5: true,
                news: true,
                ..ExcludeFlags::default()
            },
            ..FilterConfig::default()
        };
        let out = apply_filters(vec![etf, cheap, newsy, plain], &cfg);
        assert_eq!(tickers(&out), vec!["AAPL"]);
    }

    #[test]
    fn test_exclude_price_missing_close_not_rejected() {
        let cfg = FilterConfig {
            exclude: ExcludeFlags {
                price_under_5: true,
                ..ExcludeFlags::default()
            },
            ..FilterConfig::default()
        };
        // No last close at all: the under-5 condition cannot hold
        let out = apply_filters(vec![row("AAPL")], &cfg);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_report_tri_state() {
        let mut reported = row("AAPL");
        reported.has_report = true;
        let silent = row("MSFT");

        for (mode, expected) in [
            (ReportMode::All, vec!["AAPL", "MSFT"]),
            (ReportMode::Yes, vec!["AAPL"]),
            (ReportMode::No, vec!["MSFT"]),
        ] {
            let cfg = FilterConfig {
                report: mode,
                ..FilterConfig::default()
            };
            let out = apply_filters(vec![reported.clone(), silent.clone()], &cfg);
            assert_eq!(tickers(&out), expected, "mode {:?}", mode);
        }
    }

    #[test]
    fn test_equity_type_substring() {
        let mut common = row("AAPL");
        common.equity_type = Some("Common Stock".to_string());
        let mut adr = row("BABA");
        adr.equity_type = Some("ADR".to_string());
        let untyped = row("ZZZZ");

        let cfg = FilterConfig {
            equity_type: "common".to_string(),
            ..FilterConfig::default()
        };
        let out = apply_filters(vec![common, adr, untyped], &cfg);
        assert_eq!(tickers(&out), vec!["AAPL"]);
    }

    #[test]
    fn test_bounds_inclusive_and_missing_metric_fails() {
        let mut in_range = row("AAPL");
        in_range.metrics.insert("gapPct".to_string(), 1.0);
        let mut below = row("MSFT");
        below.metrics.insert("gapPct".to_string(), 0.0);
        let missing = row("TSLA");

        let mut cfg = FilterConfig::default();
        cfg.bounds.insert("gapPct".to_string(), Bound::min(1.0));

        let out = apply_filters(vec![in_range, below, missing], &cfg);
        // Exactly-at-min retained; below-min and missing-metric rejected
        assert_eq!(tickers(&out), vec!["AAPL"]);
    }

    #[test]
    fn test_zap_rule_directional() {
        let mut long_strong = row("AAPL");
        long_strong.direction = Some(Side::Up);
        long_strong.zap = Some(0.5);
        let mut long_weak = row("MSFT");
        long_weak.direction = Some(Side::Up);
        long_weak.zap = Some(0.2);
        let mut short_strong = row("TSLA");
        short_strong.direction = Some(Side::Down);
        short_strong.zap = Some(-0.4);
        let mut short_wrong_sign = row("NVDA");
        short_wrong_sign.direction = Some(Side::Down);
        short_wrong_sign.zap = Some(0.4);

        let cfg = FilterConfig {
            zap: ZapFilter {
                mode: ZapMode::Zap,
                threshold_abs: 0.3,
            },
            ..FilterConfig::default()
        };
        let out = apply_filters(
            vec![long_strong, long_weak, short_strong, short_wrong_sign],
            &cfg,
        );
        assert_eq!(tickers(&out), vec!["AAPL", "TSLA"]);
    }

    #[test]
    fn test_zap_threshold_clamped_to_floor() {
        let mut long = row("AAPL");
        long.direction = Some(Side::Up);
        long.zap = Some(0.2);

        // Configured 0.1 is below the 0.3 floor, so zap=0.2 must be rejected
        let cfg = FilterConfig {
            zap: ZapFilter {
                mode: ZapMode::Zap,
                threshold_abs: 0.1,
            },
            ..FilterConfig::default()
        };
        assert!(apply_filters(vec![long], &cfg).is_empty());
    }

    #[test]
    fn test_zap_unrecognized_direction_passes() {
        let mut undirected = row("AAPL");
        undirected.zap = Some(0.0);

        let cfg = FilterConfig {
            zap: ZapFilter {
                mode: ZapMode::Zap,
                threshold_abs: 0.3,
            },
            ..FilterConfig::default()
        };
        let out = apply_filters(vec![undirected], &cfg);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_zap_missing_magnitude_with_direction_rejected() {
        let mut long = row("AAPL");
        long.direction = Some(Side::Up);
        long.zap = None;

        let cfg = FilterConfig {
            zap: ZapFilter {
                mode: ZapMode::Zap,
                threshold_abs: 0.3,
            },
            ..FilterConfig::default()
        };
        assert!(apply_filters(vec![long], &cfg).is_empty());
    }

    #[test]
    fn test_sigma_mode_uses_sigma_field_and_floor() {
        let mut long = row("AAPL");
        long.direction = Some(Side::Up);
        long.sigma = Some(0.06);
        long.zap = Some(0.0);

        let cfg = FilterConfig {
            zap: ZapFilter {
                mode: ZapMode::Sigma,
                threshold_abs: 0.01,
            },
            ..FilterConfig::default()
        };
        // Floor for sigma is 0.05, sigma=0.06 passes even though zap would not
        let out = apply_filters(vec![long], &cfg);
        assert_eq!(out.len(), 1);
    }
}
