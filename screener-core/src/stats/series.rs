//! Cumulative daily performance series.

use crate::row::TradeRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Daily-aggregated outcomes with a running cumulative sum, aligned to the
/// ascending date sequence. Dates are integer keys (YYYYMMDD); calendar
/// gaps are not filled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CumulativeSeries {
    #[serde(rename = "datesNy")]
    pub dates: Vec<i64>,
    #[serde(rename = "dailySum")]
    pub daily_sum: Vec<f64>,
    pub cumsum: Vec<f64>,
}

/// Aggregate outcomes by date and build the running cumulative sum.
pub fn cumulative_series(rows: &[TradeRow]) -> CumulativeSeries {
    let mut by_date: BTreeMap<i64, f64> = BTreeMap::new();
    for row in rows {
        *by_date.entry(row.date_key).or_insert(0.0) += row.outcome;
    }

    let mut series = CumulativeSeries::default();
    let mut running = 0.0;
    for (date, sum) in by_date {
        running += sum;
        series.dates.push(date);
        series.daily_sum.push(sum);
        series.cumsum.push(running);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(cumulative_series(&[]), CumulativeSeries::default());
    }

    #[test]
    fn test_same_date_outcomes_are_summed() {
        let rows = vec![
            TradeRow::new(20250103, "AAPL", 1.0),
            TradeRow::new(20250103, "MSFT", 0.5),
            TradeRow::new(20250106, "AAPL", -2.0),
        ];
        let series = cumulative_series(&rows);
        assert_eq!(series.dates, vec![20250103, 20250106]);
        assert_eq!(series.daily_sum, vec![1.5, -2.0]);
        assert_eq!(series.cumsum, vec![1.5, -0.5]);
    }

    #[test]
    fn test_dates_sorted_regardless_of_input_order() {
        let rows = vec![
            TradeRow::new(20250110, "AAPL", 2.0),
            TradeRow::new(20250102, "AAPL", 1.0),
            TradeRow::new(20250107, "AAPL", -1.0),
        ];
        let series = cumulative_series(&rows);
        assert_eq!(series.dates, vec![20250102, 20250107, 20250110]);
        assert_eq!(series.cumsum, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(cumulative_series(&[TradeRow::new(
            20250102, "AAPL", 1.0,
        )]))
        .unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("datesNy"));
        assert!(obj.contains_key("dailySum"));
        assert!(obj.contains_key("cumsum"));
    }
}
