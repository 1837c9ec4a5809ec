// 📉 Trend Forecaster - Least-squares fit over monthly totals
// Projects next month's total from a month-index → monthly-sum regression

use serde::Serialize;
use std::collections::BTreeMap;

use crate::capability::Capability;
use crate::error::{Error, Result};
use crate::table::Table;

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One calendar month of the fitted series, for charting
#[derive(Debug, Clone, Serialize)]
pub struct MonthPoint {
    /// "YYYY-MM" label
    pub month: String,

    /// Observed monthly total
    pub actual: f64,

    /// Value of the fitted line at this month's index
    pub fitted: f64,
}

/// Forecast - Next month's projection plus the full series behind it
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    /// Predicted total for the month after the last observed one
    pub predicted: f64,

    /// Actual and fitted values per observed month, chronological
    pub points: Vec<MonthPoint>,
}

// ============================================================================
// TREND MODEL
// ============================================================================

/// Fitted single-variable regression: index 0..N-1 → monthly sum
#[derive(Debug, Clone)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,

    /// Distinct (year, month) keys, chronological
    pub months: Vec<(i32, u32)>,

    /// Observed sum per month, same order as `months`
    pub actuals: Vec<f64>,
}

impl TrendModel {
    /// Value of the fitted line at a month index
    pub fn value_at(&self, index: usize) -> f64 {
        self.slope * index as f64 + self.intercept
    }
}

// ============================================================================
// FORECASTER
// ============================================================================

pub struct TrendForecaster;

impl Capability for TrendForecaster {
    type Model = TrendModel;
    type Input = usize;
    type Output = f64;

    fn name(&self) -> &'static str {
        "trend-forecaster"
    }

    /// Group amounts by calendar month and fit a least-squares line.
    /// Fewer than two distinct months → `InsufficientData`, never a fit.
    fn fit(&self, table: &Table) -> Result<TrendModel> {
        use chrono::Datelike;

        // BTreeMap keeps (year, month) keys chronological
        let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for tx in &table.transactions {
            let key = (tx.date.year(), tx.date.month());
            *monthly.entry(key).or_insert(0.0) += tx.amount;
        }

        if monthly.len() < 2 {
            return Err(Error::InsufficientData(format!(
                "forecast needs at least 2 distinct months, found {}",
                monthly.len()
            )));
        }

        let months: Vec<(i32, u32)> = monthly.keys().copied().collect();
        let actuals: Vec<f64> = monthly.values().copied().collect();

        let (slope, intercept) = least_squares(&actuals);

        Ok(TrendModel {
            slope,
            intercept,
            months,
            actuals,
        })
    }

    fn predict(&self, model: &TrendModel, index: usize) -> Result<f64> {
        Ok(model.value_at(index))
    }
}

/// Ordinary least squares over (0..n-1, y). Caller guarantees n >= 2.
fn least_squares(y: &[f64]) -> (f64, f64) {
    let n = y.len() as f64;
    let sum_x: f64 = (0..y.len()).map(|i| i as f64).sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = y.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
    let sum_xx: f64 = (0..y.len()).map(|i| (i * i) as f64).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    (slope, intercept)
}

/// Fit the table and project the month after the last observed one.
pub fn forecast_next_month(table: &Table) -> Result<Forecast> {
    let forecaster = TrendForecaster;
    let model = forecaster.fit(table)?;
    let predicted = forecaster.predict(&model, model.months.len())?;

    let points = model
        .months
        .iter()
        .zip(model.actuals.iter())
        .enumerate()
        .map(|(i, (&(year, month), &actual))| MonthPoint {
            month: format!("{year:04}-{month:02}"),
            actual,
            fitted: model.value_at(i),
        })
        .collect();

    Ok(Forecast { predicted, points })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Transaction;
    use chrono::NaiveDate;

    fn tx(year: i32, month: u32, day: u32, amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            amount,
            "x",
        )
    }

    fn table(transactions: Vec<Transaction>) -> Table {
        Table {
            columns: vec![],
            transactions,
        }
    }

    #[test]
    fn test_single_month_is_insufficient_data() {
        let t = table(vec![tx(2024, 1, 3, -10.0), tx(2024, 1, 20, -20.0)]);
        match forecast_next_month(&t).unwrap_err() {
            Error::InsufficientData(msg) => assert!(msg.contains("2 distinct months")),
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_linear_series_projects_exactly() {
        // Monthly sums 100, 200, 300 -> next month 400
        let t = table(vec![
            tx(2024, 1, 5, 100.0),
            tx(2024, 2, 5, 200.0),
            tx(2024, 3, 5, 300.0),
        ]);
        let forecast = forecast_next_month(&t).unwrap();
        assert!((forecast.predicted - 400.0).abs() < 1e-9);
        assert_eq!(forecast.points.len(), 3);
        assert_eq!(forecast.points[0].month, "2024-01");
        assert!((forecast.points[2].fitted - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_amounts_within_a_month_are_summed() {
        let t = table(vec![
            tx(2024, 1, 5, 60.0),
            tx(2024, 1, 20, 40.0),
            tx(2024, 2, 5, 200.0),
        ]);
        let forecast = forecast_next_month(&t).unwrap();
        assert!((forecast.points[0].actual - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_months_ordered_chronologically_across_years() {
        let t = table(vec![
            tx(2024, 1, 5, 200.0),
            tx(2023, 12, 5, 100.0),
            tx(2024, 2, 5, 300.0),
        ]);
        let forecast = forecast_next_month(&t).unwrap();
        let labels: Vec<&str> = forecast.points.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(labels, vec!["2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_flat_series_projects_flat() {
        let t = table(vec![tx(2024, 1, 5, 100.0), tx(2024, 2, 5, 100.0)]);
        let forecast = forecast_next_month(&t).unwrap();
        assert!((forecast.predicted - 100.0).abs() < 1e-9);
    }
}
