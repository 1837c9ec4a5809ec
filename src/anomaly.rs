// 🚨 Anomaly Flagger - Z-score outliers over transaction amounts
// Zero variance means no anomalies; no row can crash the computation

use chrono::NaiveDate;
use serde::Serialize;

use crate::capability::Capability;
use crate::error::{Error, Result};
use crate::table::Table;

/// Default |z| threshold for flagging
pub const DEFAULT_THRESHOLD: f64 = 2.0;

// ============================================================================
// TYPES
// ============================================================================

/// Population mean and standard deviation of the amounts
#[derive(Debug, Clone, Copy)]
pub struct AmountStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl AmountStats {
    /// Z-score of one amount. Zero variance yields 0.0 rather than NaN,
    /// so an all-identical table flags nothing.
    pub fn z_score(&self, amount: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (amount - self.mean) / self.std_dev
        }
    }
}

/// One flagged transaction
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    /// Row index in the table
    pub index: usize,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub z_score: f64,
}

// ============================================================================
// FLAGGER
// ============================================================================

pub struct AnomalyFlagger {
    /// Rows with |z| at or beyond this are flagged
    pub threshold: f64,
}

impl AnomalyFlagger {
    pub fn new() -> Self {
        AnomalyFlagger {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        AnomalyFlagger { threshold }
    }
}

impl Default for AnomalyFlagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Capability for AnomalyFlagger {
    type Model = AmountStats;
    type Input = f64;
    type Output = f64;

    fn name(&self) -> &'static str {
        "anomaly-flagger"
    }

    /// Population statistics over all amounts
    fn fit(&self, table: &Table) -> Result<AmountStats> {
        if table.is_empty() {
            return Err(Error::InsufficientData(
                "no transactions to fit amount statistics".to_string(),
            ));
        }

        let n = table.len() as f64;
        let mean = table.amounts().sum::<f64>() / n;
        let variance = table
            .amounts()
            .map(|a| (a - mean) * (a - mean))
            .sum::<f64>()
            / n;

        Ok(AmountStats {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    fn predict(&self, model: &AmountStats, amount: f64) -> Result<f64> {
        Ok(model.z_score(amount))
    }
}

/// Flag every transaction whose |z| reaches the default threshold.
/// An empty table flags nothing.
pub fn flag_anomalies(table: &Table) -> Result<Vec<Anomaly>> {
    flag_anomalies_with(table, &AnomalyFlagger::new())
}

pub fn flag_anomalies_with(table: &Table, flagger: &AnomalyFlagger) -> Result<Vec<Anomaly>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let stats = flagger.fit(table)?;

    let mut anomalies = Vec::new();
    for (index, tx) in table.transactions.iter().enumerate() {
        let z = stats.z_score(tx.amount);
        if z.abs() >= flagger.threshold {
            anomalies.push(Anomaly {
                index,
                date: tx.date,
                description: tx.description.clone(),
                amount: tx.amount,
                z_score: z,
            });
        }
    }

    Ok(anomalies)
}

// ============================================================================
// TESTS
// ============================================================================
