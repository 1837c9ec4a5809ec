// 📈 Summary Report - Group-by-category totals, mean, savings ratio
// The aggregator: consumes the categorized table read-only

use serde::Serialize;
use std::collections::HashMap;

use crate::categorizer::Category;
use crate::error::{Error, Result};
use crate::table::Table;

// ============================================================================
// SUMMARY REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Signed sum of Amount per category, only for categories present
    pub totals: HashMap<Category, f64>,

    /// Arithmetic mean of Amount across all rows
    pub mean: f64,

    /// Income total / |Food total|. None unless both categories are
    /// present and the Food total is nonzero. "Not available" is not
    /// an error.
    pub savings_ratio: Option<f64>,
}

impl SummaryReport {
    pub fn total_for(&self, category: Category) -> Option<f64> {
        self.totals.get(&category).copied()
    }

    /// Totals sorted by |sum| descending, for display
    pub fn sorted_totals(&self) -> Vec<(Category, f64)> {
        let mut entries: Vec<(Category, f64)> =
            self.totals.iter().map(|(c, s)| (*c, *s)).collect();
        entries.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Summarize a categorized table.
///
/// An empty table reports `InsufficientData` instead of dividing by zero
/// for the mean. Rows without a label count toward the mean but toward no
/// category total.
pub fn summarize(table: &Table) -> Result<SummaryReport> {
    if table.is_empty() {
        return Err(Error::InsufficientData(
            "no transactions to summarize".to_string(),
        ));
    }

    let mut totals: HashMap<Category, f64> = HashMap::new();
    let mut sum = 0.0;

    for tx in &table.transactions {
        sum += tx.amount;
        if let Some(category) = tx.category {
            *totals.entry(category).or_insert(0.0) += tx.amount;
        }
    }

    let mean = sum / table.len() as f64;

    let savings_ratio = match (
        totals.get(&Category::Income),
        totals.get(&Category::Food),
    ) {
        (Some(income), Some(food)) if *food != 0.0 => Some(income / food.abs()),
        _ => None,
    };

    Ok(SummaryReport {
        totals,
        mean,
        savings_ratio,
    })
}

// ============================================================================
// TESTS
// ============================================================================
