// 📊 Table Model - The in-session transaction table
// Owned by the session, passed by reference to every capability

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::categorizer::Category;

// ============================================================================
// TRANSACTION
// ============================================================================

/// Transaction - One cleaned row: a dated, described, signed amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Normalized calendar date (always present post-clean)
    pub date: NaiveDate,

    /// Signed amount: negative = spending, positive = income
    pub amount: f64,

    /// Free-text description from the source file
    pub description: String,

    /// Category label (None until the categorizer runs)
    pub category: Option<Category>,

    /// Any additional input columns, keyed by header name.
    /// Preserved verbatim so exports keep every original field.
    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: f64, description: impl Into<String>) -> Self {
        Transaction {
            date,
            amount,
            description: description.into(),
            category: None,
            extra: BTreeMap::new(),
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Table - Cleaned transactions plus the original column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Input column headers in source order (drives export layout)
    pub columns: Vec<String>,

    pub transactions: Vec<Transaction>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All signed amounts, in row order
    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.transactions.iter().map(|tx| tx.amount)
    }
}

// ============================================================================
// TESTS
// ============================================================================
