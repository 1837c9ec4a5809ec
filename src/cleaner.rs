// 🧹 Cleaner - Missing-field filter, date normalization, exact dedup
// Row-level defects are filtered silently; only an absent column is an error

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

use crate::error::{Error, Result};
use crate::loader::RawTable;
use crate::table::{Table, Transaction};

/// Columns every input must carry. Anything else rides along in `extra`.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Amount", "Description"];

/// Date formats accepted, tried in order. First parse wins.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

// ============================================================================
// CLEANING
// ============================================================================

/// Clean a raw table into typed transactions.
///
/// In order: (1) drop rows with an empty Date/Amount/Description cell,
/// (2) normalize dates, coercing unparseable values to missing and dropping
/// those rows, (3) parse amounts the same way, (4) remove exact duplicate
/// rows (identical values across all columns, with dates and amounts
/// compared after normalization).
///
/// Never fails on a bad row. Fails only when a required column is missing
/// from the header entirely (`MissingColumn`).
pub fn clean(raw: &RawTable) -> Result<Table> {
    let date_idx = required_column(raw, REQUIRED_COLUMNS[0])?;
    let amount_idx = required_column(raw, REQUIRED_COLUMNS[1])?;
    let desc_idx = required_column(raw, REQUIRED_COLUMNS[2])?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut transactions = Vec::new();

    for cells in &raw.rows {
        // 1. Missing-field filter on the raw cells
        let date_raw = cells.get(date_idx).map(|s| s.trim()).unwrap_or("");
        let amount_raw = cells.get(amount_idx).map(|s| s.trim()).unwrap_or("");
        let desc_raw = cells.get(desc_idx).map(|s| s.trim()).unwrap_or("");

        if date_raw.is_empty() || amount_raw.is_empty() || desc_raw.is_empty() {
            continue;
        }

        // 2. Date normalization: unparseable coerces to missing, row dropped
        let date = match parse_date(date_raw) {
            Some(d) => d,
            None => continue,
        };

        // 3. Amount parsing: same treatment
        let amount = match parse_amount(amount_raw) {
            Some(a) => a,
            None => continue,
        };

        let mut extra = BTreeMap::new();
        for (i, column) in raw.columns.iter().enumerate() {
            if i == date_idx || i == amount_idx || i == desc_idx {
                continue;
            }
            extra.insert(
                column.clone(),
                cells.get(i).cloned().unwrap_or_default(),
            );
        }

        let mut tx = Transaction::new(date, amount, desc_raw);
        tx.extra = extra;

        // 4. Exact-duplicate filter over the normalized row
        if !seen.insert(row_hash(&tx)) {
            continue;
        }
        transactions.push(tx);
    }

    Ok(Table {
        columns: raw.columns.clone(),
        transactions,
    })
}

fn required_column(raw: &RawTable, name: &str) -> Result<usize> {
    raw.column_index(name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Try each accepted format in order
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Parse a signed amount, tolerating currency symbols and thousand separators
pub fn parse_amount(value: &str) -> Option<f64> {
    let normalized: String = value
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | ' '))
        .collect();
    normalized.parse::<f64>().ok()
}

/// Identity hash for exact-duplicate detection, computed over the
/// normalized row: parsed date and amount plus every remaining cell.
/// "2024/01/05" and "2024-01-05" hash the same once normalized, as do
/// "-20" and "-20.00". Separator byte keeps ("ab","c") distinct from
/// ("a","bc").
fn row_hash(tx: &Transaction) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tx.date.to_string().as_bytes());
    hasher.update([0x1f]);
    hasher.update(tx.amount.to_bits().to_le_bytes());
    hasher.update([0x1f]);
    hasher.update(tx.description.as_bytes());
    hasher.update([0x1f]);
    for (column, cell) in &tx.extra {
        hasher.update(column.as_bytes());
        hasher.update([0x1f]);
        hasher.update(cell.as_bytes());
        hasher.update([0x1f]);
    }
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// TESTS
// ============================================================================
