// 📤 Export - Categorized table back to CSV
// Same columns in, one Category column added; values survive a reload

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::table::Table;

/// Header name of the added label column
pub const CATEGORY_COLUMN: &str = "Category";

/// Write the table as CSV: every original column in input order, plus a
/// trailing `Category` column (unless the input already had one, in which
/// case the label is written into that column).
///
/// Dates serialize as `%Y-%m-%d`, amounts via `f64` Display so a reload
/// parses back to the same value.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut out_columns = table.columns.clone();
    if !out_columns.iter().any(|c| c == CATEGORY_COLUMN) {
        out_columns.push(CATEGORY_COLUMN.to_string());
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&out_columns)?;

    for tx in &table.transactions {
        let record: Vec<String> = out_columns
            .iter()
            .map(|column| match column.as_str() {
                "Date" => tx.date.format("%Y-%m-%d").to_string(),
                "Amount" => tx.amount.to_string(),
                "Description" => tx.description.clone(),
                CATEGORY_COLUMN => tx
                    .category
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_default(),
                other => tx.extra.get(other).cloned().unwrap_or_default(),
            })
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the table to a CSV file at `path`
pub fn export_to_file(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)
}

// ============================================================================
// TESTS
// ============================================================================
