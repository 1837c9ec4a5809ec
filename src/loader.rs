// 📂 Loader - Tabular file ingestion (CSV / XLSX)
// No schema validation here: cells stay raw strings, the cleaner sorts them out

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

use crate::error::{Error, Result};

// ============================================================================
// SOURCE FORMAT
// ============================================================================

/// SourceFormat - Which tabular format a file claims to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SourceFormat::Csv => "CSV",
            SourceFormat::Xlsx => "Excel (XLSX)",
        }
    }
}

/// Detect format from the file extension (case-insensitive).
///
/// Unrecognized extensions fail with `UnsupportedFormat` naming the
/// extension, so the caller can surface exactly what was rejected.
pub fn detect_format(path: &Path) -> Result<SourceFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(SourceFormat::Csv),
        "xlsx" => Ok(SourceFormat::Xlsx),
        _ => Err(Error::UnsupportedFormat(ext)),
    }
}

// ============================================================================
// RAW TABLE
// ============================================================================

/// RawTable - Parsed file before any cleaning
///
/// Every cell is kept as the raw string from the source. Rows may be
/// ragged, empty, or garbage; downstream cleaning handles all of that.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column headers in input order
    pub columns: Vec<String>,

    /// One Vec<String> per data row, cells in column order
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a tabular file, dispatching on its extension.
pub fn load_table(path: &Path) -> Result<RawTable> {
    match detect_format(path)? {
        SourceFormat::Csv => load_csv(path),
        SourceFormat::Xlsx => load_xlsx(path),
    }
}

/// Load a CSV file. First record is the header.
///
/// Cells are whitespace-trimmed, matching the XLSX loader. Short rows are
/// padded with empty cells to the header width; rows carrying more cells
/// than the header are truncated to it (the trailing cells have no column
/// name to live under).
pub fn load_csv(path: &Path) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
        // Pad short rows, truncate overlong ones: one cell per column
        cells.resize(columns.len(), String::new());
        rows.push(cells);
    }

    Ok(RawTable { columns, rows })
}

/// Load the first worksheet of an XLSX workbook. First row is the header.
pub fn load_xlsx(path: &Path) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            return Ok(RawTable {
                columns: Vec::new(),
                rows: Vec::new(),
            })
        }
    };

    let mut iter = range.rows();

    let columns: Vec<String> = match iter.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for row in iter {
        let mut cells: Vec<String> = row.iter().map(cell_to_string).collect();
        cells.resize(columns.len(), String::new());
        rows.push(cells);
    }

    Ok(RawTable { columns, rows })
}

/// Render a spreadsheet cell as the string the cleaner will parse.
/// Empty cells become "" so the missing-field filter catches them.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        other => other.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_format_csv() {
        assert_eq!(
            detect_format(Path::new("transactions.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            detect_format(Path::new("Transactions.CSV")).unwrap(),
            SourceFormat::Csv
        );
    }

    #[test]
    fn test_detect_format_xlsx() {
        assert_eq!(
            detect_format(Path::new("book.xlsx")).unwrap(),
            SourceFormat::Xlsx
        );
    }

    #[test]
    fn test_detect_format_rejects_unknown_extension() {
        let err = detect_format(Path::new("statement.pdf")).unwrap_err();
        match err {
            Error::UnsupportedFormat(ext) => assert_eq!(ext, "pdf"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_detect_format_rejects_no_extension() {
        assert!(detect_format(Path::new("statement")).is_err());
    }

    #[test]
    fn test_load_csv_reads_headers_and_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Date,Amount,Description").unwrap();
        writeln!(file, "2024-01-05,-42.50,grocery run").unwrap();
        writeln!(file, "2024-01-06,1500,salary").unwrap();

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.columns, vec!["Date", "Amount", "Description"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2], "grocery run");
        assert_eq!(table.column_index("Amount"), Some(1));
    }

    #[test]
    fn test_load_csv_pads_ragged_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Date,Amount,Description").unwrap();
        writeln!(file, "2024-01-05,-42.50").unwrap();

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], "");
    }

    #[test]
    fn test_load_csv_truncates_overlong_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Date,Amount,Description").unwrap();
        writeln!(file, "2024-01-05,-42.50,grocery run,stray cell").unwrap();

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], "grocery run");
    }

    #[test]
    fn test_load_csv_trims_cell_whitespace() {
        // Same treatment as XLSX string cells, so extra-column values
        // round-trip identically from either format
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Date,Amount,Description,Account").unwrap();
        writeln!(file, "2024-01-05, -42.50 ,  grocery run , checking ").unwrap();

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.rows[0][1], "-42.50");
        assert_eq!(table.rows[0][2], "grocery run");
        assert_eq!(table.rows[0][3], "checking");
    }
}
