// 🗂️ Session - Explicit per-upload state, no globals
// Created on upload, replaced by opening a new one, dropped on end.
// Every capability entry point hangs off the session's table.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::advisor::advise;
use crate::anomaly::{flag_anomalies, Anomaly};
use crate::categorizer::{categorize_table, Category, RuleSet};
use crate::cleaner::clean;
use crate::error::Result;
use crate::export::export_to_file;
use crate::forecast::{forecast_next_month, Forecast};
use crate::loader::load_table;
use crate::report::{summarize, SummaryReport};
use crate::suggest::suggest_category;
use crate::table::Table;

/// Session - One loaded, cleaned, categorized table with a stable identity
#[derive(Debug, Clone)]
pub struct Session {
    /// Stable identity for this upload
    pub id: Uuid,

    pub created_at: DateTime<Utc>,

    /// File the table was loaded from
    pub source: PathBuf,

    /// The in-session table. Capabilities read it; nothing mutates it
    /// after categorization.
    pub table: Table,
}

impl Session {
    /// Pipeline entry point: load → clean → categorize, with the default
    /// keyword rules. Fails with `UnsupportedFormat` for unrecognized
    /// extensions and `MissingColumn` for a structurally bad header.
    pub fn open(path: &Path) -> Result<Session> {
        Session::open_with_rules(path, &RuleSet::default())
    }

    pub fn open_with_rules(path: &Path, rules: &RuleSet) -> Result<Session> {
        let raw = load_table(path)?;
        let mut table = clean(&raw)?;
        categorize_table(&mut table, rules);

        Ok(Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: path.to_path_buf(),
            table,
        })
    }

    /// Reporting entry point: summary mapping, mean, optional savings ratio
    pub fn summary(&self) -> Result<SummaryReport> {
        summarize(&self.table)
    }

    /// Next-month projection over monthly totals
    pub fn forecast(&self) -> Result<Forecast> {
        forecast_next_month(&self.table)
    }

    /// Transactions whose amount is a statistical outlier
    pub fn anomalies(&self) -> Result<Vec<Anomaly>> {
        flag_anomalies(&self.table)
    }

    /// Rule-based savings tip
    pub fn advice(&self) -> &'static str {
        advise(&self.table)
    }

    /// Naive-Bayes category suggestion for a novel description
    pub fn suggest(&self, description: &str) -> Result<Category> {
        suggest_category(&self.table, description)
    }

    /// Write the categorized table back to CSV
    pub fn export(&self, path: &Path) -> Result<()> {
        export_to_file(&self.table, path)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    fn sample_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Date,Amount,Description").unwrap();
        writeln!(file, "2024-01-05,-42.5,grocery run").unwrap();
        writeln!(file, "2024-01-05,-42.5,grocery run").unwrap();
        writeln!(file, "2024-01-20,-12,uber trip").unwrap();
        writeln!(file, "2024-02-01,1500,salary deposit").unwrap();
        writeln!(file, ",-5,orphan row").unwrap();
        file
    }

    #[test]
    fn test_open_runs_full_pipeline() {
        let file = sample_file();
        let session = Session::open(file.path()).unwrap();

        // 5 input rows: 1 duplicate and 1 missing-date row dropped
        assert_eq!(session.len(), 3);
        // Every surviving row is labeled
        assert!(session
            .table
            .transactions
            .iter()
            .all(|tx| tx.category.is_some()));
    }

    #[test]
    fn test_open_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        match Session::open(file.path()).unwrap_err() {
            Error::UnsupportedFormat(ext) => assert_eq!(ext, "parquet"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_each_upload_gets_a_fresh_identity() {
        let file = sample_file();
        let first = Session::open(file.path()).unwrap();
        let second = Session::open(file.path()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_capabilities_run_off_one_session() {
        let file = sample_file();
        let session = Session::open(file.path()).unwrap();

        let summary = session.summary().unwrap();
        assert!(summary.total_for(Category::Income).is_some());

        // Two distinct months present, so the forecast fits
        assert!(session.forecast().is_ok());
        assert!(session.anomalies().is_ok());
        assert!(!session.advice().is_empty());
    }
}
