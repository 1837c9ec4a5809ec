// Spendscope - Personal finance analysis pipeline
// Exposes all modules for use in the CLI and tests

pub mod advisor;
pub mod anomaly;
pub mod capability;
pub mod categorizer;
pub mod cleaner;
pub mod error;
pub mod export;
pub mod forecast;
pub mod loader;
pub mod report;
pub mod session;
pub mod suggest;
pub mod table;

// Re-export commonly used types
pub use advisor::advise;
pub use anomaly::{flag_anomalies, Anomaly, AnomalyFlagger};
pub use capability::Capability;
pub use categorizer::{categorize_table, Category, CategoryRule, RuleSet};
pub use cleaner::clean;
pub use error::{Error, Result};
pub use export::{export_to_file, write_csv};
pub use forecast::{forecast_next_month, Forecast, MonthPoint, TrendForecaster};
pub use loader::{detect_format, load_table, RawTable, SourceFormat};
pub use report::{summarize, SummaryReport};
pub use session::Session;
pub use suggest::{suggest_category, CategorySuggester};
pub use table::{Table, Transaction};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
