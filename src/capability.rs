// 🧩 Capability Interface - Uniform fit/predict shape for analytics
// Any numeric backend can be swapped without touching pipeline orchestration

use crate::error::Result;
use crate::table::Table;

/// Capability - A two-phase analytic add-on over the categorized table.
///
/// `fit` learns a model from the table; `predict` applies it to an input.
/// Implemented by the trend forecaster, the anomaly flagger, and the
/// category suggester. Both phases may report `InsufficientData` instead
/// of guessing.
pub trait Capability {
    /// Fitted state produced by `fit`
    type Model;

    /// What `predict` is asked about
    type Input;

    /// What `predict` answers with
    type Output;

    /// Short name for display and logs
    fn name(&self) -> &'static str;

    fn fit(&self, table: &Table) -> Result<Self::Model>;

    fn predict(&self, model: &Self::Model, input: Self::Input) -> Result<Self::Output>;
}
