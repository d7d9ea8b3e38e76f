//! Anomaly decision trait definition.

use crate::error::Result;
use crate::model::{Decision, DecisionMode};

/// A detection policy producing a tagged [`Decision`].
///
/// Policies differ in what they consume (aggregated tensor cells or tabular
/// records) but share the boolean-flag contract exposed by
/// [`Decision::flags`].
pub trait AnomalyDecision: Send + Sync {
    /// What the policy inspects.
    type Input: ?Sized;

    /// Which variant of [`Decision`] this policy produces.
    fn mode(&self) -> DecisionMode;

    /// Decide which entries of the input are anomalous.
    fn decide(&self, input: &Self::Input) -> Result<Decision>;
}
