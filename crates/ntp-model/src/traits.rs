//! Core traits for model policies.

use std::fmt::Debug;

/// Axial heat-deposition shape for the reactor core.
///
/// A shape only has to give relative weights; the profile generator
/// renormalises them so the deposited power sums to the requested total.
/// Shapes are pure functions of position, suitable for sharing across
/// concurrent runs.
pub trait PowerShape: Debug + Send + Sync {
    /// Shape name for logs and result records.
    fn name(&self) -> &str;

    /// Relative deposition weight at normalised axial position `xi`.
    ///
    /// # Arguments
    /// * `xi` - Position divided by core length, in `[0, 1]` (0 = core inlet)
    ///
    /// # Returns
    /// A finite, non-negative weight. The generator rejects anything else.
    fn weight(&self, xi: f64) -> f64;
}
