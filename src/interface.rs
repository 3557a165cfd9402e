use crate::error::*;
use crate::result::*;

/// The trait representing an equity calculation strategy.
///
/// A calculator owns its card configuration and scratch state. `calculate()` takes `&mut self`,
/// so one instance can never run two calculations at the same time.
pub trait EquityCalculator {
    /// Runs the calculation.
    fn calculate(&mut self) -> Result<EquityResult, EquityError>;

    /// Returns whether the calculator enumerates every scenario.
    fn is_exact(&self) -> bool;
}
