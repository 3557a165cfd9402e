use std::fmt;
use std::sync::Arc;

/// Default number of Monte Carlo iterations.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Default ceiling on the number of scenarios of an exhaustive calculation.
pub const DEFAULT_MAX_EXHAUSTIVE_COMBINATIONS: u64 = 25_000;

/// Callback receiving the fraction of work completed, in `[0.0, 1.0]`.
///
/// It is invoked synchronously between batches (Monte Carlo) or every 1000 scenarios
/// (exhaustive), zero or more times, and is not guaranteed to receive exactly `1.0`.
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Options of an equity calculation.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let options = CalculationOptions::default()
///     .with_iterations(50_000)
///     .with_accuracy_threshold(0.001)
///     .with_seed(7);
///
/// assert_eq!(options.iterations, 50_000);
/// assert_eq!(options.max_exhaustive_combinations, 25_000);
/// assert!(!options.force_exhaustive);
/// ```
#[derive(Clone)]
pub struct CalculationOptions {
    /// Maximum number of Monte Carlo iterations.
    pub iterations: u64,

    /// Whether to enumerate exhaustively regardless of the number of scenarios.
    pub force_exhaustive: bool,

    /// Ceiling on the number of scenarios enumerated without `force_exhaustive`.
    pub max_exhaustive_combinations: u64,

    /// Enables early stopping of Monte Carlo sampling once every player's equity moves less than
    /// this amount over the last 10 batches.
    pub accuracy_threshold: Option<f64>,

    /// Seed of the Monte Carlo random number generator. `None` seeds it from the operating system.
    pub seed: Option<u64>,

    /// Optional progress sink.
    pub progress: Option<ProgressCallback>,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            force_exhaustive: false,
            max_exhaustive_combinations: DEFAULT_MAX_EXHAUSTIVE_COMBINATIONS,
            accuracy_threshold: None,
            seed: None,
            progress: None,
        }
    }
}

impl CalculationOptions {
    #[inline]
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    #[inline]
    pub fn with_force_exhaustive(mut self, force_exhaustive: bool) -> Self {
        self.force_exhaustive = force_exhaustive;
        self
    }

    #[inline]
    pub fn with_max_exhaustive_combinations(mut self, max: u64) -> Self {
        self.max_exhaustive_combinations = max;
        self
    }

    #[inline]
    pub fn with_accuracy_threshold(mut self, threshold: f64) -> Self {
        self.accuracy_threshold = Some(threshold);
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress sink.
    #[inline]
    pub fn with_progress<F: Fn(f64) + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Reports `fraction` to the progress sink, if any.
    #[inline]
    pub(crate) fn report_progress(&self, fraction: f64) {
        if let Some(progress) = &self.progress {
            progress(fraction.clamp(0.0, 1.0));
        }
    }
}

impl fmt::Debug for CalculationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculationOptions")
            .field("iterations", &self.iterations)
            .field("force_exhaustive", &self.force_exhaustive)
            .field(
                "max_exhaustive_combinations",
                &self.max_exhaustive_combinations,
            )
            .field("accuracy_threshold", &self.accuracy_threshold)
            .field("seed", &self.seed)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}
