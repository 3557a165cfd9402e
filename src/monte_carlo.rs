use crate::config::*;
use crate::deck::*;
use crate::error::*;
use crate::hand::*;
use crate::interface::*;
use crate::result::*;
use crate::solver::*;
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::time::Instant;

/// Number of iterations between two progress reports and convergence checks.
const BATCH_SIZE: u64 = 1000;

/// Number of past batch snapshots compared against the running equities.
const CONVERGENCE_WINDOW: usize = 10;

/// Approximate equity calculator sampling random completions of the hands and the board.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let setup = CardSetup::from_strs(Variant::TexasHoldem, &["AsAh", "7c2d"], "", "").unwrap();
/// let options = CalculationOptions::default().with_iterations(5_000).with_seed(42);
/// let mut calculator = MonteCarloCalculator::new(setup, options).unwrap();
/// let result = calculator.calculate().unwrap();
///
/// assert!(!result.is_exact);
/// assert_eq!(result.scenarios, 5_000);
/// assert!(result.players[0].equity > 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloCalculator {
    setup: CardSetup,
    options: CalculationOptions,
    rng: SmallRng,
}

impl MonteCarloCalculator {
    /// Creates a calculator after validating the card configuration and the iteration count.
    pub fn new(setup: CardSetup, options: CalculationOptions) -> Result<Self, EquityError> {
        setup.validate()?;
        if options.iterations == 0 {
            return Err(EquityError::InvalidIterations(0));
        }

        let rng = match options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Ok(Self {
            setup,
            options,
            rng,
        })
    }

    /// Returns the card configuration.
    #[inline]
    pub fn setup(&self) -> &CardSetup {
        &self.setup
    }

    /// Deals one random scenario from `deck` and records its outcome.
    fn sample(
        &mut self,
        deck: &mut Deck,
        scenario: &mut Scenario,
        tally: &mut Tally,
    ) -> Result<(), EquityError> {
        deck.shuffle(&mut self.rng);

        for player in 0..self.setup.num_players() {
            let cards = deck.deal(self.setup.missing_hole_cards(player));
            scenario.complete_hole(&self.setup, player, &cards);
        }

        let cards = deck.deal(self.setup.missing_board_cards());
        scenario.complete_board(&self.setup, &cards);

        scenario.record(self.setup.variant, tally)
    }
}

/// Early-stopping rule over the running equities of the last batches.
#[derive(Debug, Clone)]
struct Convergence {
    threshold: Option<f64>,
    window: VecDeque<Vec<f64>>,
    num_batches: usize,
}

impl Convergence {
    fn new(threshold: Option<f64>) -> Self {
        Self {
            threshold,
            window: VecDeque::with_capacity(CONVERGENCE_WINDOW),
            num_batches: 0,
        }
    }

    /// Records the running equities after a batch and returns whether sampling can stop.
    ///
    /// From the 10th batch on, `equities` is compared against the snapshots of the previous
    /// batches (at most 10). It joins the window only if sampling goes on.
    fn update(&mut self, equities: Vec<f64>) -> bool {
        self.num_batches += 1;

        if let Some(threshold) = self.threshold {
            if self.num_batches >= CONVERGENCE_WINDOW && self.is_stable(&equities, threshold) {
                return true;
            }
        }

        if self.window.len() == CONVERGENCE_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(equities);
        false
    }

    fn is_stable(&self, equities: &[f64], threshold: f64) -> bool {
        self.window.iter().all(|snapshot| {
            snapshot
                .iter()
                .zip(equities)
                .all(|(previous, current)| (previous - current).abs() < threshold)
        })
    }
}

impl EquityCalculator for MonteCarloCalculator {
    fn calculate(&mut self) -> Result<EquityResult, EquityError> {
        let start = Instant::now();
        let iterations = self.options.iterations;

        debug!(
            "Monte Carlo calculation: {} players, {} iterations",
            self.setup.num_players(),
            iterations
        );

        let base_deck = Deck::without_mask(self.setup.used_mask());
        let mut deck = base_deck.clone();
        let mut scenario = Scenario::new(&self.setup);
        let mut tally = Tally::new(self.setup.num_players());

        let mut convergence = Convergence::new(self.options.accuracy_threshold);
        let mut num_batches = 0;

        while tally.scenarios() < iterations {
            let batch = BATCH_SIZE.min(iterations - tally.scenarios());
            for _ in 0..batch {
                deck.clone_from(&base_deck);
                self.sample(&mut deck, &mut scenario, &mut tally)?;
            }
            num_batches += 1;

            self.options
                .report_progress(tally.scenarios() as f64 / iterations as f64);

            let equities = tally.equities();
            trace!(
                "Batch {}: {} iterations, equities {:?}",
                num_batches,
                tally.scenarios(),
                equities
            );

            if convergence.update(equities) {
                debug!(
                    "Monte Carlo converged after {} iterations (threshold {:?})",
                    tally.scenarios(),
                    self.options.accuracy_threshold
                );
                break;
            }
        }

        debug!(
            "Monte Carlo calculation finished: {} iterations in {:?}",
            tally.scenarios(),
            start.elapsed()
        );

        Ok(tally.finish(start.elapsed(), false))
    }

    #[inline]
    fn is_exact(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhaustive::*;
    use std::sync::{Arc, Mutex};

    fn holdem(hands: &[&str], board: &str) -> CardSetup {
        CardSetup::from_strs(Variant::TexasHoldem, hands, board, "").unwrap()
    }

    fn run(setup: CardSetup, options: CalculationOptions) -> Result<EquityResult, EquityError> {
        MonteCarloCalculator::new(setup, options)?.calculate()
    }

    #[test]
    fn test_zero_iterations() {
        let setup = holdem(&["AsKs", "QhJh"], "");
        let options = CalculationOptions::default().with_iterations(0);
        assert_eq!(
            MonteCarloCalculator::new(setup, options).map(|_| ()),
            Err(EquityError::InvalidIterations(0))
        );
    }

    #[test]
    fn test_runs_all_iterations() {
        let setup = holdem(&["AsKs", "QhJh"], "");
        let options = CalculationOptions::default()
            .with_iterations(2_500)
            .with_seed(3);
        let result = run(setup, options).unwrap();

        assert_eq!(result.scenarios, 2_500);
        assert!(!result.is_exact);
        let sum = result.equities().iter().sum::<f64>();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let setup = holdem(&["AsKs", "", "7d7c"], "Jc");
        let options = CalculationOptions::default()
            .with_iterations(3_000)
            .with_seed(11);
        let first = run(setup.clone(), options.clone()).unwrap();
        let second = run(setup, options).unwrap();
        assert_eq!(first.equities(), second.equities());
        assert_eq!(first.players[1].wins, second.players[1].wins);
    }

    #[test]
    fn test_close_to_exhaustive() {
        let setup = holdem(&["AsKs", "QhJh"], "Ts9s2h");
        let exact = ExhaustiveCalculator::new(setup.clone(), CalculationOptions::default())
            .unwrap()
            .calculate()
            .unwrap();
        let options = CalculationOptions::default()
            .with_iterations(20_000)
            .with_seed(5);
        let approx = run(setup, options).unwrap();

        for (e, a) in exact.equities().iter().zip(approx.equities()) {
            assert!((e - a).abs() < 0.02, "exact {e}, approx {a}");
        }
    }

    #[test]
    fn test_convergence_stops_early() {
        let setup = holdem(&["AsKs", "QhJh"], "Ts9s2h");
        let options = CalculationOptions::default()
            .with_iterations(100_000)
            .with_accuracy_threshold(1.0)
            .with_seed(9);
        let result = run(setup, options).unwrap();
        assert_eq!(result.scenarios, CONVERGENCE_WINDOW as u64 * BATCH_SIZE);
    }

    #[test]
    fn test_convergence_compares_previous_snapshots() {
        let mut convergence = Convergence::new(Some(0.05));

        // the first snapshot stays out of range until it leaves the window
        assert!(!convergence.update(vec![0.5, 0.5]));
        for _ in 2..=11 {
            assert!(!convergence.update(vec![0.6, 0.4]));
        }
        assert!(convergence.update(vec![0.6, 0.4]));
    }

    #[test]
    fn test_convergence_needs_ten_batches() {
        let mut convergence = Convergence::new(Some(0.05));
        for _ in 1..10 {
            assert!(!convergence.update(vec![0.5, 0.5]));
        }
        assert!(convergence.update(vec![0.5, 0.5]));

        let mut disabled = Convergence::new(None);
        for _ in 0..30 {
            assert!(!disabled.update(vec![0.5, 0.5]));
        }
    }

    #[test]
    fn test_convergence_continues_while_drifting() {
        // a drift of 0.01 per batch keeps the oldest snapshot 0.09 or more away
        let mut convergence = Convergence::new(Some(0.085));
        for batch in 1..=40 {
            let equity = 0.2 + 0.01 * batch as f64;
            assert!(!convergence.update(vec![equity, 1.0 - equity]));
        }
    }

    #[test]
    fn test_progress_per_batch() {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reports);
        let options = CalculationOptions::default()
            .with_iterations(4_500)
            .with_seed(2)
            .with_progress(move |fraction| sink.lock().unwrap().push(fraction));

        run(holdem(&["AsKs", "QhJh"], ""), options).unwrap();

        let reports = reports.lock().unwrap();
        let expected = [1000.0, 2000.0, 3000.0, 4000.0, 4500.0].map(|done| done / 4500.0);
        assert_eq!(reports.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_omaha_incomplete_hands() {
        let setup =
            CardSetup::from_strs(Variant::Omaha, &["AsAhKsKh", "9c8c"], "Qs", "").unwrap();
        let options = CalculationOptions::default()
            .with_iterations(2_000)
            .with_seed(4);
        let result = run(setup, options).unwrap();
        assert_eq!(result.scenarios, 2_000);

        let distribution = result.players[1].hand_counts.values().sum::<u64>();
        assert_eq!(distribution, 2_000);
    }
}
