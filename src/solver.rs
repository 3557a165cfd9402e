use crate::card::*;
use crate::config::*;
use crate::error::*;
use crate::evaluation::*;
use crate::exhaustive::*;
use crate::hand::*;
use crate::interface::*;
use crate::monte_carlo::*;
use crate::result::*;
use crate::utility::*;
use log::debug;
use std::fmt;

/// Calculation strategy chosen by [`select_strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Exhaustive,
    MonteCarlo,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Exhaustive => write!(f, "exhaustive"),
            Strategy::MonteCarlo => write!(f, "Monte Carlo"),
        }
    }
}

/// Returns the number of distinct scenarios completing every hand and the board.
///
/// The count is the product, over incomplete hands and then the board, of `C(remaining, missing)`
/// where `remaining` shrinks as cards are assigned. It saturates at `u64::MAX`.
///
/// This is the exact number of scenarios, which is larger than `C(remaining, total missing)`
/// whenever more than one hand or the board is incomplete, since the same cards dealt to
/// different players form different scenarios.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let hands = ["AsKs", "QhJh"];
/// let setup = CardSetup::from_strs(Variant::TexasHoldem, &hands, "Ts9s2h", "").unwrap();
/// assert_eq!(estimate_combinations(&setup), 990);
///
/// let setup = CardSetup::from_strs(Variant::TexasHoldem, &["AsKs", ""], "", "").unwrap();
/// assert_eq!(estimate_combinations(&setup), 1_225 * 1_712_304);
/// ```
pub fn estimate_combinations(setup: &CardSetup) -> u64 {
    let mut remaining = 52usize.saturating_sub(setup.used_cards().len());
    let mut count = 1u64;

    let missing_holes = (0..setup.num_players()).map(|player| setup.missing_hole_cards(player));
    for missing in missing_holes.chain([setup.missing_board_cards()]) {
        if missing == 0 {
            continue;
        }
        count = count.saturating_mul(binomial(remaining, missing));
        remaining = remaining.saturating_sub(missing);
    }

    count
}

/// Chooses exhaustive enumeration when it is forced or fits under the combination ceiling.
pub fn select_strategy(setup: &CardSetup, options: &CalculationOptions) -> Strategy {
    let estimate = estimate_combinations(setup);
    let strategy = if options.force_exhaustive || estimate <= options.max_exhaustive_combinations {
        Strategy::Exhaustive
    } else {
        Strategy::MonteCarlo
    };

    debug!(
        "Selected {} calculation: {} combinations (maximum {}, forced: {})",
        strategy, estimate, options.max_exhaustive_combinations, options.force_exhaustive
    );

    strategy
}

/// Computes the equity of every hand, choosing the calculation strategy automatically.
///
/// The configuration is validated before any calculator is built.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let hands = ["AsKs", "QhJh"];
/// let setup = CardSetup::from_strs(Variant::TexasHoldem, &hands, "Ts9s2h", "").unwrap();
/// let result = calculate_equity(&setup, &CalculationOptions::default()).unwrap();
///
/// assert!(result.is_exact);
/// assert!((result.equities().iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
pub fn calculate_equity(
    setup: &CardSetup,
    options: &CalculationOptions,
) -> Result<EquityResult, EquityError> {
    setup.validate()?;

    match select_strategy(setup, options) {
        Strategy::Exhaustive => {
            ExhaustiveCalculator::new(setup.clone(), options.clone())?.calculate()
        }
        Strategy::MonteCarlo => {
            MonteCarloCalculator::new(setup.clone(), options.clone())?.calculate()
        }
    }
}

/// Evaluates the best hand of `hand` on `board`.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let hand = "AsAh".parse::<Hand>().unwrap();
/// let board = "AdKsKh2c3d".parse::<Board>().unwrap();
/// let evaluated = evaluate_hand(Variant::TexasHoldem, &hand, &board).unwrap();
///
/// assert_eq!(evaluated.category, HandCategory::FullHouse);
/// assert_eq!(evaluated.description(), "Full House, Aces over Kings");
/// ```
#[inline]
pub fn evaluate_hand(
    variant: Variant,
    hand: &Hand,
    board: &Board,
) -> Result<EvaluatedHand, EquityError> {
    evaluate(variant, hand.cards(), board.cards())
}

/// Per-run buffers holding the complete hands and board of the current scenario.
///
/// Every scenario is rebuilt from the known cards of the configuration, which itself is never
/// modified.
pub(crate) struct Scenario {
    holes: Vec<Vec<Card>>,
    board: Vec<Card>,
    evaluated: Vec<EvaluatedHand>,
}

impl Scenario {
    pub(crate) fn new(setup: &CardSetup) -> Self {
        let holes = setup
            .hands
            .iter()
            .map(|hand| {
                let mut hole = Vec::with_capacity(setup.variant.max_hole_cards());
                hole.extend_from_slice(hand.cards());
                hole
            })
            .collect();

        let mut board = Vec::with_capacity(BOARD_SIZE);
        board.extend_from_slice(setup.board.cards());

        Self {
            holes,
            board,
            evaluated: Vec::with_capacity(setup.num_players()),
        }
    }

    /// Replaces the unknown hole cards of `player` with `cards`.
    #[inline]
    pub(crate) fn complete_hole(&mut self, setup: &CardSetup, player: usize, cards: &[Card]) {
        let hole = &mut self.holes[player];
        hole.truncate(setup.hands[player].len());
        hole.extend_from_slice(cards);
    }

    /// Replaces the unknown board cards with `cards`.
    #[inline]
    pub(crate) fn complete_board(&mut self, setup: &CardSetup, cards: &[Card]) {
        self.board.truncate(setup.board.len());
        self.board.extend_from_slice(cards);
    }

    /// Evaluates every hand of the scenario and records the outcome.
    pub(crate) fn record(
        &mut self,
        variant: Variant,
        tally: &mut Tally,
    ) -> Result<(), EquityError> {
        self.evaluated.clear();
        for hole in &self.holes {
            let hand = evaluate(variant, hole, &self.board)?;
            self.evaluated.push(hand);
        }

        tally.record(&self.evaluated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdem(hands: &[&str], board: &str) -> CardSetup {
        CardSetup::from_strs(Variant::TexasHoldem, hands, board, "").unwrap()
    }

    #[test]
    fn test_estimate_complete() {
        let setup = holdem(&["AsKs", "QhJh"], "Ts9s2h8c7s");
        assert_eq!(estimate_combinations(&setup), 1);
    }

    #[test]
    fn test_estimate_board_only() {
        assert_eq!(estimate_combinations(&holdem(&["AsKs", "QhJh"], "")), 1_712_304);
        assert_eq!(estimate_combinations(&holdem(&["AsKs", "QhJh"], "Ts9s2h8c")), 44);
    }

    #[test]
    fn test_estimate_with_dead_cards() {
        let hands = ["AsKs", "QhJh"];
        let setup = CardSetup::from_strs(Variant::TexasHoldem, &hands, "Ts9s2h", "3c4c").unwrap();
        assert_eq!(estimate_combinations(&setup), binomial(43, 2));
    }

    #[test]
    fn test_estimate_omaha_incomplete() {
        let setup =
            CardSetup::from_strs(Variant::Omaha, &["AsKsQsJs", "2c3c"], "2d3d4d5d", "").unwrap();
        // 52 - 10 = 42 remaining: two hole cards, then one board card
        assert_eq!(estimate_combinations(&setup), binomial(42, 2) * 40);
    }

    #[test]
    fn test_estimate_saturates() {
        let hands = ["", "", "", "", "", "", "", "", "", ""];
        let setup = CardSetup::from_strs(Variant::Omaha, &hands, "", "").unwrap();
        assert_eq!(estimate_combinations(&setup), u64::MAX);
    }

    #[test]
    fn test_select_strategy() {
        let options = CalculationOptions::default();
        let turn = holdem(&["AsKs", "QhJh"], "Ts9s2h8c");
        let preflop = holdem(&["AsKs", "QhJh"], "");

        assert_eq!(select_strategy(&turn, &options), Strategy::Exhaustive);
        assert_eq!(select_strategy(&preflop, &options), Strategy::MonteCarlo);

        let forced = options.clone().with_force_exhaustive(true);
        assert_eq!(select_strategy(&preflop, &forced), Strategy::Exhaustive);

        let tight = options.with_max_exhaustive_combinations(43);
        assert_eq!(select_strategy(&turn, &tight), Strategy::MonteCarlo);
    }

    #[test]
    fn test_calculate_equity_not_enough_hands() {
        let setup = CardSetup {
            hands: vec!["AsKs".parse().unwrap()],
            ..Default::default()
        };
        let result = calculate_equity(&setup, &CalculationOptions::default());
        assert_eq!(result, Err(EquityError::NotEnoughHands(1)));
    }

    #[test]
    fn test_calculate_equity_monte_carlo() {
        let setup = holdem(&["AsKs", "QhJh"], "");
        let options = CalculationOptions::default()
            .with_iterations(2_000)
            .with_seed(1);
        let result = calculate_equity(&setup, &options).unwrap();
        assert!(!result.is_exact);
        assert_eq!(result.scenarios, 2_000);
    }

    #[test]
    fn test_evaluate_hand() {
        let hand = "7c2d".parse::<Hand>().unwrap();
        let board = "AsKsQsJsTs".parse::<Board>().unwrap();
        let evaluated = evaluate_hand(Variant::TexasHoldem, &hand, &board).unwrap();
        assert_eq!(evaluated.category, HandCategory::RoyalFlush);

        let short = "AsKs".parse::<Board>().unwrap();
        assert_eq!(
            evaluate_hand(Variant::TexasHoldem, &hand, &short),
            Err(EquityError::InsufficientCards(4))
        );
    }
}
