use crate::card::*;
use crate::config::*;
use crate::deck::*;
use crate::error::*;
use crate::hand::*;
use crate::interface::*;
use crate::result::*;
use crate::solver::*;
use crate::utility::*;
use log::debug;
use std::time::Instant;

/// Number of scenarios between two progress reports.
const PROGRESS_INTERVAL: u64 = 1000;

/// Exact equity calculator enumerating every completion of the hands and the board.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let setup =
///     CardSetup::from_strs(Variant::TexasHoldem, &["AsKs", "QhJh"], "Ts9s2h", "").unwrap();
/// let mut calculator = ExhaustiveCalculator::new(setup, CalculationOptions::default()).unwrap();
/// let result = calculator.calculate().unwrap();
///
/// assert!(result.is_exact);
/// assert_eq!(result.scenarios, 990);
/// assert!(result.players[0].equity > 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveCalculator {
    setup: CardSetup,
    options: CalculationOptions,
}

/// Where the cards of a completion go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Hand(usize),
    Board,
}

/// All candidate completions of one incomplete hand or of the board.
///
/// Candidates are stored flat: candidate `i` occupies `cards[i * size..(i + 1) * size]`.
#[derive(Debug)]
struct Dimension {
    slot: Slot,
    size: usize,
    cards: Vec<Card>,
    masks: Vec<u64>,
}

impl Dimension {
    fn new(slot: Slot, deck: &Deck, size: usize) -> Self {
        let count = binomial(deck.len(), size) as usize;
        let mut cards = Vec::with_capacity(count * size);
        let mut masks = Vec::with_capacity(count);

        let mut subset = Vec::with_capacity(size);
        let mut iter = combinations(deck.cards(), size);
        while iter.next_into(&mut subset) {
            cards.extend_from_slice(&subset);
            masks.push(cards_mask(&subset));
        }

        Self {
            slot,
            size,
            cards,
            masks,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.masks.len()
    }

    #[inline]
    fn candidate(&self, index: usize) -> &[Card] {
        &self.cards[index * self.size..(index + 1) * self.size]
    }
}

impl ExhaustiveCalculator {
    /// Creates a calculator after validating the card configuration.
    pub fn new(setup: CardSetup, options: CalculationOptions) -> Result<Self, EquityError> {
        setup.validate()?;
        Ok(Self { setup, options })
    }

    /// Returns the card configuration.
    #[inline]
    pub fn setup(&self) -> &CardSetup {
        &self.setup
    }

    fn dimensions(&self, deck: &Deck) -> Vec<Dimension> {
        let mut dimensions = (0..self.setup.num_players())
            .filter_map(|player| {
                let missing = self.setup.missing_hole_cards(player);
                (missing > 0).then(|| Dimension::new(Slot::Hand(player), deck, missing))
            })
            .collect::<Vec<_>>();

        let missing = self.setup.missing_board_cards();
        if missing > 0 {
            dimensions.push(Dimension::new(Slot::Board, deck, missing));
        }

        dimensions
    }

    /// Builds the scenario selected by `positions`, evaluates every player and records the outcome.
    fn evaluate_scenario(
        &self,
        dimensions: &[Dimension],
        positions: &[usize],
        scenario: &mut Scenario,
        tally: &mut Tally,
    ) -> Result<(), EquityError> {
        for (dimension, &position) in dimensions.iter().zip(positions) {
            let cards = dimension.candidate(position);
            match dimension.slot {
                Slot::Hand(player) => scenario.complete_hole(&self.setup, player, cards),
                Slot::Board => scenario.complete_board(&self.setup, cards),
            }
        }

        scenario.record(self.setup.variant, tally)
    }
}

impl EquityCalculator for ExhaustiveCalculator {
    fn calculate(&mut self) -> Result<EquityResult, EquityError> {
        let start = Instant::now();

        let estimate = estimate_combinations(&self.setup);
        let max = self.options.max_exhaustive_combinations;
        if estimate > max && !self.options.force_exhaustive {
            return Err(EquityError::CombinationOverflow {
                count: estimate,
                max,
            });
        }

        debug!(
            "Exhaustive calculation: {} players, {} scenarios",
            self.setup.num_players(),
            estimate
        );

        let deck = Deck::without_mask(self.setup.used_mask());
        let dimensions = self.dimensions(&deck);

        let mut scenario = Scenario::new(&self.setup);
        let mut tally = Tally::new(self.setup.num_players());

        if dimensions.is_empty() {
            self.evaluate_scenario(&dimensions, &[], &mut scenario, &mut tally)?;
            return Ok(tally.finish(start.elapsed(), true));
        }

        // iterative backtracking: `used[d]` is the mask of cards taken by dimensions `0..d`
        let depth_max = dimensions.len();
        let mut positions = vec![0usize; depth_max];
        let mut used = vec![0u64; depth_max + 1];
        let mut depth = 0;

        loop {
            let dimension = &dimensions[depth];
            let mut position = positions[depth];
            while position < dimension.len() && dimension.masks[position] & used[depth] != 0 {
                position += 1;
            }
            positions[depth] = position;

            if position == dimension.len() {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                positions[depth] += 1;
                continue;
            }

            used[depth + 1] = used[depth] | dimension.masks[position];

            if depth + 1 < depth_max {
                depth += 1;
                positions[depth] = 0;
                continue;
            }

            self.evaluate_scenario(&dimensions, &positions, &mut scenario, &mut tally)?;
            positions[depth] += 1;

            if tally.scenarios() % PROGRESS_INTERVAL == 0 {
                self.options
                    .report_progress(tally.scenarios() as f64 / estimate as f64);
            }
        }

        debug!(
            "Exhaustive calculation finished: {} scenarios in {:?}",
            tally.scenarios(),
            start.elapsed()
        );

        Ok(tally.finish(start.elapsed(), true))
    }

    #[inline]
    fn is_exact(&self) -> bool {
        true
    }
}
