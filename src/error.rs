use crate::card::Card;
use thiserror::Error;

/// Errors returned by parsing, validation, evaluation and equity calculation.
///
/// Every variant carries the offending value so that the caller can correct the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquityError {
    /// A rank character other than `2`-`9`, `T`, `J`, `Q`, `K`, `A`.
    #[error("Invalid rank character: {0:?}")]
    InvalidRank(char),

    /// A suit character other than `s`, `h`, `d`, `c`.
    #[error("Invalid suit character: {0:?}")]
    InvalidSuit(char),

    /// A card string whose length is not a multiple of two.
    #[error("Card string must consist of two-character tokens: {0:?}")]
    OddLength(String),

    /// A string expected to hold a single card holds none or several.
    #[error("Expected exactly one card, got {0:?}")]
    ExpectedOneCard(String),

    /// The same card appears twice among hands, board and dead cards.
    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),

    /// A hand holds more cards than the variant allows.
    #[error("Player {player} has {count} hole cards (maximum {max})")]
    TooManyHoleCards {
        player: usize,
        count: usize,
        max: usize,
    },

    /// Completing every hand and the board needs more cards than the deck holds.
    #[error("Not enough cards to deal: {needed} needed, {available} available")]
    NotEnoughCards { needed: usize, available: usize },

    /// The board holds more than five cards.
    #[error("Board has {0} cards (maximum 5)")]
    TooManyBoardCards(usize),

    /// Fewer than two hands were supplied.
    #[error("At least two hands are required, got {0}")]
    NotEnoughHands(usize),

    /// Fewer than five cards are available to build a hand.
    #[error("At least five cards are required to evaluate a hand, got {0}")]
    InsufficientCards(usize),

    /// An Omaha hand without exactly four hole cards.
    #[error("Omaha requires exactly 4 hole cards, got {0}")]
    OmahaHoleCards(usize),

    /// An Omaha evaluation with fewer than three board cards.
    #[error("Omaha requires at least 3 board cards, got {0}")]
    OmahaBoardCards(usize),

    /// A Monte Carlo run was requested with zero iterations.
    #[error("Number of iterations must be positive, got {0}")]
    InvalidIterations(u64),

    /// The exhaustive enumeration would visit more scenarios than allowed.
    #[error("Exhaustive calculation requires {count} combinations (maximum {max})")]
    CombinationOverflow { count: u64, max: u64 },
}
