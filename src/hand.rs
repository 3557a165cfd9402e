use crate::card::*;
use crate::error::*;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Number of community cards on a complete board.
pub const BOARD_SIZE: usize = 5;

/// Poker variant, which determines the number of hole cards and how a hand is formed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub enum Variant {
    /// Two hole cards; any five of the seven cards form the hand.
    #[default]
    TexasHoldem,

    /// Four hole cards; exactly two hole cards and three board cards form the hand.
    Omaha,
}

impl Variant {
    /// Returns the number of hole cards of a complete hand.
    #[inline]
    pub fn max_hole_cards(self) -> usize {
        match self {
            Variant::TexasHoldem => 2,
            Variant::Omaha => 4,
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "holdem" | "hold'em" | "texas-holdem" | "texasholdem" | "nlhe" => {
                Ok(Variant::TexasHoldem)
            }
            "omaha" | "plo" => Ok(Variant::Omaha),
            _ => Err(format!("Unknown variant: {s}")),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::TexasHoldem => write!(f, "Texas Hold'em"),
            Variant::Omaha => write!(f, "Omaha"),
        }
    }
}

/// Hole cards of one player, possibly incomplete.
///
/// The size limit depends on the variant and is checked by [`CardSetup::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a hand from the given cards.
    #[inline]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Returns the cards of the hand in input order.
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

/// Community cards shared by all players, possibly incomplete.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let board = "Ts9s2h".parse::<Board>().unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.missing_cards(), 2);
///
/// assert!("2c3c4c5c6c7c".parse::<Board>().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Creates a board from the given cards.
    ///
    /// Fails if more than five cards are given.
    #[inline]
    pub fn new(cards: Vec<Card>) -> Result<Self, EquityError> {
        if cards.len() > BOARD_SIZE {
            return Err(EquityError::TooManyBoardCards(cards.len()));
        }
        Ok(Self { cards })
    }

    /// Returns the cards of the board in input order.
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Returns the number of cards still to be dealt.
    #[inline]
    pub fn missing_cards(&self) -> usize {
        BOARD_SIZE.saturating_sub(self.cards.len())
    }
}

impl FromStr for Hand {
    type Err = EquityError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(cards_from_str(s)?))
    }
}

impl FromStr for Board {
    type Err = EquityError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(cards_from_str(s)?)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", cards_to_string(&self.cards))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", cards_to_string(&self.cards))
    }
}

/// A struct containing the card configuration of an equity calculation.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let setup = CardSetup {
///     variant: Variant::TexasHoldem,
///     hands: vec!["AsKs".parse().unwrap(), "QhJh".parse().unwrap()],
///     board: "Ts9s2h".parse().unwrap(),
///     dead_cards: cards_from_str("2c").unwrap(),
/// };
///
/// assert!(setup.validate().is_ok());
/// assert_eq!(setup.missing_board_cards(), 2);
/// assert_eq!(setup.used_cards().len(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct CardSetup {
    /// Poker variant.
    pub variant: Variant,

    /// Hole cards of each player, in player order.
    pub hands: Vec<Hand>,

    /// Community cards.
    pub board: Board,

    /// Cards known to be unavailable but not assigned to any player or the board.
    pub dead_cards: Vec<Card>,
}

impl CardSetup {
    /// Creates a validated card configuration.
    pub fn new(
        variant: Variant,
        hands: Vec<Hand>,
        board: Board,
        dead_cards: Vec<Card>,
    ) -> Result<Self, EquityError> {
        let setup = Self {
            variant,
            hands,
            board,
            dead_cards,
        };
        setup.validate()?;
        Ok(setup)
    }

    /// Parses and validates a card configuration from card strings.
    ///
    /// # Examples
    /// ```
    /// use poker_equity::*;
    ///
    /// let setup = CardSetup::from_strs(Variant::Omaha, &["AsKsQsJs", ""], "2c3d", "9h").unwrap();
    /// assert_eq!(setup.missing_hole_cards(1), 4);
    /// assert_eq!(setup.dead_cards.len(), 1);
    /// ```
    pub fn from_strs(
        variant: Variant,
        hands: &[&str],
        board: &str,
        dead_cards: &str,
    ) -> Result<Self, EquityError> {
        let hands = hands
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<Hand>, _>>()?;
        Self::new(variant, hands, board.parse()?, cards_from_str(dead_cards)?)
    }

    /// Checks the composition of the configuration.
    ///
    /// Fails if fewer than two hands are given, if a hand or the board holds too many cards, if
    /// any card appears more than once among hands, board and dead cards, or if the deck cannot
    /// complete every hand and the board.
    pub fn validate(&self) -> Result<(), EquityError> {
        if self.hands.len() < 2 {
            return Err(EquityError::NotEnoughHands(self.hands.len()));
        }

        if self.board.len() > BOARD_SIZE {
            return Err(EquityError::TooManyBoardCards(self.board.len()));
        }

        let max = self.variant.max_hole_cards();
        for (player, hand) in self.hands.iter().enumerate() {
            if hand.len() > max {
                return Err(EquityError::TooManyHoleCards {
                    player,
                    count: hand.len(),
                    max,
                });
            }
        }

        let mut mask = 0u64;
        for card in self.used_cards() {
            if mask & card.mask() != 0 {
                return Err(EquityError::DuplicateCard(card));
            }
            mask |= card.mask();
        }

        let needed = self.missing_cards();
        let available = 52 - mask.count_ones() as usize;
        if needed > available {
            return Err(EquityError::NotEnoughCards { needed, available });
        }

        Ok(())
    }

    /// Returns the number of players.
    #[inline]
    pub fn num_players(&self) -> usize {
        self.hands.len()
    }

    /// Returns all cards that are unavailable for dealing: hole cards, board and dead cards.
    pub fn used_cards(&self) -> Vec<Card> {
        self.hands
            .iter()
            .flat_map(|hand| hand.cards().iter())
            .chain(self.board.cards())
            .chain(&self.dead_cards)
            .copied()
            .collect()
    }

    /// Returns the bit mask of [`used_cards`](Self::used_cards).
    #[inline]
    pub fn used_mask(&self) -> u64 {
        cards_mask(&self.used_cards())
    }

    /// Returns the number of hole cards missing from the hand of `player`.
    #[inline]
    pub fn missing_hole_cards(&self, player: usize) -> usize {
        self.variant
            .max_hole_cards()
            .saturating_sub(self.hands[player].len())
    }

    /// Returns the number of board cards still to be dealt.
    #[inline]
    pub fn missing_board_cards(&self) -> usize {
        self.board.missing_cards()
    }

    /// Returns the total number of cards to deal to complete every hand and the board.
    #[inline]
    pub fn missing_cards(&self) -> usize {
        (0..self.num_players())
            .map(|player| self.missing_hole_cards(player))
            .sum::<usize>()
            + self.missing_board_cards()
    }

    /// Returns whether every hand and the board are complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.missing_board_cards() == 0
            && (0..self.num_players()).all(|player| self.missing_hole_cards(player) == 0)
    }
}
