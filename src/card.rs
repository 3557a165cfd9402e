use crate::error::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Card rank. The discriminant is the rank strength (Ace high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds,
    Hearts,
    Spades,
}

/// A playing card.
///
/// Cards are ordered by rank first, then by suit (`c` < `d` < `h` < `s`).
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let card = card_from_str("As").unwrap();
/// assert_eq!(card.rank, Rank::Ace);
/// assert_eq!(card.suit, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Returns the numeric strength of the rank: `2` for a deuce, ..., `14` for an ace.
    #[inline]
    pub fn strength(self) -> u8 {
        self as u8
    }

    /// Returns the rank whose strength is `strength`, if any.
    #[inline]
    pub fn from_strength(strength: u8) -> Option<Rank> {
        match strength {
            2..=14 => Some(Self::ALL[strength as usize - 2]),
            _ => None,
        }
    }

    /// Returns the English name of the rank ("Ace", "Ten", ...).
    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// Returns the plural English name of the rank ("Aces", "Sixes", ...).
    pub fn plural(self) -> &'static str {
        match self {
            Rank::Two => "Twos",
            Rank::Three => "Threes",
            Rank::Four => "Fours",
            Rank::Five => "Fives",
            Rank::Six => "Sixes",
            Rank::Seven => "Sevens",
            Rank::Eight => "Eights",
            Rank::Nine => "Nines",
            Rank::Ten => "Tens",
            Rank::Jack => "Jacks",
            Rank::Queen => "Queens",
            Rank::King => "Kings",
            Rank::Ace => "Aces",
        }
    }
}

impl Suit {
    /// All suits in index order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

impl Card {
    /// Creates a card.
    #[inline]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Returns the dense index of the card.
    ///
    /// `"2c"` => `0`, `"2d"` => `1`, `"2h"` => `2`, `"2s"` => `3`, `"3c"` => `4`, ..., `"As"` => `51`.
    #[inline]
    pub fn index(self) -> u8 {
        ((self.rank as u8 - 2) << 2) | self.suit as u8
    }

    /// Returns the card whose dense index is `index`, if `index < 52`.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        if index < 52 {
            Some(Self {
                rank: Rank::ALL[(index >> 2) as usize],
                suit: Suit::ALL[(index & 3) as usize],
            })
        } else {
            None
        }
    }

    /// Returns the bit mask of the card (`1 << index`).
    #[inline]
    pub fn mask(self) -> u64 {
        1 << self.index()
    }
}

/// Returns the bit mask of the given cards.
#[inline]
pub fn cards_mask(cards: &[Card]) -> u64 {
    cards.iter().fold(0, |mask, card| mask | card.mask())
}

/// Attempts to convert a rank character to a rank.
///
/// Both upper and lower case are accepted.
#[inline]
fn char_to_rank(c: char) -> Result<Rank, EquityError> {
    match c {
        'A' | 'a' => Ok(Rank::Ace),
        'K' | 'k' => Ok(Rank::King),
        'Q' | 'q' => Ok(Rank::Queen),
        'J' | 'j' => Ok(Rank::Jack),
        'T' | 't' => Ok(Rank::Ten),
        '2'..='9' => Ok(Rank::ALL[(c as u8 - b'2') as usize]),
        _ => Err(EquityError::InvalidRank(c)),
    }
}

/// Attempts to convert a suit character to a suit.
///
/// Both upper and lower case are accepted.
#[inline]
fn char_to_suit(c: char) -> Result<Suit, EquityError> {
    match c {
        'c' | 'C' => Ok(Suit::Clubs),
        'd' | 'D' => Ok(Suit::Diamonds),
        'h' | 'H' => Ok(Suit::Hearts),
        's' | 'S' => Ok(Suit::Spades),
        _ => Err(EquityError::InvalidSuit(c)),
    }
}

#[inline]
fn rank_to_char(rank: Rank) -> char {
    match rank {
        Rank::Ace => 'A',
        Rank::King => 'K',
        Rank::Queen => 'Q',
        Rank::Jack => 'J',
        Rank::Ten => 'T',
        _ => (rank as u8 - 2 + b'2') as char,
    }
}

#[inline]
fn suit_to_char(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'c',
        Suit::Diamonds => 'd',
        Suit::Hearts => 'h',
        Suit::Spades => 's',
    }
}

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Attempts to read the next card from a char iterator.
///
/// Returns `Ok(None)` if the iterator is exhausted before a rank character is read.
#[inline]
fn card_from_chars<T: Iterator<Item = char>>(chars: &mut T) -> Result<Option<Card>, EquityError> {
    let rank_char = match chars.next() {
        Some(c) => c,
        None => return Ok(None),
    };
    let suit_char = chars
        .next()
        .ok_or_else(|| EquityError::OddLength(rank_char.to_string()))?;

    let rank = char_to_rank(rank_char)?;
    let suit = char_to_suit(suit_char)?;

    Ok(Some(Card { rank, suit }))
}

/// Attempts to convert a two-character string into a card.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// assert_eq!(card_from_str("Td"), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
/// assert_eq!(card_from_str("aH"), Ok(Card::new(Rank::Ace, Suit::Hearts)));
/// assert!(card_from_str("1s").is_err());
/// assert!(card_from_str("Asx").is_err());
/// ```
#[inline]
pub fn card_from_str(s: &str) -> Result<Card, EquityError> {
    let cards = cards_from_str(s)?;
    match cards.as_slice() {
        [card] => Ok(*card),
        _ => Err(EquityError::ExpectedOneCard(s.to_string())),
    }
}

/// Attempts to convert a concatenation of two-character tokens into a list of cards.
///
/// Whitespace between tokens is ignored. The order of the input is preserved and duplicates are
/// not checked here (see [`CardSetup::validate`](crate::CardSetup::validate)).
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let cards = cards_from_str("AsKs Qh").unwrap();
/// assert_eq!(cards.len(), 3);
/// assert_eq!(cards_to_string(&cards), "AsKsQh");
///
/// assert!(cards_from_str("AsK").is_err());
/// assert!(cards_from_str("AsXs").is_err());
/// ```
pub fn cards_from_str(s: &str) -> Result<Vec<Card>, EquityError> {
    let compact = WHITESPACE_REGEX.replace_all(s, "");
    if compact.chars().count() % 2 != 0 {
        return Err(EquityError::OddLength(s.to_string()));
    }

    let mut result = Vec::with_capacity(compact.len() / 2);
    let mut chars = compact.chars();
    while let Some(card) = card_from_chars(&mut chars)? {
        result.push(card);
    }

    Ok(result)
}

/// Converts a list of cards into a string.
#[inline]
pub fn cards_to_string(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect()
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", rank_to_char(*self))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", suit_to_char(*self))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = EquityError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        card_from_str(s)
    }
}
