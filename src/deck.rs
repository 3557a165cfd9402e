use crate::card::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// The cards still available for dealing.
///
/// A deck starts as the 52-card universe minus the used cards of a calculation and is owned by a
/// single calculation run. Used for exhaustive enumeration (via [`cards`](Self::cards)) and
/// Monte Carlo sampling (via [`shuffle`](Self::shuffle) and [`deal`](Self::deal)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Creates a full 52-card deck in index order.
    pub fn new() -> Self {
        Self {
            cards: (0..52).filter_map(Card::from_index).collect(),
        }
    }

    /// Creates a deck containing every card whose bit is not set in `used_mask`.
    pub fn without_mask(used_mask: u64) -> Self {
        Self {
            cards: (0..52)
                .filter(|index| used_mask & (1 << index) == 0)
                .filter_map(Card::from_index)
                .collect(),
        }
    }

    /// Creates a deck containing every card not in `used`.
    #[inline]
    pub fn without(used: &[Card]) -> Self {
        Self::without_mask(cards_mask(used))
    }

    /// Returns the remaining cards.
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

    /// Removes `card` from the deck. Returns whether the card was present.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(position) => {
                self.cards.swap_remove(position);
                true
            }
            None => false,
        }
    }

    /// Shuffles the remaining cards.
    #[inline]
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals up to `n` cards from the top of the deck.
    ///
    /// Dealt cards are removed from the deck, so consecutive calls never return the same card.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let start = self.cards.len().saturating_sub(n);
        self.cards.split_off(start)
    }
}
