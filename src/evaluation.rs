use crate::card::*;
use crate::error::*;
use crate::hand::*;
use crate::utility::*;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Weight of the category in [`EvaluatedHand::value`].
///
/// Larger than any possible kicker sum (`14 * 1_01_01_01_01`), so the category always dominates.
pub const CATEGORY_WEIGHT: u64 = 10_000_000_000;

/// Poker hand category, ordered by strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    /// All categories from the weakest to the strongest.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    /// Returns the English name of the category.
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The best five-card hand of a player.
///
/// Two evaluated hands are compared by [`value`](Self::value) alone (see [`compare`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct EvaluatedHand {
    /// Category of the hand.
    pub category: HandCategory,

    /// Tie-break value: higher is stronger, equal means a split.
    pub value: u64,

    /// The five cards forming the hand, in scoring order.
    ///
    /// Grouped ranks come first (larger groups, then higher ranks), followed by kickers in
    /// descending order. A wheel is ordered `5, 4, 3, 2, A`.
    pub cards: [Card; 5],
}

impl EvaluatedHand {
    /// Returns a human-readable description such as `"Full House, Kings over Sevens"`.
    pub fn description(&self) -> String {
        let first = self.cards[0].rank;
        match self.category {
            HandCategory::RoyalFlush => "Royal Flush".to_string(),
            HandCategory::StraightFlush => format!("Straight Flush, {} high", first.name()),
            HandCategory::FourOfAKind => format!("Four of a Kind, {}", first.plural()),
            HandCategory::FullHouse => format!(
                "Full House, {} over {}",
                first.plural(),
                self.cards[3].rank.plural()
            ),
            HandCategory::Flush => format!("Flush, {} high", first.name()),
            HandCategory::Straight => format!("Straight, {} high", first.name()),
            HandCategory::ThreeOfAKind => format!("Three of a Kind, {}", first.plural()),
            HandCategory::TwoPair => format!(
                "Two Pair, {} and {}",
                first.plural(),
                self.cards[2].rank.plural()
            ),
            HandCategory::OnePair => format!("Pair of {}", first.plural()),
            HandCategory::HighCard => format!("High Card, {}", first.name()),
        }
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), cards_to_string(&self.cards))
    }
}

/// Compares two evaluated hands by their tie-break values.
///
/// Returns `Ordering::Equal` only if both hands split the pot.
#[inline]
pub fn compare(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    a.value.cmp(&b.value)
}

/// Computes the tie-break value of five rank strengths given in scoring order.
#[inline]
fn tie_break_value(category: HandCategory, strengths: &[u8; 5]) -> u64 {
    let kickers = strengths
        .iter()
        .fold(0u64, |acc, &strength| acc * 100 + strength as u64);
    category as u64 * CATEGORY_WEIGHT + kickers
}

/// Evaluates exactly five cards.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let cards = cards_from_str("AhKhQhJhTh").unwrap();
/// let hand = evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
/// assert_eq!(hand.category, HandCategory::RoyalFlush);
/// ```
pub fn evaluate_five(cards: &[Card; 5]) -> EvaluatedHand {
    let mut rank_count = [0u8; 15];
    for card in cards {
        rank_count[card.rank.strength() as usize] += 1;
    }

    // scoring order: larger groups first, then higher ranks, then suits for determinism
    let mut ordered = *cards;
    ordered.sort_unstable_by(|a, b| {
        let count_a = rank_count[a.rank.strength() as usize];
        let count_b = rank_count[b.rank.strength() as usize];
        count_b
            .cmp(&count_a)
            .then(b.rank.cmp(&a.rank))
            .then(b.suit.cmp(&a.suit))
    });

    let mut strengths = ordered.map(|card| card.rank.strength());

    let is_flush = cards.iter().all(|card| card.suit == cards[0].suit);
    let is_distinct = rank_count.iter().all(|&count| count <= 1);
    let is_wheel = is_distinct && strengths == [14, 5, 4, 3, 2];
    let is_straight = is_distinct && (strengths[0] - strengths[4] == 4 || is_wheel);

    if is_wheel {
        // the ace plays low
        ordered.rotate_left(1);
        strengths = [5, 4, 3, 2, 1];
    }

    let max_count = rank_count.iter().copied().max().unwrap_or(0);
    let num_groups = rank_count.iter().filter(|&&count| count > 0).count();

    let category = if is_straight && is_flush {
        if strengths[0] == Rank::Ace.strength() {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        }
    } else if max_count == 4 {
        HandCategory::FourOfAKind
    } else if max_count == 3 && num_groups == 2 {
        HandCategory::FullHouse
    } else if is_flush {
        HandCategory::Flush
    } else if is_straight {
        HandCategory::Straight
    } else if max_count == 3 {
        HandCategory::ThreeOfAKind
    } else if max_count == 2 && num_groups == 3 {
        HandCategory::TwoPair
    } else if max_count == 2 {
        HandCategory::OnePair
    } else {
        HandCategory::HighCard
    };

    EvaluatedHand {
        category,
        value: tie_break_value(category, &strengths),
        cards: ordered,
    }
}

/// Evaluates the best five-card hand that `variant` allows from `hole` and `board`.
///
/// - Texas Hold'em: any five of the hole and board cards. At least five cards are required.
/// - Omaha: exactly two of the four hole cards and three of the board cards.
///
/// The result does not depend on the order of the input cards.
///
/// # Examples
/// ```
/// use poker_equity::*;
///
/// let hole = cards_from_str("AsKs").unwrap();
/// let board = cards_from_str("Ts9s2h8c7s").unwrap();
/// let hand = evaluate(Variant::TexasHoldem, &hole, &board).unwrap();
/// assert_eq!(hand.category, HandCategory::Flush);
/// assert_eq!(hand.description(), "Flush, Ace high");
///
/// assert!(evaluate(Variant::TexasHoldem, &hole, &board[..2]).is_err());
/// ```
pub fn evaluate(
    variant: Variant,
    hole: &[Card],
    board: &[Card],
) -> Result<EvaluatedHand, EquityError> {
    match variant {
        Variant::TexasHoldem => evaluate_holdem(hole, board),
        Variant::Omaha => evaluate_omaha(hole, board),
    }
}

fn evaluate_holdem(hole: &[Card], board: &[Card]) -> Result<EvaluatedHand, EquityError> {
    let num_cards = hole.len() + board.len();
    if num_cards < 5 {
        return Err(EquityError::InsufficientCards(num_cards));
    }

    let mut all_cards = Vec::with_capacity(num_cards);
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    let mut best: Option<EvaluatedHand> = None;
    let mut subset = Vec::with_capacity(5);
    let mut iter = combinations(&all_cards, 5);
    while iter.next_into(&mut subset) {
        let hand = evaluate_five(&[subset[0], subset[1], subset[2], subset[3], subset[4]]);
        if best.map_or(true, |b| hand.value > b.value) {
            best = Some(hand);
        }
    }

    best.ok_or(EquityError::InsufficientCards(num_cards))
}

fn evaluate_omaha(hole: &[Card], board: &[Card]) -> Result<EvaluatedHand, EquityError> {
    if hole.len() != 4 {
        return Err(EquityError::OmahaHoleCards(hole.len()));
    }
    if board.len() < 3 {
        return Err(EquityError::OmahaBoardCards(board.len()));
    }

    let mut best: Option<EvaluatedHand> = None;
    let mut hole_pair = Vec::with_capacity(2);
    let mut board_triple = Vec::with_capacity(3);

    let mut hole_iter = combinations(hole, 2);
    while hole_iter.next_into(&mut hole_pair) {
        let mut board_iter = combinations(board, 3);
        while board_iter.next_into(&mut board_triple) {
            let hand = evaluate_five(&[
                hole_pair[0],
                hole_pair[1],
                board_triple[0],
                board_triple[1],
                board_triple[2],
            ]);
            if best.map_or(true, |b| hand.value > b.value) {
                best = Some(hand);
            }
        }
    }

    best.ok_or(EquityError::OmahaBoardCards(board.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five(s: &str) -> EvaluatedHand {
        let cards = cards_from_str(s).unwrap();
        evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]])
    }

    fn holdem(hole: &str, board: &str) -> EvaluatedHand {
        evaluate(
            Variant::TexasHoldem,
            &cards_from_str(hole).unwrap(),
            &cards_from_str(board).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_categories() {
        assert_eq!(five("AsKsQsJsTs").category, HandCategory::RoyalFlush);
        assert_eq!(five("9h8h7h6h5h").category, HandCategory::StraightFlush);
        assert_eq!(five("5d4d3d2dAd").category, HandCategory::StraightFlush);
        assert_eq!(five("7s7h7d7c2h").category, HandCategory::FourOfAKind);
        assert_eq!(five("KsKhKd7c7h").category, HandCategory::FullHouse);
        assert_eq!(five("Ac9c7c4c2c").category, HandCategory::Flush);
        assert_eq!(five("Ts9h8d7c6s").category, HandCategory::Straight);
        assert_eq!(five("As2h3d4c5s").category, HandCategory::Straight);
        assert_eq!(five("QsQhQd7c2h").category, HandCategory::ThreeOfAKind);
        assert_eq!(five("JsJh4d4c2h").category, HandCategory::TwoPair);
        assert_eq!(five("TsTh8d4c2h").category, HandCategory::OnePair);
        assert_eq!(five("AsJh8d4c2h").category, HandCategory::HighCard);
        assert_eq!(five("AsKhQdJc9h").category, HandCategory::HighCard);
    }

    #[test]
    fn test_value_layout() {
        let hand = five("KsKhKd7c7h");
        assert_eq!(hand.value, 6 * CATEGORY_WEIGHT + 13_13_13_07_07);

        let hand = five("7c2hJs4dTh");
        assert_eq!(hand.value, 11_10_07_04_02);
        assert_eq!(cards_to_string(&hand.cards), "JsTh7c4d2h");
    }

    #[test]
    fn test_wheel() {
        let wheel = five("As2h3d4c5s");
        let six_high = five("2h3d4c5s6s");
        let trips = five("AsAhAd7c2h");
        assert!(wheel.value < six_high.value);
        assert!(wheel.value > trips.value);
        assert_eq!(cards_to_string(&wheel.cards), "5s4c3d2hAs");
        assert_eq!(wheel.description(), "Straight, Five high");

        let steel_wheel = five("Ad2d3d4d5d");
        let six_high_flush = five("2d3d4d5d6d");
        assert!(steel_wheel.value < six_high_flush.value);
        assert!(steel_wheel.value > five("AsAhAdAc2h").value);
    }

    #[test]
    fn test_royal_flush_beats_everything() {
        let royal = five("AsKsQsJsTs");
        for other in [
            "KhQhJhTh9h",
            "AsAhAdAcKh",
            "AsAhAdKcKh",
            "AcKcQcJc9c",
            "AsKhQdJcTs",
        ] {
            assert_eq!(compare(&royal, &five(other)), Ordering::Greater);
        }
    }

    #[test]
    fn test_kickers() {
        assert!(five("AsAhKdQc9h").value > five("AsAhKdQc8h").value);
        assert!(five("KsKh2d2c3h").value > five("QsQhJdJcAh").value);
        assert!(five("3s3h3d2c2h").value > five("2s2h2dAcAh").value);
        assert_eq!(
            compare(&five("AsKhQdJc9h"), &five("AhKdQcJs9d")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_holdem_best_of_seven() {
        let hand = holdem("AsKs", "Ts9s2h8c7s");
        assert_eq!(hand.category, HandCategory::Flush);
        assert_eq!(cards_to_string(&hand.cards), "AsKsTs9s7s");

        let hand = holdem("QhJh", "Ts9s2h8c7s");
        assert_eq!(hand.category, HandCategory::Straight);
        assert_eq!(hand.description(), "Straight, Queen high");

        // the board plays
        let a = holdem("AsKs", "2s3s4h5c7d");
        let b = holdem("AhKh", "2s3s4h5c7d");
        assert_eq!(a.category, HandCategory::Straight);
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_holdem_insufficient_cards() {
        assert_eq!(
            evaluate(
                Variant::TexasHoldem,
                &cards_from_str("AsKs").unwrap(),
                &cards_from_str("2c3c").unwrap()
            ),
            Err(EquityError::InsufficientCards(4))
        );
        assert_eq!(holdem("", "AsKsQsJsTs").category, HandCategory::RoyalFlush);
    }

    #[test]
    fn test_omaha_two_plus_three() {
        // four spades in hand and one on board: no flush in Omaha
        let hole = cards_from_str("AsKsQsJs").unwrap();
        let board = cards_from_str("Ts2c3d4h9h").unwrap();
        let omaha = evaluate(Variant::Omaha, &hole, &board).unwrap();
        assert_eq!(omaha.category, HandCategory::HighCard);
        let holdem = evaluate(Variant::TexasHoldem, &hole[..2], &board).unwrap();
        assert_eq!(holdem.category, HandCategory::HighCard);

        // quads on board: only three of them play
        let hole = cards_from_str("Ah2h3h4h").unwrap();
        let board = cards_from_str("KsKhKdKc5s").unwrap();
        let omaha = evaluate(Variant::Omaha, &hole, &board).unwrap();
        assert_eq!(omaha.category, HandCategory::ThreeOfAKind);
        assert_eq!(cards_to_string(&omaha.cards[3..]), "Ah4h");
        let holdem = evaluate(Variant::TexasHoldem, &hole[..2], &board).unwrap();
        assert_eq!(holdem.category, HandCategory::FourOfAKind);
    }

    #[test]
    fn test_omaha_errors() {
        let board = cards_from_str("Ts2c3d").unwrap();
        assert_eq!(
            evaluate(Variant::Omaha, &cards_from_str("AsKsQs").unwrap(), &board),
            Err(EquityError::OmahaHoleCards(3))
        );
        assert_eq!(
            evaluate(
                Variant::Omaha,
                &cards_from_str("AsKsQsJs").unwrap(),
                &board[..2]
            ),
            Err(EquityError::OmahaBoardCards(2))
        );
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(five("AsKsQsJsTs").description(), "Royal Flush");
        assert_eq!(five("9h8h7h6h5h").description(), "Straight Flush, Nine high");
        assert_eq!(five("7s7h7d7c2h").description(), "Four of a Kind, Sevens");
        assert_eq!(five("7c7hKsKhKd").description(), "Full House, Kings over Sevens");
        assert_eq!(five("Ac9c7c4c2c").description(), "Flush, Ace high");
        assert_eq!(five("QsQhQd7c2h").description(), "Three of a Kind, Queens");
        assert_eq!(five("4d4cJsJh2h").description(), "Two Pair, Jacks and Fours");
        assert_eq!(five("TsTh8d4c2h").description(), "Pair of Tens");
        assert_eq!(five("AsJh8d4c2h").description(), "High Card, Ace");
    }

    #[test]
    fn test_all_five_card_hands() {
        let deck = (0..52).filter_map(Card::from_index).collect::<Vec<_>>();
        let mut counter = [0u32; 10];

        for i in 0..52 {
            for j in (i + 1)..52 {
                for k in (j + 1)..52 {
                    for m in (k + 1)..52 {
                        for n in (m + 1)..52 {
                            let cards = [deck[i], deck[j], deck[k], deck[m], deck[n]];
                            let hand = evaluate_five(&cards);
                            assert_eq!(hand.value / CATEGORY_WEIGHT, hand.category as u64);
                            counter[hand.category as usize] += 1;
                        }
                    }
                }
            }
        }

        assert_eq!(counter[9], 4); // royal flush
        assert_eq!(counter[8], 36); // straight flush
        assert_eq!(counter[7], 624); // four of a kind
        assert_eq!(counter[6], 3744); // full house
        assert_eq!(counter[5], 5108); // flush
        assert_eq!(counter[4], 10200); // straight
        assert_eq!(counter[3], 54912); // three of a kind
        assert_eq!(counter[2], 123552); // two pair
        assert_eq!(counter[1], 1098240); // one pair
        assert_eq!(counter[0], 1302540); // high card
    }
}
