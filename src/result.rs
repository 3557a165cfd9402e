use crate::evaluation::*;
use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Aggregated outcome of one player.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct PlayerEquity {
    /// Expected share of the pot, in `[0.0, 1.0]`.
    pub equity: f64,

    /// Number of scenarios won outright.
    pub wins: u64,

    /// Number of scenarios in which the pot was split with at least one other player.
    pub ties: u64,

    /// Sum over split scenarios of the pot fraction received (`1 / number of winners`).
    pub tie_share: f64,

    /// Number of scenarios in which the player made each category, regardless of the outcome.
    pub hand_counts: BTreeMap<HandCategory, u64>,

    /// Number of scenarios won with each category; a split counts as `1 / number of winners`.
    pub winning_hand_counts: BTreeMap<HandCategory, f64>,
}

/// Result of an equity calculation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct EquityResult {
    /// Per-player results, in the order of the input hands.
    pub players: Vec<PlayerEquity>,

    /// Number of scenarios evaluated.
    pub scenarios: u64,

    /// Wall time spent in the calculation.
    pub elapsed: Duration,

    /// Whether every scenario was enumerated (as opposed to sampled).
    pub is_exact: bool,
}

impl EquityResult {
    /// Returns the equity of each player.
    #[inline]
    pub fn equities(&self) -> Vec<f64> {
        self.players.iter().map(|player| player.equity).collect()
    }

    /// Returns the fraction of scenarios won outright by `player`.
    #[inline]
    pub fn win_rate(&self, player: usize) -> f64 {
        ratio(self.players[player].wins as f64, self.scenarios)
    }

    /// Returns the fraction of scenarios in which `player` split the pot.
    #[inline]
    pub fn tie_rate(&self, player: usize) -> f64 {
        ratio(self.players[player].ties as f64, self.scenarios)
    }

    /// Returns the fraction of scenarios in which `player` neither won nor split the pot.
    #[inline]
    pub fn lose_rate(&self, player: usize) -> f64 {
        let player = &self.players[player];
        ratio(
            self.scenarios.saturating_sub(player.wins + player.ties) as f64,
            self.scenarios,
        )
    }
}

#[inline]
fn ratio(numerator: f64, scenarios: u64) -> f64 {
    if scenarios == 0 {
        0.0
    } else {
        numerator / scenarios as f64
    }
}

/// Outcome bookkeeping shared by the exhaustive and Monte Carlo calculators.
#[derive(Debug, Clone)]
pub(crate) struct Tally {
    players: Vec<PlayerEquity>,
    scenarios: u64,
    winners: Vec<usize>,
}

impl Tally {
    pub(crate) fn new(num_players: usize) -> Self {
        Self {
            players: vec![PlayerEquity::default(); num_players],
            scenarios: 0,
            winners: Vec::with_capacity(num_players),
        }
    }

    /// Records one fully specified scenario given the evaluated hand of every player.
    pub(crate) fn record(&mut self, hands: &[EvaluatedHand]) {
        debug_assert_eq!(hands.len(), self.players.len());

        self.scenarios += 1;

        let best = hands.iter().map(|hand| hand.value).max().unwrap_or(0);
        self.winners.clear();
        self.winners.extend(
            hands
                .iter()
                .enumerate()
                .filter(|(_, hand)| hand.value == best)
                .map(|(player, _)| player),
        );

        for (player, hand) in self.players.iter_mut().zip(hands) {
            *player.hand_counts.entry(hand.category).or_insert(0) += 1;
        }

        if let [winner] = self.winners[..] {
            let player = &mut self.players[winner];
            player.wins += 1;
            *player
                .winning_hand_counts
                .entry(hands[winner].category)
                .or_insert(0.0) += 1.0;
        } else {
            let share = 1.0 / self.winners.len() as f64;
            for &winner in &self.winners {
                let player = &mut self.players[winner];
                player.ties += 1;
                player.tie_share += share;
                *player
                    .winning_hand_counts
                    .entry(hands[winner].category)
                    .or_insert(0.0) += share;
            }
        }
    }

    #[inline]
    pub(crate) fn scenarios(&self) -> u64 {
        self.scenarios
    }

    /// Returns the running equity of each player.
    pub(crate) fn equities(&self) -> Vec<f64> {
        self.players
            .iter()
            .map(|player| ratio(player.wins as f64 + player.tie_share, self.scenarios))
            .collect()
    }

    /// Finalizes the tally into a result.
    pub(crate) fn finish(mut self, elapsed: Duration, is_exact: bool) -> EquityResult {
        let equities = self.equities();
        for (player, equity) in self.players.iter_mut().zip(equities) {
            player.equity = equity;
        }

        EquityResult {
            players: self.players,
            scenarios: self.scenarios,
            elapsed,
            is_exact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::*;

    fn five(s: &str) -> EvaluatedHand {
        let cards = cards_from_str(s).unwrap();
        evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]])
    }

    #[test]
    fn test_single_winner() {
        let mut tally = Tally::new(2);
        tally.record(&[five("AsAhKdQc9h"), five("KsKhQdJc9d")]);
        let result = tally.finish(Duration::ZERO, true);

        assert_eq!(result.scenarios, 1);
        assert_eq!(result.players[0].wins, 1);
        assert_eq!(result.players[1].wins, 0);
        assert_eq!(result.equities(), vec![1.0, 0.0]);
        assert_eq!(result.players[1].hand_counts[&HandCategory::OnePair], 1);
        assert!(result.players[1].winning_hand_counts.is_empty());
        assert_eq!(result.lose_rate(1), 1.0);
    }

    #[test]
    fn test_three_way_split() {
        let mut tally = Tally::new(3);
        let straight = five("Ts9h8d7c6s");
        tally.record(&[straight, straight, straight]);
        tally.record(&[straight, five("2s2h4d7c9s"), five("3s3h4d7c9s")]);
        let result = tally.finish(Duration::ZERO, true);

        let equities = result.equities();
        assert!((equities[0] - (1.0 + 1.0 / 3.0) / 2.0).abs() < 1e-12);
        assert!((equities[1] - (1.0 / 3.0) / 2.0).abs() < 1e-12);
        assert!((equities.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        assert_eq!(result.players[0].ties, 1);
        assert_eq!(result.players[0].wins, 1);
        assert!(
            (result.players[0].winning_hand_counts[&HandCategory::Straight] - 4.0 / 3.0).abs()
                < 1e-12
        );
        assert_eq!(result.tie_rate(2), 0.5);
    }

    #[test]
    fn test_empty_tally() {
        let result = Tally::new(2).finish(Duration::ZERO, false);
        assert_eq!(result.equities(), vec![0.0, 0.0]);
        assert_eq!(result.win_rate(0), 0.0);
    }
}
