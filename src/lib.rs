//! An equity calculator for Texas hold'em and Omaha hands.
//!
//! # Examples
//! ```
//! use poker_equity::*;
//!
//! // configure cards: two players on the flop
//! let setup = CardSetup::from_strs(
//!     Variant::TexasHoldem,
//!     &["AsKs", "QhJh"], // hole cards of each player
//!     "Ts9s2h",          // board
//!     "",                // dead cards
//! )
//! .unwrap();
//!
//! // the number of possible turn and river cards
//! assert_eq!(estimate_combinations(&setup), 990);
//!
//! // small enough, so every scenario is enumerated
//! let options = CalculationOptions::default();
//! assert_eq!(select_strategy(&setup, &options), Strategy::Exhaustive);
//!
//! let result = calculate_equity(&setup, &options).unwrap();
//! assert!(result.is_exact);
//! println!("Equity of AsKs: {:.2}%", 100.0 * result.players[0].equity);
//! println!("Equity of QhJh: {:.2}%", 100.0 * result.players[1].equity);
//!
//! // distribution of made hands
//! for (category, count) in &result.players[1].hand_counts {
//!     println!("{}: {}", category, count);
//! }
//!
//! // preflop with a random opponent: too many scenarios, so Monte Carlo sampling is used
//! let setup = CardSetup::from_strs(Variant::TexasHoldem, &["AsAh", ""], "", "").unwrap();
//! let options = CalculationOptions::default()
//!     .with_iterations(20_000)
//!     .with_accuracy_threshold(0.001)
//!     .with_seed(1)
//!     .with_progress(|fraction| println!("progress: {:.0}%", 100.0 * fraction));
//! let result = calculate_equity(&setup, &options).unwrap();
//! assert!(!result.is_exact);
//! assert!(result.players[0].equity > 0.8);
//!
//! // evaluate a single hand
//! let hand = "AsAh".parse::<Hand>().unwrap();
//! let board = "AdKsKh2c3d".parse::<Board>().unwrap();
//! let evaluated = evaluate_hand(Variant::TexasHoldem, &hand, &board).unwrap();
//! println!("{}", evaluated.description()); // Full House, Aces over Kings
//! ```
//!
//! # Implementation details
//! - **Strategy selection**: The number of scenarios is computed exactly from the missing hole
//!   and board cards. Exhaustive enumeration is used when it does not exceed
//!   `max_exhaustive_combinations` (25,000 by default) or when `force_exhaustive` is set;
//!   otherwise the calculation falls back to Monte Carlo sampling.
//! - **Exhaustive enumeration**: Candidate completions of every incomplete hand and of the board
//!   are precomputed with their card masks, and an iterative backtracking search visits each
//!   conflict-free combination exactly once.
//! - **Monte Carlo sampling**: Iterations run in batches of 1,000. If `accuracy_threshold` is set,
//!   sampling stops once no player's equity moved more than the threshold over the last 10
//!   batches.
//! - **Split pots**: A pot split `k` ways credits `1 / k` to each winner, so the equities of all
//!   players always sum to one.
//!
//! # Crate features
//! - `bincode`: Uses [bincode] crate (2.0.0-rc.1) to serialize and deserialize cards, card
//!   configurations and results.
//!   Disabled by default.
//!
//! [bincode]: https://github.com/bincode-org/bincode

mod card;
mod config;
mod deck;
mod error;
mod evaluation;
mod exhaustive;
mod hand;
mod interface;
mod monte_carlo;
mod result;
mod solver;
mod utility;

pub use card::*;
pub use config::*;
pub use deck::*;
pub use error::*;
pub use evaluation::*;
pub use exhaustive::*;
pub use hand::*;
pub use interface::*;
pub use monte_carlo::*;
pub use result::*;
pub use solver::*;
pub use utility::*;
