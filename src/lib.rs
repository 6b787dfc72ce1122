//! holdem-odds: Monte Carlo win/tie/lose odds for Texas Hold'em
//!
//! Goals:
//! - Correct, fast 7-card evaluation with a total order on hands
//! - Reproducible simulations from a seed, sequential or parallel
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: odds of pocket aces against one opponent
//! ```
//! use holdem_odds::cards::parse_cards;
//! use holdem_odds::simulation::simulate_seeded;
//!
//! let hole = parse_cards("As Ad").unwrap();
//! let result = simulate_seeded(&hole, &[], 1, 5000, 42).unwrap();
//! assert!(result.win > 80.0);
//! ```
//!
//! ## Evaluate a hand
//! ```
//! use holdem_odds::cards::parse_cards;
//! use holdem_odds::evaluator::{evaluate, Category};
//!
//! let cards = parse_cards("2s 2h 2d 2c 5h 6d 7c").unwrap();
//! assert_eq!(evaluate(&cards).unwrap().category, Category::FourOfAKind);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --release -- As Ad --board "Kc 7h 2d" --opponents 3
//! ```

pub mod cards;
pub mod deck;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod simulation;

pub use error::{Error, Result};
pub use simulation::{calculate, simulate, SimulationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
