//! Monte Carlo estimation of win/tie/lose odds.
//!
//! Every trial shuffles the cards that are not yet known, deals two cards to
//! each opponent, completes the board and compares the subject's best hand
//! against every opponent's.

use crate::cards::{Card, CardParseError};
use crate::deck::{fisher_yates, Deck};
use crate::evaluator::{evaluate_seven, HandEvaluation};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_TRIALS: usize = 5000;
pub const MAX_OPPONENTS: usize = 8;

/// Trials per parallel work unit; each unit draws from its own RNG stream.
#[cfg(feature = "parallel")]
const BATCH_SIZE: usize = 1000;

/// How many opponents to simulate against and for how many trials.
///
/// ```
/// use holdem_odds::simulation::SimulationConfig;
///
/// let config = SimulationConfig::default().opponents(3).trials(20_000);
/// assert_eq!(config.opponents, 3);
/// assert_eq!(config.trials, 20_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub opponents: usize,
    pub trials: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { opponents: 1, trials: DEFAULT_TRIALS }
    }
}

impl SimulationConfig {
    pub fn opponents(mut self, n: usize) -> Self {
        self.opponents = n;
        self
    }

    pub fn trials(mut self, n: usize) -> Self {
        self.trials = n;
        self
    }
}

/// The input constraint a simulation request violated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidInput {
    #[error("hole cards count: expected 2, got {0}")]
    HoleCardCount(usize),
    #[error("community card count: expected 0 to 5, got {0}")]
    CommunityCardCount(usize),
    #[error("opponent count: expected 1 to {MAX_OPPONENTS}, got {0}")]
    OpponentCount(usize),
    #[error("trial count must be positive")]
    TrialCount,
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
}


#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error("simulation cancelled after {completed} trials")]
    Cancelled { completed: usize },
}

impl From<HandError> for SimulationError {
    fn from(err: HandError) -> Self {
        let invalid = match err {
            HandError::HoleCount(n) => InvalidInput::HoleCardCount(n),
            HandError::TooManyBoardCards(n) => InvalidInput::CommunityCardCount(n),
            HandError::DuplicateHoleCard(c)
            | HandError::DuplicateBoardCard(c)
            | HandError::Overlap(c) => InvalidInput::DuplicateCard(c),
            HandError::CardParse(e) => return SimulationError::Card(e),
        };
        SimulationError::InvalidInput(invalid)
    }
}

/// Result of a single trial from the subject's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Decide a trial: a loss as soon as any opponent is strictly better, a tie
/// if no one is better but someone is equal, otherwise a win.
pub fn showdown<I>(mine: &HandEvaluation, opponents: I) -> Outcome
where
    I: IntoIterator<Item = HandEvaluation>,
{
    let mut tie_seen = false;
    for theirs in opponents {
        match theirs.cmp(mine) {
            Ordering::Greater => return Outcome::Loss,
            Ordering::Equal => tie_seen = true,
            Ordering::Less => {}
        }
    }
    if tie_seen {
        Outcome::Tie
    } else {
        Outcome::Win
    }
}

/// Raw counters of a (partial) run. Losses are implied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub ties: u64,
    pub trials: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => {}
        }
        self.trials += 1;
    }

    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }

    pub fn losses(&self) -> u64 {
        self.trials - self.wins - self.ties
    }

    /// Convert counts into percentages rounded to two decimals.
    ///
    /// Win and tie are computed from the counts; lose is what remains of 100,
    /// so the three always add up to 100. The tally must hold at least one
    /// trial, which every validated run does.
    pub fn result(&self) -> SimulationResult {
        let n = self.trials as f64;
        let win = round2(100.0 * self.wins as f64 / n);
        let tie = round2(100.0 * self.ties as f64 / n);
        let lose = round2(100.0 - win - tie);
        SimulationResult {
            win,
            tie,
            lose,
            simulations: self.trials as usize,
            wins: self.wins,
            ties: self.ties,
        }
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Aggregate odds of one simulation, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub simulations: usize,
    pub wins: u64,
    pub ties: u64,
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "win {:.2}% tie {:.2}% lose {:.2}% ({} simulations)",
            self.win, self.tie, self.lose, self.simulations
        )
    }
}

/// Cooperative cancellation flag, checked between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// A validated simulation: known cards, the remaining deck and the run size.
///
/// Everything here is read-only while trials run; each runner shuffles its
/// own copy of the remaining deck.
#[derive(Debug, Clone)]
pub struct Simulator {
    hole: HoleCards,
    board: Board,
    /// Known board cards first, the rest placeholders overwritten per trial.
    board_template: [Card; 5],
    deck: Deck,
    opponents: usize,
    trials: usize,
    cancel: Option<CancelToken>,
}

impl Simulator {
    /// Validate the inputs. Nothing random happens before this succeeds.
    ///
    /// Counts are checked first, then duplicates among hole and community
    /// cards.
    ///
    /// ```
    /// use holdem_odds::cards::parse_cards;
    /// use holdem_odds::simulation::{SimulationConfig, Simulator};
    ///
    /// let hole = parse_cards("As Ad").unwrap();
    /// let sim = Simulator::new(&hole, &[], SimulationConfig::default()).unwrap();
    /// assert_eq!(sim.remaining_deck().as_slice().len(), 50);
    ///
    /// let too_many = parse_cards("As Ad Ah").unwrap();
    /// assert!(Simulator::new(&too_many, &[], SimulationConfig::default()).is_err());
    /// ```
    pub fn new(
        hole: &[Card],
        community: &[Card],
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        if hole.len() != 2 {
            return Err(InvalidInput::HoleCardCount(hole.len()).into());
        }
        if community.len() > Board::MAX {
            return Err(InvalidInput::CommunityCardCount(community.len()).into());
        }
        if !(1..=MAX_OPPONENTS).contains(&config.opponents) {
            return Err(InvalidInput::OpponentCount(config.opponents).into());
        }
        if config.trials == 0 {
            return Err(InvalidInput::TrialCount.into());
        }

        let hole_cards = HoleCards::from_slice(hole)?;
        let board = Board::try_new(community.to_vec())?;
        validate_holdem(&hole_cards, &board)?;

        let mut board_template = [hole[0]; 5];
        board_template[..community.len()].copy_from_slice(community);
        let known: Vec<Card> = hole.iter().chain(community).copied().collect();

        Ok(Self {
            hole: hole_cards,
            board,
            board_template,
            deck: Deck::without(&known),
            opponents: config.opponents,
            trials: config.trials,
            cancel: None,
        })
    }

    /// Stop between trials once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn remaining_deck(&self) -> &Deck {
        &self.deck
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Play one trial, shuffling `buf` (a copy of the remaining deck) in place.
    ///
    /// Opponents take two cards each from the front of the shuffled deck, in
    /// seat order; the board is completed from the cards after them.
    pub fn run_trial<R: Rng + ?Sized>(&self, buf: &mut [Card], rng: &mut R) -> Outcome {
        fisher_yates(buf, rng);

        let (dealt, rest) = buf.split_at(2 * self.opponents);
        let mut board = self.board_template;
        board[self.board.len()..].copy_from_slice(&rest[..self.board.missing()]);

        let mine = evaluate_seven(&seven(self.hole.first(), self.hole.second(), &board));
        let theirs = dealt.chunks_exact(2).map(|h| evaluate_seven(&seven(h[0], h[1], &board)));
        showdown(&mine, theirs)
    }

    /// Run up to `n` trials, stopping early if cancelled.
    fn run_batch<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Tally {
        let mut buf = self.deck.as_slice().to_vec();
        let mut tally = Tally::default();
        for _ in 0..n {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                break;
            }
            tally.record(self.run_trial(&mut buf, rng));
        }
        tally
    }

    fn finish(&self, tally: Tally) -> Result<SimulationResult, SimulationError> {
        if (tally.trials as usize) < self.trials {
            warn!(completed = tally.trials, requested = self.trials, "simulation cancelled");
            return Err(SimulationError::Cancelled { completed: tally.trials as usize });
        }
        debug!(wins = tally.wins, ties = tally.ties, losses = tally.losses(), "simulation finished");
        Ok(tally.result())
    }

    fn log_start(&self, runner: &'static str) {
        debug!(
            hole = %self.hole,
            board = %self.board,
            opponents = self.opponents,
            trials = self.trials,
            runner,
            "starting simulation"
        );
    }

    /// Run every trial sequentially on the given random source.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimulationResult, SimulationError> {
        self.log_start("sequential");
        let tally = self.run_batch(self.trials, rng);
        self.finish(tally)
    }

    /// Run sequentially on a ChaCha8 generator seeded with `seed`.
    /// The same inputs and seed always give the same result.
    pub fn run_seeded(&self, seed: u64) -> Result<SimulationResult, SimulationError> {
        self.run(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Run trials across the rayon thread pool.
    ///
    /// Trials are split into fixed batches; batch `i` uses stream `i` of a
    /// ChaCha8 generator seeded with `seed`, so the result depends only on
    /// the inputs and the seed, not on the number of threads.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self, seed: u64) -> Result<SimulationResult, SimulationError> {
        use rayon::prelude::*;

        self.log_start("parallel");
        let batches = self.trials.div_ceil(BATCH_SIZE);
        let tally = (0..batches)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(i as u64);
                let n = BATCH_SIZE.min(self.trials - i * BATCH_SIZE);
                let tally = self.run_batch(n, &mut rng);
                tracing::trace!(batch = i, trials = tally.trials, "batch done");
                tally
            })
            .reduce(Tally::default, Tally::merge);
        self.finish(tally)
    }
}

fn seven(a: Card, b: Card, board: &[Card; 5]) -> [Card; 7] {
    [a, b, board[0], board[1], board[2], board[3], board[4]]
}

/// Simulate with an injected random source.
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::simulation::simulate;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let hole = parse_cards("Ks Kd").unwrap();
/// let board = parse_cards("Kh 7c 2d").unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let r = simulate(&hole, &board, 2, 2000, &mut rng).unwrap();
/// assert!(r.win > 80.0);
/// assert!((r.win + r.tie + r.lose - 100.0).abs() < 1e-9);
/// ```
pub fn simulate<R: Rng + ?Sized>(
    hole: &[Card],
    community: &[Card],
    opponents: usize,
    trials: usize,
    rng: &mut R,
) -> Result<SimulationResult, SimulationError> {
    let config = SimulationConfig { opponents, trials };
    Simulator::new(hole, community, config)?.run(rng)
}

/// Simulate sequentially from a fixed seed; reproducible bit for bit.
pub fn simulate_seeded(
    hole: &[Card],
    community: &[Card],
    opponents: usize,
    trials: usize,
    seed: u64,
) -> Result<SimulationResult, SimulationError> {
    let config = SimulationConfig { opponents, trials };
    Simulator::new(hole, community, config)?.run_seeded(seed)
}

/// Simulate on all cores; reproducible for a given seed.
#[cfg(feature = "parallel")]
pub fn simulate_parallel(
    hole: &[Card],
    community: &[Card],
    opponents: usize,
    trials: usize,
    seed: u64,
) -> Result<SimulationResult, SimulationError> {
    let config = SimulationConfig { opponents, trials };
    Simulator::new(hole, community, config)?.run_parallel(seed)
}

fn parse_all(cards: &[&str]) -> Result<Vec<Card>, CardParseError> {
    cards.iter().map(|s| s.parse()).collect()
}

/// String entry point using the thread-local generator.
///
/// ```
/// use holdem_odds::simulation::calculate;
///
/// let r = calculate(&["As", "Ad"], &[], 1, 2000).unwrap();
/// assert_eq!(r.simulations, 2000);
///
/// assert!(calculate(&["As", "Ax"], &[], 1, 2000).is_err());
/// ```
pub fn calculate(
    my_cards: &[&str],
    community_cards: &[&str],
    opponents: usize,
    simulations: usize,
) -> Result<SimulationResult, SimulationError> {
    calculate_with_rng(my_cards, community_cards, opponents, simulations, &mut rand::rng())
}

/// [`calculate`] with an injected random source.
pub fn calculate_with_rng<R: Rng + ?Sized>(
    my_cards: &[&str],
    community_cards: &[&str],
    opponents: usize,
    simulations: usize,
    rng: &mut R,
) -> Result<SimulationResult, SimulationError> {
    let hole = parse_all(my_cards)?;
    let community = parse_all(community_cards)?;
    simulate(&hole, &community, opponents, simulations, rng)
}
