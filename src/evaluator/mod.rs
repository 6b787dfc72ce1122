pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::first_duplicate;
use core::cmp::Ordering;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

impl HandValue {
    /// Pack a category and up to five tiebreak ranks into a comparable value.
    fn from_parts(category: Category, tie_break: &[Rank]) -> Self {
        // Layout (most significant -> least):
        // [ category (4 bits) | k0 (4) | k1 (4) | k2 (4) | k3 (4) | k4 (4) ]
        // Ranks are stored as index + 1 so an absent slot sorts below any rank.
        const CAT_SHIFT: u32 = 20;
        const RANK_STRIDE: u32 = 4;
        let mut v = (category.ordinal() as u64) << CAT_SHIFT;
        for (i, r) in tie_break.iter().take(5).enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (r.index() as u64 + 1) << offset;
        }
        HandValue(v)
    }
}

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::OnePair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of evaluating a hand: its category and the ranks that break ties
/// within that category.
///
/// The tie-break key lists at most five ranks ordered by multiplicity
/// (descending) then rank (descending), e.g. `[Ten, Two]` for tens full of
/// twos. Kickers stop once five cards are accounted for. Straights and
/// straight flushes carry only their top card, so a wheel is `[Five]`.
/// Ordering compares category first, then the key element-wise.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct HandEvaluation {
    pub category: Category,
    tie_break: [Rank; 5],
    len: u8,
    value: HandValue,
}

impl HandEvaluation {
    pub(crate) fn new<I>(category: Category, ranks: I) -> Self
    where
        I: IntoIterator<Item = Rank>,
    {
        let mut tie_break = [Rank::Two; 5];
        let mut len = 0;
        for (slot, r) in tie_break.iter_mut().zip(ranks) {
            *slot = r;
            len += 1;
        }
        let value = HandValue::from_parts(category, &tie_break[..len as usize]);
        Self { category, tie_break, len, value }
    }

    /// The tie-break ranks, most significant first.
    pub fn tie_break(&self) -> &[Rank] {
        &self.tie_break[..self.len as usize]
    }
}

impl Ord for HandEvaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for HandEvaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandEvaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for HandEvaluation {}

impl fmt::Display for HandEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category)?;
        for r in self.tie_break() {
            write!(f, "{r}")?;
        }
        write!(f, ")")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("expected exactly 7 cards to evaluate, got {0}")]
    InvalidHandSize(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Evaluate exactly seven distinct cards (two hole + five community).
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("As Ks Qs Js Ts 2d 3c").unwrap();
/// assert_eq!(evaluate(&cards).unwrap().category, Category::RoyalFlush);
///
/// let short = parse_cards("As Ks Qs").unwrap();
/// assert!(evaluate(&short).is_err());
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandEvaluation, EvalError> {
    let seven: &[Card; 7] = cards.try_into().map_err(|_| EvalError::InvalidHandSize(cards.len()))?;
    if let Some(dup) = first_duplicate(seven) {
        return Err(EvalError::DuplicateCard(dup));
    }
    Ok(evaluate_seven(seven))
}

/// Evaluate seven cards without validation; the hot path of a simulation.
pub fn evaluate_seven(cards: &[Card; 7]) -> HandEvaluation {
    detector::classify(&hand_analysis::HandAnalysis::new(cards))
}

/// Evaluate exactly five cards with the same rules.
pub fn evaluate_five(cards: &[Card; 5]) -> HandEvaluation {
    detector::classify(&hand_analysis::HandAnalysis::new(cards))
}

/// Best evaluation over every five-card subset of `cards`, by brute force.
/// `None` when fewer than five cards are given.
///
/// Seven-card evaluation classifies the whole hand at once, so the two only
/// differ on two sets of trips (three of a kind in seven cards, a full house
/// here) and on a flush whose highest straight is not all in the flush suit
/// (a straight flush in seven cards, at most a flush or a lower straight
/// flush here).
pub fn best_five_of(cards: &[Card]) -> Option<HandEvaluation> {
    combinations::FiveOf::new(cards.len())
        .map(|ix| evaluate_five(&ix.map(|i| cards[i])))
        .max()
}

/// Order two evaluations: category first, then tie-break ranks.
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::evaluator::{compare, evaluate};
/// use std::cmp::Ordering;
///
/// let flush = evaluate(&parse_cards("Ah 9h 7h 3h 2h Kd Qc").unwrap()).unwrap();
/// let straight = evaluate(&parse_cards("9c 8d 7h 6s 5c Kd 2c").unwrap()).unwrap();
/// assert_eq!(compare(&flush, &straight), Ordering::Greater);
/// assert_eq!(compare(&flush, &flush), Ordering::Equal);
/// ```
pub fn compare(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    a.cmp(b)
}
