use crate::cards::{parse_cards, Card, CardParseError};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("hole card {0} given twice")]
    DuplicateHoleCard(Card),
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate card on board: {0}")]
    DuplicateBoardCard(Card),
    #[error("hole card {0} is also on the board")]
    Overlap(Card),
    #[error(transparent)]
    CardParse(#[from] CardParseError),
}

/// A player's two private hole cards.
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
/// use holdem_odds::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCard(a));
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        Self::from_slice(&cards)
    }
}

/// Known community cards: none (preflop), flop, turn or river.
///
/// ```
/// use holdem_odds::hand::Board;
///
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.missing(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX: usize = 5;

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        if let Some(dup) = first_duplicate(&cards) {
            return Err(HandError::DuplicateBoardCard(dup));
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// How many cards are still to come.
    pub fn missing(&self) -> usize {
        Self::MAX - self.cards.len()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return f.write_str("-");
        }
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        Board::try_new(cards)
    }
}

/// Ensure no hole card also appears on the board.
///
/// ```
/// use holdem_odds::hand::{validate_holdem, Board, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// validate_holdem(&hole, &board).unwrap();
///
/// let clash: Board = "As 3c 4c".parse().unwrap();
/// assert!(validate_holdem(&hole, &clash).is_err());
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    for c in hole.as_array() {
        if board.as_slice().contains(&c) {
            return Err(HandError::Overlap(c));
        }
    }
    Ok(())
}

/// First card that occurs twice in `cards`, if any.
pub(crate) fn first_duplicate(cards: &[Card]) -> Option<Card> {
    let mut seen = [false; Card::COUNT];
    for &c in cards {
        let slot = &mut seen[c.index() as usize];
        if *slot {
            return Some(c);
        }
        *slot = true;
    }
    None
}
