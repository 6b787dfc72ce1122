use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Card ranks from Two (low) to Ace (high), densely indexed 0..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const COUNT: usize = 13;

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

    /// Dense index in `0..13`.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(i: u8) -> Option<Rank> {
        if (i as usize) < Self::COUNT {
            Some(Self::ALL[i as usize])
        } else {
            None
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Rank {
    type Error = CardParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(CardParseError::InvalidRank(c)),
        }
    }
}

/// Four suits; order has no hand-strength meaning but fixes the encoding: c < d < h < s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const COUNT: usize = 4;

    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Suit {
    type Error = CardParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(CardParseError::InvalidSuit(c)),
        }
    }
}

/// A playing card, stored as `suit * 13 + rank` in `0..52`.
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.index(), 3 * 13 + 12);
/// assert_eq!(card.to_string(), "As");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card(u8);

impl Card {
    pub const COUNT: usize = 52;

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self(suit.index() * Rank::COUNT as u8 + rank.index())
    }

    pub const fn from_index(i: u8) -> Option<Self> {
        if (i as usize) < Self::COUNT {
            Some(Self(i))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 % Rank::COUNT as u8) as usize]
    }

    pub const fn suit(self) -> Suit {
        Suit::ALL[(self.0 / Rank::COUNT as u8) as usize]
    }

    /// All 52 cards in encoding order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..Self::COUNT as u8).map(Card)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card '{0}': expected two characters like 'As' or 'Td'")]
    InvalidLength(String),
    #[error("invalid rank: '{0}'")]
    InvalidRank(char),
    #[error("invalid suit: '{0}'")]
    InvalidSuit(char),
}

/// Encode a rank character and a suit character into a card.
///
/// ```
/// use holdem_odds::cards::{encode, Card, Rank, Suit};
///
/// assert_eq!(encode('T', 'h').unwrap(), Card::new(Rank::Ten, Suit::Hearts));
/// assert!(encode('1', 'h').is_err());
/// assert!(encode('T', 'H').is_err());
/// ```
pub fn encode(rank: char, suit: char) -> Result<Card, CardParseError> {
    Ok(Card::new(Rank::try_from(rank)?, Suit::try_from(suit)?))
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => encode(r, su),
            _ => Err(CardParseError::InvalidLength(s.to_string())),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(c: Card) -> Self {
        c.to_string()
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use holdem_odds::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd Tc").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
