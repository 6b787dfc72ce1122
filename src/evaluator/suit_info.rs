use super::rank_groups::{bit, RankMask};
use crate::cards::{Card, Suit};

/// Whether five or more cards share a suit, and which ranks that suit holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub flush_suit: Option<Suit>,
    pub flush_ranks: RankMask,
}

impl SuitInfo {
    pub fn detect(cards: &[Card], suit_counts: &[u8; Suit::COUNT]) -> Self {
        // Seven cards can hold at most one suit with five or more.
        let flush_suit = Suit::ALL.into_iter().find(|s| suit_counts[s.index() as usize] >= 5);

        let flush_ranks = match flush_suit {
            Some(suit) => {
                cards.iter().filter(|c| c.suit() == suit).fold(0, |m, c| m | bit(c.rank()))
            }
            None => 0,
        };

        SuitInfo { flush_suit, flush_ranks }
    }

    pub fn is_flush(&self) -> bool {
        self.flush_suit.is_some()
    }
}
