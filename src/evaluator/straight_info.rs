use super::rank_groups::{bit, RankMask};
use crate::cards::Rank;

const WHEEL: RankMask =
    bit(Rank::Ace) | bit(Rank::Two) | bit(Rank::Three) | bit(Rank::Four) | bit(Rank::Five);

/// Whether a set of distinct ranks contains a straight, and its top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Detect the highest straight among the ranks in `mask`.
    ///
    /// Five consecutive rank indices form a straight. A-2-3-4-5 (the wheel) is
    /// the only exception and ranks as a five-high straight; nothing else wraps
    /// around the ace.
    pub fn detect(mask: RankMask) -> Self {
        // Top ranks Ace down to Six, i.e. windows starting at Ten down to Two.
        for top in (4..Rank::COUNT as u8).rev() {
            let window: RankMask = 0b1_1111 << (top - 4);
            if mask & window == window {
                return StraightInfo { top_rank: Rank::from_index(top) };
            }
        }

        if mask & WHEEL == WHEEL {
            return StraightInfo { top_rank: Some(Rank::Five) };
        }

        StraightInfo { top_rank: None }
    }
}
