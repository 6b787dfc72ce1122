use crate::cards::Rank;

/// Bit set of ranks, bit `i` standing for the rank with index `i`.
pub type RankMask = u16;

pub const fn bit(rank: Rank) -> RankMask {
    1 << rank.index()
}

/// Ranks present in `mask`, highest first.
pub fn ranks_desc(mask: RankMask) -> impl Iterator<Item = Rank> {
    Rank::ALL.into_iter().rev().filter(move |r| mask & bit(*r) != 0)
}

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: [(Rank, u8); Rank::COUNT],
    len: usize,
    present: RankMask,
}

impl RankGroups {
    /// Create RankGroups from a rank count array indexed by `Rank::index`.
    pub fn from_counts(rank_counts: &[u8; Rank::COUNT]) -> Self {
        let mut groups = [(Rank::Two, 0u8); Rank::COUNT];
        let mut len = 0;
        let mut present = 0;

        for rank in Rank::ALL.into_iter().rev() {
            let count = rank_counts[rank.index() as usize];
            if count > 0 {
                groups[len] = (rank, count);
                len += 1;
                present |= bit(rank);
            }
        }

        // Stable: ranks were pushed highest first, so equal counts stay rank-descending.
        groups[..len].sort_by(|a, b| b.1.cmp(&a.1));

        Self { groups, len, present }
    }

    pub fn as_slice(&self) -> &[(Rank, u8)] {
        &self.groups[..self.len]
    }

    /// Mask of every rank present at least once.
    pub fn present(&self) -> RankMask {
        self.present
    }

    /// Returns the rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.as_slice().iter().find(|(_, count)| *count >= 4).map(|(rank, _)| *rank)
    }

    /// Returns the highest three-of-a-kind, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.as_slice().iter().find(|(_, count)| *count == 3).map(|(rank, _)| *rank)
    }

    /// Pair ranks, highest first.
    pub fn pairs(&self) -> impl Iterator<Item = Rank> + '_ {
        self.as_slice().iter().filter(|(_, count)| *count == 2).map(|(rank, _)| *rank)
    }

    /// Trips and pair ranks when the multiplicities, highest first, begin 3,2.
    /// Two sets of trips (3,3,1) do not qualify.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        match self.as_slice() {
            [(trips, 3), (pair, 2), ..] => Some((*trips, *pair)),
            _ => None,
        }
    }

    /// Up to `n` highest ranks present, skipping the ranks in `used`.
    pub fn kickers(&self, used: RankMask, n: usize) -> impl Iterator<Item = Rank> {
        ranks_desc(self.present & !used).take(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_counts(pairs: &[(Rank, u8)]) -> [u8; Rank::COUNT] {
        let mut counts = [0u8; Rank::COUNT];
        for &(rank, count) in pairs {
            counts[rank.index() as usize] = count;
        }
        counts
    }

    #[test]
    fn test_quad() {
        let counts = make_counts(&[(Rank::Ace, 4), (Rank::King, 2), (Rank::Two, 1)]);
        let groups = RankGroups::from_counts(&counts);
        assert_eq!(groups.quad(), Some(Rank::Ace));
        assert_eq!(groups.trips(), None);
        // best kicker is the king, not the lone deuce
        assert_eq!(groups.kickers(bit(Rank::Ace), 1).collect::<Vec<_>>(), vec![Rank::King]);
    }

    #[test]
    fn test_two_trips_is_not_full_house() {
        let counts = make_counts(&[(Rank::Nine, 3), (Rank::Four, 3), (Rank::Ace, 1)]);
        let groups = RankGroups::from_counts(&counts);
        assert_eq!(groups.full_house(), None);
        assert_eq!(groups.trips(), Some(Rank::Nine));
        assert_eq!(
            groups.kickers(bit(Rank::Nine), 2).collect::<Vec<_>>(),
            vec![Rank::Ace, Rank::Four]
        );
    }

    #[test]
    fn test_full_house_prefers_higher_pair() {
        let counts = make_counts(&[(Rank::Two, 3), (Rank::Five, 2), (Rank::King, 2)]);
        let groups = RankGroups::from_counts(&counts);
        assert_eq!(groups.full_house(), Some((Rank::Two, Rank::King)));
    }

    #[test]
    fn test_trips_without_pair_is_not_full_house() {
        let counts =
            make_counts(&[(Rank::Ten, 3), (Rank::Five, 1), (Rank::Three, 1), (Rank::Ace, 1)]);
        let groups = RankGroups::from_counts(&counts);
        assert_eq!(groups.trips(), Some(Rank::Ten));
        assert_eq!(groups.full_house(), None);
    }

    #[test]
    fn test_pairs_are_descending() {
        let counts = make_counts(&[
            (Rank::Three, 2),
            (Rank::Ace, 2),
            (Rank::King, 2),
            (Rank::Ten, 1),
        ]);
        let groups = RankGroups::from_counts(&counts);
        let pairs: Vec<Rank> = groups.pairs().collect();
        assert_eq!(pairs, vec![Rank::Ace, Rank::King, Rank::Three]);
    }

    #[test]
    fn test_ordering_is_count_then_rank() {
        let counts = make_counts(&[
            (Rank::Five, 1),
            (Rank::Ace, 1),
            (Rank::Eight, 2),
            (Rank::Ten, 1),
        ]);
        let groups = RankGroups::from_counts(&counts);
        let ranks: Vec<Rank> = groups.as_slice().iter().map(|(r, _)| *r).collect();
        assert_eq!(ranks, vec![Rank::Eight, Rank::Ace, Rank::Ten, Rank::Five]);
    }

    #[test]
    fn test_ranks_desc() {
        let mask = bit(Rank::Two) | bit(Rank::Queen) | bit(Rank::Seven);
        let xs: Vec<Rank> = ranks_desc(mask).collect();
        assert_eq!(xs, vec![Rank::Queen, Rank::Seven, Rank::Two]);
    }
}
