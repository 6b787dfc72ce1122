use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank, Suit};
use crate::evaluator::{Category, HandEvaluation};

/// Pre-computed analysis of five to seven cards.
/// Built once per evaluation and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    /// Straight over all distinct ranks, regardless of suit.
    pub straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut rank_counts = [0u8; Rank::COUNT];
        let mut suit_counts = [0u8; Suit::COUNT];
        for c in cards {
            rank_counts[c.rank().index() as usize] += 1;
            suit_counts[c.suit().index() as usize] += 1;
        }

        let rank_groups = RankGroups::from_counts(&rank_counts);
        let suit_info = SuitInfo::detect(cards, &suit_counts);
        let straight_info = StraightInfo::detect(rank_groups.present());

        Self { rank_groups, suit_info, straight_info }
    }

    /// Build an evaluation from a category and its tie-break ranks (at most five are kept).
    pub fn build_evaluation<I>(&self, category: Category, tie_break: I) -> HandEvaluation
    where
        I: IntoIterator<Item = Rank>,
    {
        HandEvaluation::new(category, tie_break)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyze(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_royal_flush_analysis() {
        let a = analyze("As Ks Qs Js Ts 2d 3c");
        assert!(a.suit_info.is_flush());
        assert_eq!(a.straight_info.top_rank, Some(Rank::Ace));
        assert_eq!(a.rank_groups.quad(), None);
        assert_eq!(a.rank_groups.trips(), None);
        assert_eq!(a.rank_groups.pairs().count(), 0);
    }

    #[test]
    fn test_flush_and_straight_in_different_suits() {
        // Hearts flush plus a 5-9 straight that mixes suits.
        let a = analyze("5h 6h 7d 8h 9c Kh 2h");
        assert!(a.suit_info.is_flush());
        assert_eq!(a.straight_info.top_rank, Some(Rank::Nine));
    }

    #[test]
    fn test_groups_from_seven() {
        let a = analyze("Qs Qh Qd 7c 7d 2s 3h");
        assert_eq!(a.rank_groups.full_house(), Some((Rank::Queen, Rank::Seven)));
        assert!(!a.suit_info.is_flush());
        assert_eq!(a.straight_info.top_rank, None);
    }
}
