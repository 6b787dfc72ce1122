use super::hand_analysis::HandAnalysis;
use super::rank_groups::{bit, ranks_desc};
use crate::cards::Rank;
use crate::evaluator::{Category, HandEvaluation};

/// Strategy pattern: each detector recognises one category and builds its
/// evaluation, or declines so the next detector in precedence order is tried.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation>;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Straight Flush: the hand holds a flush and a straight. The straight is
/// taken over all distinct ranks, so its cards need not share the flush suit.
/// Ace-high is reported as a Royal Flush.
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        if !analysis.suit_info.is_flush() {
            return None;
        }
        let top = analysis.straight_info.top_rank?;
        let category =
            if top == Rank::Ace { Category::RoyalFlush } else { Category::StraightFlush };
        Some(analysis.build_evaluation(category, [top]))
    }
}

/// Four of a Kind: quad rank, then the best remaining card.
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        let groups = &analysis.rank_groups;
        let quad = groups.quad()?;
        let key = std::iter::once(quad).chain(groups.kickers(bit(quad), 1));
        Some(analysis.build_evaluation(Category::FourOfAKind, key))
    }
}

/// Full House: multiplicities begin 3,2.
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        let (trips, pair) = analysis.rank_groups.full_house()?;
        Some(analysis.build_evaluation(Category::FullHouse, [trips, pair]))
    }
}

/// Flush: the five highest cards of the flush suit.
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        if !analysis.suit_info.is_flush() {
            return None;
        }
        let key = ranks_desc(analysis.suit_info.flush_ranks).take(5);
        Some(analysis.build_evaluation(Category::Flush, key))
    }
}

/// Straight: five consecutive ranks; only the top card matters.
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        let top = analysis.straight_info.top_rank?;
        Some(analysis.build_evaluation(Category::Straight, [top]))
    }
}

/// Three of a Kind: trips plus two kickers. With two sets of trips the lower
/// set only supplies a kicker.
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        let groups = &analysis.rank_groups;
        let trips = groups.trips()?;
        let key = std::iter::once(trips).chain(groups.kickers(bit(trips), 2));
        Some(analysis.build_evaluation(Category::ThreeOfAKind, key))
    }
}

/// Two Pair: the two highest pairs plus the best remaining card, which may
/// come from a third pair.
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        let groups = &analysis.rank_groups;
        let mut pairs = groups.pairs();
        let (high, low) = (pairs.next()?, pairs.next()?);
        let key = [high, low].into_iter().chain(groups.kickers(bit(high) | bit(low), 1));
        Some(analysis.build_evaluation(Category::TwoPair, key))
    }
}

/// One Pair: pair plus three kickers.
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        let groups = &analysis.rank_groups;
        let pair = groups.pairs().next()?;
        let key = std::iter::once(pair).chain(groups.kickers(bit(pair), 3));
        Some(analysis.build_evaluation(Category::OnePair, key))
    }
}

/// High Card: the five highest ranks. Always matches.
pub struct HighCardDetector;

impl HighCardDetector {
    pub fn build(&self, analysis: &HandAnalysis) -> HandEvaluation {
        let key = analysis.rank_groups.kickers(0, 5);
        analysis.build_evaluation(Category::HighCard, key)
    }
}

impl CategoryDetector for HighCardDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandEvaluation> {
        Some(self.build(analysis))
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

/// Walk the detectors in precedence order; the first match wins.
pub fn classify(analysis: &HandAnalysis) -> HandEvaluation {
    DETECTORS
        .iter()
        .find_map(|d| d.detect(analysis))
        .unwrap_or_else(|| HighCardDetector.build(analysis))
}
