use holdem_odds::cards::{Card, Rank, Suit};
use holdem_odds::evaluator::{best_five_of, compare, evaluate, evaluate_seven, Category};
use proptest::prelude::*;
use std::cmp::Ordering;

fn all_cards() -> Vec<Card> {
    Card::all().collect()
}

/// Seven distinct cards in random order.
fn any_seven() -> impl Strategy<Value = [Card; 7]> {
    prop::sample::subsequence(all_cards(), 7)
        .prop_shuffle()
        .prop_map(|v| <[Card; 7]>::try_from(v).expect("seven cards"))
}

/// Seven distinct cards that include one ace, two, three, four and five.
fn any_wheel_hand() -> impl Strategy<Value = [Card; 7]> {
    let suit = || prop::sample::select(Suit::ALL.to_vec());
    let wheel_ranks = [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five];
    (prop::array::uniform5(suit()), prop::sample::subsequence(all_cards(), 7)).prop_map(
        move |(suits, pool)| {
            let mut cards: Vec<Card> =
                wheel_ranks.iter().zip(suits).map(|(r, s)| Card::new(*r, s)).collect();
            for c in pool {
                if cards.len() == 7 {
                    break;
                }
                if !cards.contains(&c) {
                    cards.push(c);
                }
            }
            <[Card; 7]>::try_from(cards).expect("seven cards")
        },
    )
}

/// Two sets of trips and one odd card.
fn any_two_trips() -> impl Strategy<Value = [Card; 7]> {
    let three_suits = || prop::sample::subsequence(Suit::ALL.to_vec(), 3);
    (
        Just(Rank::ALL.to_vec()).prop_shuffle(),
        three_suits(),
        three_suits(),
        prop::sample::select(Suit::ALL.to_vec()),
    )
        .prop_map(|(ranks, first, second, odd)| {
            let mut cards: Vec<Card> = first.into_iter().map(|s| Card::new(ranks[0], s)).collect();
            cards.extend(second.into_iter().map(|s| Card::new(ranks[1], s)));
            cards.push(Card::new(ranks[2], odd));
            <[Card; 7]>::try_from(cards).expect("seven cards")
        })
}

/// A straight with three cards in one suit and two in any suit, plus two more
/// cards of that first suit, so the hand also holds a flush.
fn any_flush_with_straight() -> impl Strategy<Value = [Card; 7]> {
    let suit = || prop::sample::select(Suit::ALL.to_vec());
    (0usize..=8, suit(), prop::array::uniform2(suit()), Just(Rank::ALL.to_vec()).prop_shuffle())
        .prop_map(|(low, flush_suit, loose, ranks)| {
            let all = Rank::ALL;
            let window = &all[low..low + 5];
            let mut cards: Vec<Card> = window
                .iter()
                .enumerate()
                .map(|(i, r)| Card::new(*r, if i < 3 { flush_suit } else { loose[i - 3] }))
                .collect();
            let extra = ranks.into_iter().filter(|r| !window.contains(r)).take(2);
            cards.extend(extra.map(|r| Card::new(r, flush_suit)));
            <[Card; 7]>::try_from(cards).expect("seven cards")
        })
}

fn has_two_trips(cards: &[Card; 7]) -> bool {
    let mut counts = [0u8; Rank::COUNT];
    for c in cards {
        counts[c.rank().index() as usize] += 1;
    }
    counts.iter().filter(|&&n| n == 3).count() >= 2
}

fn is_straight_flush(category: Category) -> bool {
    matches!(category, Category::StraightFlush | Category::RoyalFlush)
}

proptest! {
    #[test]
    fn seven_card_evaluation_matches_best_of_21(cards in any_seven()) {
        let seven = evaluate_seven(&cards);
        prop_assume!(!has_two_trips(&cards) && !is_straight_flush(seven.category));
        prop_assert_eq!(Some(seven), best_five_of(&cards));
    }

    #[test]
    fn flush_with_any_straight_is_a_straight_flush(cards in any_flush_with_straight()) {
        let seven = evaluate_seven(&cards);
        prop_assert!(is_straight_flush(seven.category));
        let best = best_five_of(&cards).unwrap();
        prop_assert!(best.category >= Category::Flush);
        prop_assert!(best <= seven);
    }

    #[test]
    fn two_trips_rank_as_three_of_a_kind(cards in any_two_trips()) {
        prop_assert!(has_two_trips(&cards));
        prop_assert_eq!(evaluate_seven(&cards).category, Category::ThreeOfAKind);
        prop_assert_eq!(best_five_of(&cards).unwrap().category, Category::FullHouse);
    }

    #[test]
    fn every_hand_gets_one_known_category(cards in any_seven()) {
        let e = evaluate(&cards).unwrap();
        prop_assert!(Category::ALL.contains(&e.category));
        prop_assert!(!e.tie_break().is_empty() && e.tie_break().len() <= 5);
    }

    #[test]
    fn comparison_is_reflexive(cards in any_seven()) {
        let e = evaluate_seven(&cards);
        prop_assert_eq!(compare(&e, &e), Ordering::Equal);
    }

    #[test]
    fn ordering_is_antisymmetric_and_transitive(a in any_seven(), b in any_seven(), c in any_seven()) {
        let (ea, eb, ec) = (evaluate_seven(&a), evaluate_seven(&b), evaluate_seven(&c));

        prop_assert_eq!(compare(&ea, &eb), compare(&eb, &ea).reverse());
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
    }

    #[test]
    fn category_decides_before_tie_break(a in any_seven(), b in any_seven()) {
        let (ea, eb) = (evaluate_seven(&a), evaluate_seven(&b));
        if ea.category != eb.category {
            prop_assert_eq!(compare(&ea, &eb), ea.category.cmp(&eb.category));
        }
    }

    #[test]
    fn card_order_does_not_matter(cards in any_seven()) {
        let mut reversed = cards;
        reversed.reverse();
        prop_assert_eq!(evaluate_seven(&cards), evaluate_seven(&reversed));
    }

    #[test]
    fn wheel_ranks_are_at_least_a_straight(cards in any_wheel_hand()) {
        prop_assert!(evaluate_seven(&cards).category >= Category::Straight);
    }
}
