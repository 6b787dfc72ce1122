use crate::cards::Card;
use rand::Rng;

/// The cards still unseen in a hand, in encoding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The standard deck minus every card in `known`, in encoding order.
    ///
    /// ```
    /// use holdem_odds::cards::parse_cards;
    /// use holdem_odds::deck::Deck;
    ///
    /// let known = parse_cards("As Ad 7c").unwrap();
    /// let deck = Deck::without(&known);
    /// assert_eq!(deck.as_slice().len(), 49);
    /// assert!(!deck.as_slice().contains(&known[0]));
    /// ```
    pub fn without(known: &[Card]) -> Self {
        let mut dead = [false; Card::COUNT];
        for c in known {
            dead[c.index() as usize] = true;
        }
        Self { cards: Card::all().filter(|c| !dead[c.index() as usize]).collect() }
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

/// Unbiased in-place shuffle: for i from the last index down to 1, swap
/// element i with a uniformly chosen element at an index <= i.
pub fn fisher_yates<T, R: Rng + ?Sized>(xs: &mut [T], rng: &mut R) {
    for i in (1..xs.len()).rev() {
        let j = rng.random_range(0..=i);
        xs.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn nothing_known_leaves_52_distinct_cards() {
        let d = Deck::without(&[]);
        let mut xs = d.as_slice().to_vec();
        xs.dedup();
        assert_eq!(xs.len(), 52);
    }

    #[test]
    fn without_removes_known_cards() {
        let known = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Two, Suit::Clubs)];
        let d = Deck::without(&known);
        assert_eq!(d.as_slice().len(), 50);
        assert!(known.iter().all(|k| !d.as_slice().contains(k)));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = Deck::without(&[]).as_slice().to_vec();
        let mut b = a.clone();
        fisher_yates(&mut a, &mut ChaCha8Rng::seed_from_u64(42));
        fisher_yates(&mut b, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_ne!(a, Deck::without(&[]).as_slice());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut xs = Deck::without(&[]).as_slice().to_vec();
        fisher_yates(&mut xs, &mut ChaCha8Rng::seed_from_u64(9));
        xs.sort();
        assert_eq!(xs, Deck::without(&[]).as_slice());
    }

    #[test]
    fn fisher_yates_on_short_slices() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        fisher_yates(&mut empty, &mut rng);
        let mut one = [7u8];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, [7]);
    }
}
