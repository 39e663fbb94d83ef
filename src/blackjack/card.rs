//! Cards and the single 52-card deck

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cards in a fresh deck
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

pub const SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

impl Suit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const RANKS: [Rank; 13] = [
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

impl Rank {
    /// Face label as printed on the card
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Count value. Aces start at 11 and are demoted during scoring.
    pub fn value(&self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn value(&self) -> u32 {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Ordered draw pile. Cards are dealt from the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards, suit-major, unshuffled
    pub fn fresh() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in SUITS {
            for rank in RANKS {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Pre-arranged deck. The last card is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Pop the top (last) card
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_deck_is_complete() {
        let deck = Deck::fresh();
        assert_eq!(deck.len(), DECK_SIZE);
        let unique: HashSet<_> = deck.cards().iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut deck = Deck::fresh();
        deck.shuffle(&mut rng);
        assert_eq!(deck.len(), DECK_SIZE);
        let unique: HashSet<_> = deck.cards().iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert_ne!(deck.cards(), Deck::fresh().cards());
    }

    #[test]
    fn test_shuffle_deterministic_per_seed() {
        let mut a = Deck::fresh();
        let mut b = Deck::fresh();
        a.shuffle(&mut Pcg32::seed_from_u64(5));
        b.shuffle(&mut Pcg32::seed_from_u64(5));
        assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn test_draw_pops_from_end() {
        let mut deck = Deck::from_cards(vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(deck.draw(), Some(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!(deck.draw(), Some(Card::new(Rank::Two, Suit::Clubs)));
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Clubs.is_red());
    }
}
