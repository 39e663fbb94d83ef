//! Hands and scoring

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::consts::BLACKJACK;

/// Best total for a set of cards: aces count 11, demoted to 1 one at a time
/// while the total is over 21.
pub fn calculate_score(cards: &[Card]) -> u32 {
    let mut score: u32 = cards.iter().map(Card::value).sum();
    let mut soft_aces = cards.iter().filter(|c| c.is_ace()).count();
    while score > BLACKJACK && soft_aces > 0 {
        score -= 10;
        soft_aces -= 1;
    }
    score
}

/// Append-only hand for one round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
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

    pub fn score(&self) -> u32 {
        calculate_score(&self.cards)
    }

    /// 21 on exactly two cards
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK
    }

    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }
}
