//! Read-only table snapshot for the UI layer

use serde::Serialize;

use super::card::Card;
use super::engine::{BlackjackEngine, RoundPhase};

/// A card as the player sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardFace {
    /// Dealer's hole card before settlement
    Hidden,
    Up {
        rank: &'static str,
        suit: &'static str,
        red: bool,
    },
}

impl From<&Card> for CardFace {
    fn from(card: &Card) -> Self {
        CardFace::Up {
            rank: card.rank.label(),
            suit: card.suit.symbol(),
            red: card.suit.is_red(),
        }
    }
}

/// Everything the table UI renders after an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub phase: RoundPhase,
    pub dealer: Vec<CardFace>,
    pub player: Vec<CardFace>,
    /// `None` while the hole card is hidden or the hand is empty
    pub dealer_score: Option<u32>,
    pub player_score: Option<u32>,
    pub dealer_hidden: bool,
    pub balance: u64,
    pub bet: u64,
    pub message: &'static str,
    pub can_bet: bool,
    pub can_deal: bool,
    pub can_play: bool,
    pub can_start_new: bool,
}

impl TableView {
    /// Dealer score label: `?` while hidden, blank with no cards
    pub fn dealer_score_text(&self) -> String {
        if self.dealer_hidden {
            "?".to_string()
        } else {
            self.dealer_score.map(|s| s.to_string()).unwrap_or_default()
        }
    }

    pub fn player_score_text(&self) -> String {
        self.player_score.map(|s| s.to_string()).unwrap_or_default()
    }

    pub fn balance_text(&self) -> String {
        format!("${}", self.balance)
    }

    pub fn bet_text(&self) -> String {
        format!("${}", self.bet)
    }
}

impl BlackjackEngine {
    /// Snapshot of the table. The dealer's first card stays face down while
    /// the round is in play.
    pub fn view(&self) -> TableView {
        let phase = self.phase();
        let dealer_hidden = phase == RoundPhase::InRound;

        let dealer = self
            .dealer()
            .cards()
            .iter()
            .enumerate()
            .map(|(i, card)| {
                if i == 0 && dealer_hidden {
                    CardFace::Hidden
                } else {
                    CardFace::from(card)
                }
            })
            .collect();
        let player = self.player().cards().iter().map(CardFace::from).collect();

        let dealer_score = if dealer_hidden || self.dealer().is_empty() {
            None
        } else {
            Some(self.dealer().score())
        };
        let player_score = if self.player().is_empty() {
            None
        } else {
            Some(self.player().score())
        };

        TableView {
            phase,
            dealer,
            player,
            dealer_score,
            player_score,
            dealer_hidden,
            balance: self.balance(),
            bet: self.bet(),
            message: self.status_message(),
            can_bet: phase == RoundPhase::Betting,
            can_deal: phase == RoundPhase::Betting && self.bet() > 0,
            can_play: phase == RoundPhase::InRound,
            can_start_new: phase == RoundPhase::RoundOver,
        }
    }
}
