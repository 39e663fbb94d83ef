//! Round engine: betting, dealing, player/dealer turns, settlement
//!
//! Phases run `Betting -> InRound -> RoundOver -> Betting`. Every action
//! checks its phase first and leaves the engine untouched when rejected.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::card::Deck;
use super::error::{Action, ActionError};
use super::hand::Hand;
use crate::consts::{BLACKJACK, DEALER_STAND};

/// Current phase of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Chips can be placed or cleared
    Betting,
    /// Cards dealt, player to act
    InRound,
    /// Round settled, waiting for a new round
    RoundOver,
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundPhase::Betting => "betting",
            RoundPhase::InRound => "a round is in play",
            RoundPhase::RoundOver => "the round is over",
        };
        f.write_str(name)
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Natural 21 against a dealer without 21
    Blackjack,
    /// Natural 21 against a dealer 21
    BlackjackPush,
    PlayerBust,
    DealerBust,
    DealerWins,
    PlayerWins,
    Push,
}

impl Outcome {
    /// Amount returned per bet, in tenths (26 = 2.6x).
    ///
    /// Blackjack pays 2.6x, not 2.5x. This is the house rule.
    pub fn payout_tenths(&self) -> u64 {
        match self {
            Outcome::Blackjack => 26,
            Outcome::DealerBust | Outcome::PlayerWins => 20,
            Outcome::BlackjackPush | Outcome::Push => 10,
            Outcome::PlayerBust | Outcome::DealerWins => 0,
        }
    }

    /// `floor(bet * multiplier)`, saturating at `u64::MAX`
    pub fn payout(&self, bet: u64) -> u64 {
        let tenths = bet as u128 * self.payout_tenths() as u128 / 10;
        u64::try_from(tenths).unwrap_or(u64::MAX)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Blackjack => "Blackjack! You Win!",
            Outcome::BlackjackPush => "Push (Both have Blackjack)!",
            Outcome::PlayerBust => "Bust! You Lose.",
            Outcome::DealerBust => "Dealer Busts! You Win!",
            Outcome::DealerWins => "Dealer Wins!",
            Outcome::PlayerWins => "You Win!",
            Outcome::Push => "Push (Tie)!",
        }
    }
}

/// Settlement record for the last round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub bet: u64,
    /// Amount credited back to the balance
    pub payout: u64,
    pub player_score: u32,
    pub dealer_score: u32,
}

impl RoundResult {
    /// Balance change over the whole round, counting the wager
    pub fn net(&self) -> i128 {
        self.payout as i128 - self.bet as i128
    }
}

/// Single-deck blackjack table
pub struct BlackjackEngine {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    phase: RoundPhase,
    bet: u64,
    balance: u64,
    last_result: Option<RoundResult>,
    rng: Pcg32,
}

impl BlackjackEngine {
    pub fn new(starting_balance: u64, seed: u64) -> Self {
        Self {
            deck: Deck::default(),
            player: Hand::new(),
            dealer: Hand::new(),
            phase: RoundPhase::Betting,
            bet: 0,
            balance: starting_balance,
            last_result: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn require(&self, action: Action, phase: RoundPhase) -> Result<(), ActionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(ActionError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    /// Move `amount` from balance to the bet. Returns the new bet.
    pub fn place_bet(&mut self, amount: u64) -> Result<u64, ActionError> {
        self.require(Action::PlaceBet, RoundPhase::Betting)?;
        if amount == 0 {
            return Err(ActionError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(ActionError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.bet += amount;
        Ok(self.bet)
    }

    /// Return the whole bet to the balance. Returns the refunded amount.
    pub fn clear_bet(&mut self) -> Result<u64, ActionError> {
        self.require(Action::ClearBet, RoundPhase::Betting)?;
        if self.bet == 0 {
            return Err(ActionError::NoBet);
        }
        let refund = self.bet;
        self.balance += refund;
        self.bet = 0;
        Ok(refund)
    }

    /// Shuffle a fresh deck and deal. Returns the result if the player was
    /// dealt a natural 21.
    pub fn deal(&mut self) -> Result<Option<RoundResult>, ActionError> {
        self.check_can_deal()?;
        let mut deck = Deck::fresh();
        deck.shuffle(&mut self.rng);
        self.deal_from(deck)
    }

    /// Deal from a prepared deck: two cards to the player, then two to the dealer.
    pub fn deal_from(&mut self, mut deck: Deck) -> Result<Option<RoundResult>, ActionError> {
        self.check_can_deal()?;
        let (Some(p1), Some(p2), Some(d1), Some(d2)) =
            (deck.draw(), deck.draw(), deck.draw(), deck.draw())
        else {
            return Err(ActionError::DeckExhausted);
        };

        self.player.clear();
        self.dealer.clear();
        self.player.push(p1);
        self.player.push(p2);
        self.dealer.push(d1);
        self.dealer.push(d2);
        self.deck = deck;
        self.last_result = None;
        self.phase = RoundPhase::InRound;
        log::debug!("Dealt: player {} {}, dealer [hidden] {}", p1, p2, d2);

        if self.player.score() == BLACKJACK {
            let outcome = if self.dealer.score() == BLACKJACK {
                Outcome::BlackjackPush
            } else {
                Outcome::Blackjack
            };
            return Ok(Some(self.resolve(outcome)));
        }
        Ok(None)
    }

    fn check_can_deal(&self) -> Result<(), ActionError> {
        self.require(Action::Deal, RoundPhase::Betting)?;
        if self.bet == 0 {
            return Err(ActionError::NoBet);
        }
        Ok(())
    }

    /// Draw one card for the player. Returns the result on a bust.
    pub fn hit(&mut self) -> Result<Option<RoundResult>, ActionError> {
        self.require(Action::Hit, RoundPhase::InRound)?;
        let card = self.deck.draw().ok_or(ActionError::DeckExhausted)?;
        self.player.push(card);
        log::debug!("Hit: {} (player {})", card, self.player.score());

        if self.player.is_bust() {
            return Ok(Some(self.resolve(Outcome::PlayerBust)));
        }
        Ok(None)
    }

    /// Dealer draws to 17, then the round is settled
    pub fn stand(&mut self) -> Result<RoundResult, ActionError> {
        self.require(Action::Stand, RoundPhase::InRound)?;

        while self.dealer.score() < DEALER_STAND {
            match self.deck.draw() {
                Some(card) => {
                    log::debug!("Dealer draws {}", card);
                    self.dealer.push(card);
                }
                None => {
                    log::warn!("Deck ran out during dealer turn at {}", self.dealer.score());
                    break;
                }
            }
        }

        let player = self.player.score();
        let dealer = self.dealer.score();
        let outcome = if dealer > BLACKJACK {
            Outcome::DealerBust
        } else if dealer > player {
            Outcome::DealerWins
        } else if dealer < player {
            Outcome::PlayerWins
        } else {
            Outcome::Push
        };
        Ok(self.resolve(outcome))
    }

    fn resolve(&mut self, outcome: Outcome) -> RoundResult {
        let payout = outcome.payout(self.bet);
        let result = RoundResult {
            outcome,
            bet: self.bet,
            payout,
            player_score: self.player.score(),
            dealer_score: self.dealer.score(),
        };
        self.balance = self.balance.saturating_add(payout);
        self.bet = 0;
        self.phase = RoundPhase::RoundOver;
        self.last_result = Some(result);
        log::info!(
            "{} (player {}, dealer {}, bet {}, paid {}, balance {})",
            outcome.message(),
            result.player_score,
            result.dealer_score,
            result.bet,
            payout,
            self.balance
        );
        result
    }

    /// Clear the table for the next round of betting
    pub fn new_round(&mut self) -> Result<(), ActionError> {
        self.require(Action::NewRound, RoundPhase::RoundOver)?;
        self.player.clear();
        self.dealer.clear();
        self.deck = Deck::default();
        self.last_result = None;
        self.phase = RoundPhase::Betting;
        Ok(())
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// True between the deal and settlement
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::InRound
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Out of chips with nothing on the table
    pub fn is_broke(&self) -> bool {
        self.balance == 0 && self.bet == 0 && self.phase == RoundPhase::Betting
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    pub fn status_message(&self) -> &'static str {
        match self.phase {
            RoundPhase::Betting => "Place your bet",
            RoundPhase::InRound => "Your turn",
            RoundPhase::RoundOver => self
                .last_result
                .map(|r| r.outcome.message())
                .unwrap_or("Round over"),
        }
    }
}
