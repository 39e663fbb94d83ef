//! Rejected table actions
//!
//! A rejected action never changes engine state. Callers that only want
//! silent no-op behavior can ignore the error.

use thiserror::Error;

use super::engine::RoundPhase;

/// Player-facing table actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PlaceBet,
    ClearBet,
    Deal,
    Hit,
    Stand,
    NewRound,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::PlaceBet => "place bet",
            Action::ClearBet => "clear bet",
            Action::Deal => "deal",
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::NewRound => "new round",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("cannot {action} while {phase}")]
    WrongPhase { action: Action, phase: RoundPhase },
    #[error("bet amount must be positive")]
    InvalidAmount,
    #[error("insufficient balance: bet {requested}, have {available}")]
    InsufficientBalance { requested: u64, available: u64 },
    #[error("no bet placed")]
    NoBet,
    #[error("deck is out of cards")]
    DeckExhausted,
}
