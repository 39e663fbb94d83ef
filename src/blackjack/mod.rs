//! Single-deck blackjack
//!
//! One player against the dealer. The deck is rebuilt and shuffled every
//! round, the dealer stands on any 17, and a natural pays 2.6x.

pub mod card;
pub mod engine;
pub mod error;
pub mod hand;
pub mod view;

pub use card::{Card, DECK_SIZE, Deck, RANKS, Rank, SUITS, Suit};
pub use engine::{BlackjackEngine, Outcome, RoundPhase, RoundResult};
pub use error::{Action, ActionError};
pub use hand::{Hand, calculate_score};
pub use view::{CardFace, TableView};
