use std::fmt::Debug;

use thiserror::Error;

use crate::card::{Card, CardColor};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Exactly two players are required, got {0}")]
    WrongPlayerCount(usize),
    #[error("No player sits at index {0}")]
    InvalidPlayerIndex(usize),
    #[error("It's not your turn")]
    NotYourTurn,
    #[error("Game is not in the play phase")]
    WrongPhase,
    #[error("Game is not waiting for a color choice")]
    NotChoosingColor,
    #[error("Invalid card index")]
    InvalidCardIndex,
    #[error("The discard pile is empty")]
    EmptyDiscardPile,
    #[error("{card} cannot be played on {top} while the active color is {active_color}")]
    IllegalCard {
        card: Card,
        top: Card,
        active_color: CardColor,
    },
    #[error("Wild Draw Four can only be played if you don't have any cards of the active color")]
    WildDrawFourRestricted,
    #[error("UNO can only be called with exactly one card left")]
    UnoCallNotAllowed,
    #[error("Challenge rejected: {0}")]
    ChallengeRejected(&'static str),
    #[error("Cannot draw {requested} cards, only {available} left")]
    InsufficientCards { requested: usize, available: usize },
    #[error("No cards left to draw")]
    NoCardsLeft,
    #[error("Randomness source failed: {0}")]
    Randomness(String),
}

impl UnoError {
    /// Validation failures are the caller's mistake and can simply be reported back.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            UnoError::WrongPlayerCount(_)
                | UnoError::InvalidPlayerIndex(_)
                | UnoError::InsufficientCards { .. }
                | UnoError::NoCardsLeft
                | UnoError::Randomness(_)
        )
    }
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
