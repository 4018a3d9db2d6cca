//! Rules and state engine for two-player UNO.
//!
//! A [`GameState`] is dealt once per match and mutated only through [`GameRules`], one
//! command at a time. Rejected commands leave the state exactly as it was.

pub mod card;
pub mod constants;
pub mod deck;
pub mod error;
pub mod player;
pub mod rules;
pub mod state;
pub mod turn;

pub use card::{is_wild_draw_four_valid, Card, CardColor, CardKind, ColoredCard};
pub use deck::Deck;
pub use error::{Result, UnoError};
pub use player::Player;
pub use rules::GameRules;
pub use state::{GameState, PendingEffect, Phase};
pub use turn::{TurnActionResult, TurnOrder, TwoPlayerTurnOrder};
