use std::str::FromStr;

use duno::{Card, CardColor, TurnActionResult};

use crate::error::{Result, SessionError};

/// A mutating request against one match. Seats are player indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PlayCard {
        player: usize,
        index: usize,
        color: Option<CardColor>,
    },
    ChooseColor {
        player: usize,
        color: CardColor,
    },
    DrawCard {
        player: usize,
    },
    CallUno {
        player: usize,
    },
    ChallengeUno {
        target: usize,
    },
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    Played(TurnActionResult),
    Drew(Card),
    Ok,
}

/// Maps a color name from the wire onto one of the four choosable colors.
pub fn parse_color(raw: &str) -> Result<CardColor> {
    CardColor::from_str(raw.trim()).map_err(|_| SessionError::InvalidColor(raw.to_string()))
}
