use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

/// One of the four colors a card can carry or a wild card can be declared as.
#[derive(
    Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq, Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum CardColor {
    Red,
    Blue,
    Green,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColoredCard {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

/// The kind of a card irrespective of its color.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum CardKind {
    Number,
    Skip,
    Reverse,
    #[strum(to_string = "Draw Two")]
    DrawTwo,
    #[strum(to_string = "Wild")]
    WildCard,
    #[strum(to_string = "Wild Draw Four")]
    WildDrawFour,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Card {
    Colored(CardColor, ColoredCard),
    Wild,
    WildDrawFour,
}

impl Card {
    /// The printed color, `None` for the two wild cards.
    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        self.color().is_none()
    }

    pub fn kind(&self) -> CardKind {
        match self {
            Card::Colored(_, ColoredCard::Number(_)) => CardKind::Number,
            Card::Colored(_, ColoredCard::Skip) => CardKind::Skip,
            Card::Colored(_, ColoredCard::Reverse) => CardKind::Reverse,
            Card::Colored(_, ColoredCard::DrawTwo) => CardKind::DrawTwo,
            Card::Wild => CardKind::WildCard,
            Card::WildDrawFour => CardKind::WildDrawFour,
        }
    }

    pub fn value(&self) -> Option<u8> {
        match self {
            Card::Colored(_, ColoredCard::Number(number)) => Some(*number),
            _ => None,
        }
    }

    /// Whether this card may be proposed on top of `top` while `active_color` is in force.
    ///
    /// Wild cards are always proposable; the Wild Draw Four hand restriction is checked
    /// separately with [`is_wild_draw_four_valid`].
    pub fn can_play_on(&self, top: &Card, active_color: CardColor) -> bool {
        let Card::Colored(color, card) = self else {
            return true;
        };

        let Card::Colored(top_color, top_card) = top else {
            return *color == active_color;
        };

        if color == top_color {
            return true;
        }

        match (card, top_card) {
            (ColoredCard::Number(number), ColoredCard::Number(top_number)) => number == top_number,
            (ColoredCard::Skip, ColoredCard::Skip)
            | (ColoredCard::Reverse, ColoredCard::Reverse)
            | (ColoredCard::DrawTwo, ColoredCard::DrawTwo) => true,
            _ => false,
        }
    }
}

/// A Wild Draw Four may only be played while the hand holds no card of the active color.
pub fn is_wild_draw_four_valid(hand: &[Card], active_color: CardColor) -> bool {
    !hand
        .iter()
        .any(|card| card.color() == Some(active_color))
}

impl Display for ColoredCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColoredCard::Number(number) => write!(f, "{number}"),
            ColoredCard::Skip => write!(f, "Skip"),
            ColoredCard::Reverse => write!(f, "Reverse"),
            ColoredCard::DrawTwo => write!(f, "Draw Two"),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, card) => write!(f, "{color} {card}"),
            Card::Wild => write!(f, "Wild"),
            Card::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}
