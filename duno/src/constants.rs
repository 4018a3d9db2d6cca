use strum::EnumCount;

use crate::card::{CardColor, ColoredCard};

/// Copies of each number card in one color, indexed by the number. A single zero.
pub(crate) const NUMBER_COPIES_PER_COLOR: [u8; 10] = [1, 2, 2, 2, 2, 2, 2, 2, 2, 2];
pub(crate) const ACTION_COPIES_PER_COLOR: [(ColoredCard, u8); 3] = [
    (ColoredCard::Skip, 2),
    (ColoredCard::Reverse, 2),
    (ColoredCard::DrawTwo, 2),
];

pub(crate) const WILD_COPIES: u8 = 4;
pub(crate) const WILD_DRAW_FOUR_COPIES: u8 = 4;

pub(crate) const CARDS_PER_COLOR: usize = cards_per_color();

pub const TOTAL_CARDS_IN_DECK: usize =
    CARDS_PER_COLOR * CardColor::COUNT + WILD_COPIES as usize + WILD_DRAW_FOUR_COPIES as usize;

const fn cards_per_color() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < NUMBER_COPIES_PER_COLOR.len() {
        total += NUMBER_COPIES_PER_COLOR[i] as usize;
        i += 1;
    }
    let mut i = 0;
    while i < ACTION_COPIES_PER_COLOR.len() {
        total += ACTION_COPIES_PER_COLOR[i].1 as usize;
        i += 1;
    }
    total
}

pub const PLAYER_COUNT: usize = 2;
pub const INITIAL_HAND_SIZE: usize = 7;

pub const DRAW_TWO_PENALTY: usize = 2;
pub const WILD_DRAW_FOUR_PENALTY: usize = 4;
pub const UNO_PENALTY: usize = 2;

/// Attempts per index before a shuffle gives up on the randomness source.
pub const SHUFFLE_RETRIES: usize = 3;
