use rand::{CryptoRng, RngCore};
use strum::IntoEnumIterator;
use tracing::warn;

use crate::{
    card::{Card, CardColor, ColoredCard},
    constants::*,
    error::{Result, UnoError},
};

/// An ordered pile of cards. The end of the vector is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    /// Builds the standard 108 card deck, unshuffled.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK);

        for color in CardColor::iter() {
            for (number, copies) in NUMBER_COPIES_PER_COLOR.iter().enumerate() {
                for _ in 0..*copies {
                    cards.push(Card::Colored(color, ColoredCard::Number(number as u8)));
                }
            }

            for (action, copies) in ACTION_COPIES_PER_COLOR {
                for _ in 0..copies {
                    cards.push(Card::Colored(color, action));
                }
            }
        }

        for _ in 0..WILD_COPIES {
            cards.push(Card::Wild);
        }
        for _ in 0..WILD_DRAW_FOUR_COPIES {
            cards.push(Card::WildDrawFour);
        }

        Self(cards)
    }

    /// A discard pile seeded with a single card.
    pub fn discard_pile(initial_card: Card) -> Self {
        Self(vec![initial_card])
    }

    /// Fisher-Yates shuffle driven by a cryptographically secure source.
    ///
    /// The permutation is built on a copy, so a failing source leaves the deck as it was.
    pub fn shuffle<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<()> {
        let mut cards = self.0.clone();
        for i in (1..cards.len()).rev() {
            let j = secure_index(rng, i)?;
            cards.swap(i, j);
        }
        self.0 = cards;
        Ok(())
    }

    pub fn draw(&mut self) -> Result<Card> {
        self.0.pop().ok_or(UnoError::InsufficientCards {
            requested: 1,
            available: 0,
        })
    }

    /// Removes the top `count` cards, topmost first. Never draws partially.
    pub fn draw_n(&mut self, count: usize) -> Result<Vec<Card>> {
        if count == 0 || count > self.0.len() {
            return Err(UnoError::InsufficientCards {
                requested: count,
                available: self.0.len(),
            });
        }

        let split_at = self.0.len() - count;
        Ok(self.0.drain(split_at..).rev().collect())
    }

    pub fn add_to_bottom(&mut self, card: Card) {
        self.0.insert(0, card);
    }

    pub fn place_on_top(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn top(&self) -> Option<&Card> {
        self.0.last()
    }

    /// Removes everything except the top card, returned bottom first.
    pub fn take_all_but_top(&mut self) -> Vec<Card> {
        let keep_from = self.0.len().saturating_sub(1);
        self.0.drain(..keep_from).collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

/// Uniform index in `0..=upper`, by rejection sampling over whole `u64` reads.
fn secure_index<R: RngCore + CryptoRng>(rng: &mut R, upper: usize) -> Result<usize> {
    let range = upper as u64 + 1;
    let accept_below = u64::MAX - u64::MAX % range;
    loop {
        let value = secure_u64(rng)?;
        if value < accept_below {
            return Ok((value % range) as usize);
        }
    }
}

fn secure_u64<R: RngCore + CryptoRng>(rng: &mut R) -> Result<u64> {
    let mut bytes = [0u8; 8];
    let mut last_error = String::new();
    for attempt in 1..=SHUFFLE_RETRIES {
        match rng.try_fill_bytes(&mut bytes) {
            Ok(()) => return Ok(u64::from_le_bytes(bytes)),
            Err(err) => {
                warn!(attempt, %err, "randomness source failed during shuffle");
                last_error = err.to_string();
            }
        }
    }
    Err(UnoError::Randomness(last_error))
}
