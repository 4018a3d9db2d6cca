use std::fmt;

use crate::card::{is_wild_draw_four_valid, Card, CardColor};
use crate::error::{Result, UnoError};

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub hand: Vec<Card>,
    pub has_called_uno: bool,
    pub is_my_turn: bool,
    has_played_card: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            has_called_uno: false,
            is_my_turn: false,
            has_played_card: false,
        }
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    pub fn has_played_card(&self) -> bool {
        self.has_played_card
    }

    /// Any change to the hand invalidates an earlier UNO call.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
        self.reset_uno_call();
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.add_card(card);
        }
    }

    /// Removes the card at `index`. The last card takes its slot.
    pub fn play_card(&mut self, index: usize) -> Result<Card> {
        if index >= self.hand.len() {
            return Err(UnoError::InvalidCardIndex);
        }

        let card = self.hand.swap_remove(index);
        self.has_played_card = true;
        Ok(card)
    }

    /// Indices of the cards in hand that may be played on `top` under `active_color`.
    pub fn valid_plays(&self, top: &Card, active_color: CardColor) -> Vec<usize> {
        let top_matches_active = top.color() == Some(active_color);

        self.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| match card {
                Card::Wild => true,
                Card::WildDrawFour => is_wild_draw_four_valid(&self.hand, active_color),
                _ if top_matches_active => card.can_play_on(top, active_color),
                _ => card.color() == Some(active_color),
            })
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_valid_play(&self, top: &Card, active_color: CardColor) -> bool {
        !self.valid_plays(top, active_color).is_empty()
    }

    pub fn has_won(&self) -> bool {
        self.has_played_card && self.hand.is_empty()
    }

    pub fn should_call_uno(&self) -> bool {
        self.has_played_card && self.hand.len() == 1
    }

    pub fn call_uno(&mut self) {
        self.has_called_uno = true;
    }

    pub fn reset_uno_call(&mut self) {
        self.has_called_uno = false;
    }

    #[cfg(test)]
    pub(crate) fn mark_played(&mut self) {
        self.has_played_card = true;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player {} ({} cards) | Uno({})",
            self.name,
            self.hand.len(),
            self.has_called_uno
        )
    }
}
