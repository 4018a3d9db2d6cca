use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::{debug, info};

use crate::card::{is_wild_draw_four_valid, Card, CardColor, ColoredCard};
use crate::constants::*;
use crate::error::{Result, UnoError};
use crate::state::{GameState, PendingEffect, Phase};
use crate::turn::{TurnActionResult, TurnOrder, TwoPlayerTurnOrder};

/// Applies commands to a [`GameState`].
///
/// Holds no match data of its own, only the randomness used to reshuffle recycled cards and
/// the turn order. Every mutating command works on a copy of the state and commits it only
/// when the whole command succeeded, so a rejected command never leaves a partial change.
#[derive(Debug)]
pub struct GameRules<R = OsRng> {
    rng: R,
    turn_order: Box<dyn TurnOrder>,
}

impl GameRules<OsRng> {
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for GameRules<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> GameRules<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            turn_order: Box::new(TwoPlayerTurnOrder),
        }
    }

    pub fn with_turn_order(mut self, turn_order: impl TurnOrder + 'static) -> Self {
        self.turn_order = Box::new(turn_order);
        self
    }

    /// Checks that `player` may play the card at `card_index` right now.
    pub fn validate_move(&self, state: &GameState, player: usize, card_index: usize) -> Result<()> {
        let hand_owner = state.player(player)?;

        if state.phase != Phase::Play {
            return Err(UnoError::WrongPhase);
        }
        if state.current_player != player || !hand_owner.is_my_turn {
            return Err(UnoError::NotYourTurn);
        }

        let card = hand_owner
            .hand
            .get(card_index)
            .ok_or(UnoError::InvalidCardIndex)?;
        let top = state.top_card().ok_or(UnoError::EmptyDiscardPile)?;

        if !card.can_play_on(top, state.active_color) {
            return Err(UnoError::IllegalCard {
                card: *card,
                top: *top,
                active_color: state.active_color,
            });
        }
        if *card == Card::WildDrawFour
            && !is_wild_draw_four_valid(&hand_owner.hand, state.active_color)
        {
            return Err(UnoError::WildDrawFourRestricted);
        }

        Ok(())
    }

    /// Plays a card from `player`'s hand onto the discard pile and resolves it.
    ///
    /// A wild card played without `chosen_color` parks the match in color selection until
    /// [`GameRules::choose_color`] is called. A chosen color is ignored for colored cards.
    pub fn play_card(
        &mut self,
        state: &mut GameState,
        player: usize,
        card_index: usize,
        chosen_color: Option<CardColor>,
    ) -> Result<TurnActionResult> {
        self.transact(state, |rules, state| {
            rules.validate_move(state, player, card_index)?;

            let card = state.players[player].play_card(card_index)?;
            state.discard_pile.place_on_top(card);
            state.last_played_by = Some(state.current_player);

            let mut result = match (card, chosen_color) {
                (Card::Wild, None) => {
                    rules.request_color(state, player, PendingEffect::Wild);
                    TurnActionResult::ColorRequested
                }
                (Card::WildDrawFour, None) => {
                    rules.request_color(state, player, PendingEffect::WildDrawFour);
                    TurnActionResult::ColorRequested
                }
                _ => rules.handle_card_effect(state, card, chosen_color)?,
            };

            if state.players[player].has_won() {
                state.phase = Phase::GameOver;
                for seat in state.players.iter_mut() {
                    seat.is_my_turn = false;
                }
                info!(player, name = %state.players[player].name, "game over");
                result = TurnActionResult::Won;
            }

            debug!(player, %card, ?result, "played card");
            Ok(result)
        })
    }

    /// Resolves the effect of `card`, which is already on top of the discard pile.
    pub fn handle_card_effect(
        &mut self,
        state: &mut GameState,
        card: Card,
        chosen_color: Option<CardColor>,
    ) -> Result<TurnActionResult> {
        let current = state.current_player;
        let opponent = self.penalty_target(state, current);

        let result = match card {
            Card::Colored(color, colored_card) => {
                state.active_color = color;
                match colored_card {
                    ColoredCard::Number(_) => {
                        self.next_turn(state);
                        TurnActionResult::Neutral
                    }
                    ColoredCard::Skip => {
                        self.skip_turn(state);
                        TurnActionResult::Skip
                    }
                    ColoredCard::Reverse => {
                        self.reverse_turn(state);
                        TurnActionResult::Reverse
                    }
                    ColoredCard::DrawTwo => {
                        self.force_draw(state, opponent, DRAW_TWO_PENALTY)?;
                        self.skip_turn(state);
                        TurnActionResult::DrawTwo
                    }
                }
            }
            Card::Wild => match chosen_color {
                None => {
                    self.request_color(state, current, PendingEffect::Wild);
                    TurnActionResult::ColorRequested
                }
                Some(color) => {
                    state.active_color = color;
                    self.next_turn(state);
                    TurnActionResult::Wild
                }
            },
            Card::WildDrawFour => match chosen_color {
                None => {
                    self.request_color(state, current, PendingEffect::WildDrawFour);
                    TurnActionResult::ColorRequested
                }
                Some(color) => {
                    state.active_color = color;
                    self.force_draw(state, opponent, WILD_DRAW_FOUR_PENALTY)?;
                    self.skip_turn(state);
                    TurnActionResult::WildDrawFour
                }
            },
        };

        Ok(result)
    }

    /// Supplies the color a pending wild card asked for and finishes resolving it.
    pub fn choose_color(
        &mut self,
        state: &mut GameState,
        player: usize,
        color: CardColor,
    ) -> Result<TurnActionResult> {
        state.player(player)?;
        let Phase::ColorSelection { chooser, pending } = state.phase else {
            return Err(UnoError::NotChoosingColor);
        };
        if player != chooser {
            return Err(UnoError::NotYourTurn);
        }

        self.transact(state, |rules, state| {
            state.active_color = color;
            state.phase = Phase::Play;
            rules.set_turn(state, chooser);

            let result = match pending {
                PendingEffect::Initial => TurnActionResult::Neutral,
                PendingEffect::Wild => {
                    rules.next_turn(state);
                    TurnActionResult::Wild
                }
                PendingEffect::WildDrawFour => {
                    let opponent = rules.penalty_target(state, chooser);
                    rules.force_draw(state, opponent, WILD_DRAW_FOUR_PENALTY)?;
                    rules.skip_turn(state);
                    TurnActionResult::WildDrawFour
                }
            };

            debug!(player, %color, ?result, "chose color");
            Ok(result)
        })
    }

    /// Draws one card for `player`, recycling the discard pile when the draw pile is empty.
    pub fn draw_card(&mut self, state: &mut GameState, player: usize) -> Result<Card> {
        let drawer = state.player(player)?;
        if state.phase != Phase::Play {
            return Err(UnoError::WrongPhase);
        }
        if state.current_player != player || !drawer.is_my_turn {
            return Err(UnoError::NotYourTurn);
        }

        self.transact(state, |rules, state| {
            let card = rules.draw_one(state)?;
            state.players[player].add_card(card);
            debug!(player, %card, "drew card");
            Ok(card)
        })
    }

    pub fn end_turn(&mut self, state: &mut GameState) -> Result<()> {
        if state.phase != Phase::Play {
            return Err(UnoError::WrongPhase);
        }

        let player = state.current_player;
        self.next_turn(state);
        debug!(player, next = state.current_player, "ended turn");
        Ok(())
    }

    pub fn call_uno(&mut self, state: &mut GameState, player: usize) -> Result<()> {
        if state.phase == Phase::GameOver {
            return Err(UnoError::WrongPhase);
        }

        let caller = state.player_mut(player)?;
        if !caller.should_call_uno() {
            return Err(UnoError::UnoCallNotAllowed);
        }

        caller.call_uno();
        debug!(player, "called UNO");
        Ok(())
    }

    /// Penalizes `target` for holding a single card without having called UNO.
    pub fn challenge_uno(&mut self, state: &mut GameState, target: usize) -> Result<()> {
        if state.phase == Phase::GameOver {
            return Err(UnoError::WrongPhase);
        }

        let challenged = state.player(target)?;
        if !challenged.should_call_uno() {
            return Err(UnoError::ChallengeRejected(
                "the target does not have exactly one card",
            ));
        }
        if challenged.has_called_uno {
            return Err(UnoError::ChallengeRejected("the target already called UNO"));
        }

        self.transact(state, |rules, state| {
            rules.force_draw(state, target, UNO_PENALTY)?;
            debug!(target, "UNO challenge succeeded");
            Ok(())
        })
    }

    pub fn next_turn(&self, state: &mut GameState) {
        let seat = self
            .turn_order
            .next(state.current_player, state.players.len());
        self.set_turn(state, seat);
    }

    pub fn skip_turn(&self, state: &mut GameState) {
        let seat = self
            .turn_order
            .skip(state.current_player, state.players.len());
        self.set_turn(state, seat);
    }

    pub fn reverse_turn(&self, state: &mut GameState) {
        let seat = self
            .turn_order
            .reverse(state.current_player, state.players.len());
        self.set_turn(state, seat);
    }

    pub fn repeat_turn(&self, state: &mut GameState) {
        let seat = state.current_player;
        self.set_turn(state, seat);
    }

    fn set_turn(&self, state: &mut GameState, seat: usize) {
        state.current_player = seat;
        for (index, player) in state.players.iter_mut().enumerate() {
            player.is_my_turn = index == seat;
        }
    }

    /// The seat that takes the draw penalty of a card played by `seat`.
    fn penalty_target(&self, state: &GameState, seat: usize) -> usize {
        self.turn_order.next(seat, state.players.len())
    }

    fn request_color(&self, state: &mut GameState, chooser: usize, pending: PendingEffect) {
        state.phase = Phase::ColorSelection { chooser, pending };
        for player in state.players.iter_mut() {
            player.is_my_turn = false;
        }
    }

    fn force_draw(&mut self, state: &mut GameState, seat: usize, count: usize) -> Result<()> {
        for _ in 0..count {
            let card = self.draw_one(state)?;
            state.players[seat].add_card(card);
        }
        Ok(())
    }

    fn draw_one(&mut self, state: &mut GameState) -> Result<Card> {
        if state.draw_pile.is_empty() {
            self.recycle(state)?;
        }
        state.draw_pile.draw().map_err(|_| UnoError::NoCardsLeft)
    }

    /// Moves every discarded card but the top one back under the draw pile and reshuffles.
    fn recycle(&mut self, state: &mut GameState) -> Result<()> {
        if state.discard_pile.len() <= 1 {
            return Err(UnoError::NoCardsLeft);
        }

        let recycled = state.discard_pile.take_all_but_top();
        let moved = recycled.len();
        for card in recycled {
            state.draw_pile.add_to_bottom(card);
        }
        state.draw_pile.shuffle(&mut self.rng)?;

        info!(moved, "recycled discard pile into draw pile");
        Ok(())
    }

    fn transact<T>(
        &mut self,
        state: &mut GameState,
        apply: impl FnOnce(&mut Self, &mut GameState) -> Result<T>,
    ) -> Result<T> {
        let mut next = state.clone();
        match apply(self, &mut next) {
            Ok(value) => {
                *state = next;
                Ok(value)
            }
            Err(err) => {
                debug!(%err, "rejected command");
                Err(err)
            }
        }
    }
}

impl GameState {
    /// Indices of the cards `player` could legally play right now. Empty when it is not their turn.
    pub fn valid_plays(&self, player: usize) -> Vec<usize> {
        let Some(seat) = self.players.get(player) else {
            return Vec::new();
        };
        if self.phase != Phase::Play || self.current_player != player || !seat.is_my_turn {
            return Vec::new();
        }

        match self.top_card() {
            Some(top) => seat.valid_plays(top, self.active_color),
            None => Vec::new(),
        }
    }
}
