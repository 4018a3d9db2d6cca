use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::info;

use crate::card::{Card, CardColor, ColoredCard};
use crate::constants::*;
use crate::deck::Deck;
use crate::error::{Result, UnoError};
use crate::player::Player;

/// What resolves once the pending color has been chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingEffect {
    /// The flipped starting card was wild. Any draw it forced already happened.
    Initial,
    Wild,
    WildDrawFour,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Play,
    ColorSelection {
        chooser: usize,
        pending: PendingEffect,
    },
    GameOver,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) players: [Player; PLAYER_COUNT],
    pub(crate) current_player: usize,
    pub(crate) draw_pile: Deck,
    pub(crate) discard_pile: Deck,
    pub(crate) active_color: CardColor,
    pub(crate) phase: Phase,
    pub(crate) last_played_by: Option<usize>,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Result<Self> {
        Self::new_with_rng(players, &mut OsRng)
    }

    /// Deals a fresh match: shuffle, seven cards each, flip the starting card and apply its effect.
    pub fn new_with_rng<R: RngCore + CryptoRng>(players: Vec<Player>, rng: &mut R) -> Result<Self> {
        let players = seat_players(players)?;

        let mut deck = Deck::new();
        deck.shuffle(rng)?;

        let mut state = GameState {
            players,
            current_player: 0,
            draw_pile: Deck::default(),
            discard_pile: Deck::default(),
            active_color: CardColor::Red,
            phase: Phase::Setup,
            last_played_by: None,
        };

        for player in &mut state.players {
            player.add_cards(deck.draw_n(INITIAL_HAND_SIZE)?);
        }

        let initial_card = deck.draw()?;
        state.discard_pile = Deck::discard_pile(initial_card);
        state.draw_pile = deck;
        state.active_color = initial_card.color().unwrap_or(CardColor::Red);

        let second_player = state.opponent_of(state.current_player);
        let next_phase = match initial_card {
            // Skip and Reverse collapse to the first player keeping the turn.
            Card::Colored(_, ColoredCard::Number(_) | ColoredCard::Skip | ColoredCard::Reverse) => {
                Phase::Play
            }
            Card::Colored(_, ColoredCard::DrawTwo) => {
                let cards = state.draw_pile.draw_n(DRAW_TWO_PENALTY)?;
                state.players[second_player].add_cards(cards);
                Phase::Play
            }
            Card::Wild => Phase::ColorSelection {
                chooser: state.current_player,
                pending: PendingEffect::Initial,
            },
            Card::WildDrawFour => {
                let cards = state.draw_pile.draw_n(WILD_DRAW_FOUR_PENALTY)?;
                state.players[second_player].add_cards(cards);
                Phase::ColorSelection {
                    chooser: state.current_player,
                    pending: PendingEffect::Initial,
                }
            }
        };

        state.phase = next_phase;
        if state.phase == Phase::Play {
            state.players[state.current_player].is_my_turn = true;
        }

        info!(
            %initial_card,
            active_color = %state.active_color,
            phase = ?state.phase,
            "dealt new match"
        );

        Ok(state)
    }

    /// Rebuilds a match in progress, with `current_player` about to act in the play phase.
    pub fn from_parts(
        players: Vec<Player>,
        draw_pile: Deck,
        discard_pile: Deck,
        active_color: CardColor,
        current_player: usize,
    ) -> Result<Self> {
        let mut players = seat_players(players)?;
        if current_player >= players.len() {
            return Err(UnoError::InvalidPlayerIndex(current_player));
        }
        if discard_pile.is_empty() {
            return Err(UnoError::EmptyDiscardPile);
        }

        for (seat, player) in players.iter_mut().enumerate() {
            player.is_my_turn = seat == current_player;
        }

        Ok(GameState {
            players,
            current_player,
            draw_pile,
            discard_pile,
            active_color,
            phase: Phase::Play,
            last_played_by: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Result<&Player> {
        self.players
            .get(seat)
            .ok_or(UnoError::InvalidPlayerIndex(seat))
    }

    pub fn player_mut(&mut self, seat: usize) -> Result<&mut Player> {
        self.players
            .get_mut(seat)
            .ok_or(UnoError::InvalidPlayerIndex(seat))
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_color(&self) -> CardColor {
        self.active_color
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.top()
    }

    pub fn draw_pile(&self) -> &Deck {
        &self.draw_pile
    }

    pub fn draw_pile_mut(&mut self) -> &mut Deck {
        &mut self.draw_pile
    }

    pub fn discard_pile(&self) -> &Deck {
        &self.discard_pile
    }

    pub fn discard_pile_mut(&mut self) -> &mut Deck {
        &mut self.discard_pile
    }

    pub fn last_played_by(&self) -> Option<usize> {
        self.last_played_by
    }

    pub fn winner(&self) -> Option<usize> {
        if self.phase != Phase::GameOver {
            return None;
        }
        self.players.iter().position(Player::has_won)
    }

    /// Cards across both piles and every hand. Always [`TOTAL_CARDS_IN_DECK`] once dealt.
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + self.players.iter().map(Player::hand_size).sum::<usize>()
    }

    pub(crate) fn opponent_of(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }
}

fn seat_players(players: Vec<Player>) -> Result<[Player; PLAYER_COUNT]> {
    let count = players.len();
    players
        .try_into()
        .map_err(|_| UnoError::WrongPlayerCount(count))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn two_players() -> Vec<Player> {
        vec![Player::new("Player 1"), Player::new("Player 2")]
    }

    #[test]
    fn return_err_if_wrong_player_count() {
        let error = GameState::new(vec![Player::new("Player 1")]).unwrap_err();
        assert_eq!(error, UnoError::WrongPlayerCount(1));

        let mut players = two_players();
        players.push(Player::new("Player 3"));
        let error = GameState::new(players).unwrap_err();
        assert_eq!(error, UnoError::WrongPlayerCount(3));
    }

    #[test]
    fn new_match_conserves_every_card() {
        for seed in 0..64 {
            let state =
                GameState::new_with_rng(two_players(), &mut ChaCha20Rng::seed_from_u64(seed))
                    .unwrap();

            assert_eq!(state.total_cards(), TOTAL_CARDS_IN_DECK);
            assert_eq!(state.discard_pile().len(), 1);
            assert_eq!(state.current_player(), 0);
            assert_eq!(state.last_played_by(), None);
        }
    }

    #[test]
    fn initial_card_effects_are_applied() {
        for seed in 0..256 {
            let state =
                GameState::new_with_rng(two_players(), &mut ChaCha20Rng::seed_from_u64(seed))
                    .unwrap();
            let initial_card = *state.top_card().unwrap();
            let first = &state.players()[0];
            let second = &state.players()[1];

            assert_eq!(first.hand_size(), INITIAL_HAND_SIZE);

            match initial_card {
                Card::Colored(color, card) => {
                    assert_eq!(state.active_color(), color);
                    assert_eq!(state.phase(), Phase::Play);
                    assert!(first.is_my_turn);
                    assert!(!second.is_my_turn);

                    let expected = match card {
                        ColoredCard::DrawTwo => INITIAL_HAND_SIZE + DRAW_TWO_PENALTY,
                        _ => INITIAL_HAND_SIZE,
                    };
                    assert_eq!(second.hand_size(), expected);
                    assert_eq!(
                        state.draw_pile().len(),
                        TOTAL_CARDS_IN_DECK - 1 - INITIAL_HAND_SIZE - expected
                    );
                }
                Card::Wild | Card::WildDrawFour => {
                    assert_eq!(state.active_color(), CardColor::Red);
                    assert_eq!(
                        state.phase(),
                        Phase::ColorSelection {
                            chooser: 0,
                            pending: PendingEffect::Initial
                        }
                    );
                    assert!(!first.is_my_turn && !second.is_my_turn);

                    let expected = if initial_card == Card::WildDrawFour {
                        INITIAL_HAND_SIZE + WILD_DRAW_FOUR_PENALTY
                    } else {
                        INITIAL_HAND_SIZE
                    };
                    assert_eq!(second.hand_size(), expected);
                }
            }
        }
    }

    #[test]
    fn from_parts_puts_the_current_player_on_turn() {
        let state = GameState::from_parts(
            two_players(),
            Deck::new(),
            Deck::discard_pile(Card::Colored(CardColor::Blue, ColoredCard::Number(4))),
            CardColor::Blue,
            1,
        )
        .unwrap();

        assert_eq!(state.phase(), Phase::Play);
        assert!(!state.players()[0].is_my_turn);
        assert!(state.players()[1].is_my_turn);
    }

    #[test]
    fn from_parts_rejects_an_empty_discard_pile() {
        let error = GameState::from_parts(
            two_players(),
            Deck::new(),
            Deck::default(),
            CardColor::Blue,
            0,
        )
        .unwrap_err();

        assert_eq!(error, UnoError::EmptyDiscardPile);
    }

    #[test]
    fn winner_is_only_reported_once_game_is_over() {
        let mut state =
            GameState::new_with_rng(two_players(), &mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        let player = state.player_mut(1).unwrap();
        player.mark_played();
        player.hand.clear();

        assert_eq!(state.winner(), None);

        state.phase = Phase::GameOver;
        assert_eq!(state.winner(), Some(1));
    }
}
