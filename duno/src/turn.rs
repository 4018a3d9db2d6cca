use std::fmt::Debug;

/// Decides who acts next. Keyed by player count so that only this seam changes
/// when more seats are supported.
pub trait TurnOrder: Debug + Send + Sync {
    /// Seat after a normal turn.
    fn next(&self, current: usize, player_count: usize) -> usize;

    /// Seat after the following player is skipped.
    fn skip(&self, current: usize, player_count: usize) -> usize;

    /// Seat after the direction of play is reversed.
    fn reverse(&self, current: usize, player_count: usize) -> usize;
}

/// Alternating turns between two seats. Skipping or reversing lands back on the actor.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoPlayerTurnOrder;

impl TurnOrder for TwoPlayerTurnOrder {
    fn next(&self, current: usize, player_count: usize) -> usize {
        (current + 1) % player_count
    }

    fn skip(&self, current: usize, player_count: usize) -> usize {
        (current + 2) % player_count
    }

    fn reverse(&self, current: usize, _player_count: usize) -> usize {
        current
    }
}

/// What a successful play did to the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnActionResult {
    Neutral,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
    ColorRequested,
    Won,
}
