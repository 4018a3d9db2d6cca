use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use duno::{GameState, Player};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::actor::{MatchHandle, MatchId};
use crate::command::{Command, Reply};
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};

/// Every running match, keyed by id.
#[derive(Debug)]
pub struct MatchRegistry {
    config: SessionConfig,
    next_id: AtomicU64,
    matches: Mutex<HashMap<MatchId, MatchHandle>>,
}

impl MatchRegistry {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(1),
            matches: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Deals a new match for the named players and starts its actor.
    pub async fn create(&self, player_names: Vec<String>) -> Result<MatchHandle> {
        let players = player_names.into_iter().map(Player::new).collect();
        let state = GameState::new(players)?;
        Ok(self.insert(state).await)
    }

    /// Starts an actor for a match that was dealt or restored elsewhere.
    pub async fn insert(&self, state: GameState) -> MatchHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = MatchHandle::spawn(id, state, &self.config);

        let mut matches = self.matches.lock().await;
        sweep_closed(&mut matches);
        matches.insert(id, handle.clone());
        info!(match_id = id, running = matches.len(), "registered match");

        handle
    }

    /// Looks up a running match. Matches whose actor has stopped are dropped on the way.
    pub async fn get(&self, id: MatchId) -> Result<MatchHandle> {
        let mut matches = self.matches.lock().await;
        match matches.get(&id) {
            Some(handle) if !handle.is_closed() => Ok(handle.clone()),
            Some(_) => {
                matches.remove(&id);
                Err(SessionError::UnknownMatch(id))
            }
            None => Err(SessionError::UnknownMatch(id)),
        }
    }

    pub async fn send(&self, id: MatchId, command: Command) -> Result<Reply> {
        self.get(id).await?.send(command).await
    }

    pub async fn remove(&self, id: MatchId) -> Option<MatchHandle> {
        self.matches.lock().await.remove(&id)
    }

    /// Running matches. Stopped actors are swept out first.
    pub async fn len(&self) -> usize {
        let mut matches = self.matches.lock().await;
        sweep_closed(&mut matches);
        matches.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn sweep_closed(matches: &mut HashMap<MatchId, MatchHandle>) {
    let before = matches.len();
    matches.retain(|_, handle| !handle.is_closed());
    let swept = before - matches.len();
    if swept > 0 {
        debug!(swept, "dropped stopped matches");
    }
}
