use duno::{CardColor, GameRules, GameState, Phase};
use rand::{CryptoRng, RngCore};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{timeout, Duration},
};
use tracing::{debug, info, warn};

use crate::command::{Command, Reply};
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};

pub type MatchId = u64;

struct Envelope {
    command: Command,
    reply: oneshot::Sender<Result<Reply>>,
}

/// Cloneable access to one running match.
///
/// Commands go through the match's single actor and are applied strictly one after another.
/// Reads are served from the last published state and never wait on the actor.
#[derive(Clone, Debug)]
pub struct MatchHandle {
    id: MatchId,
    commands: mpsc::Sender<Envelope>,
    state: watch::Receiver<GameState>,
}

impl MatchHandle {
    pub fn spawn(id: MatchId, state: GameState, config: &SessionConfig) -> Self {
        Self::spawn_with_rules(id, state, GameRules::new(), config)
    }

    pub fn spawn_with_rules<R>(
        id: MatchId,
        state: GameState,
        rules: GameRules<R>,
        config: &SessionConfig,
    ) -> Self
    where
        R: RngCore + CryptoRng + Send + 'static,
    {
        let (commands, inbox) = mpsc::channel(config.command_buffer);
        let (published, state_rx) = watch::channel(state.clone());

        let actor = MatchActor {
            id,
            state,
            rules,
            inbox,
            published,
            idle_timeout: config.idle_timeout,
        };
        tokio::spawn(actor.run());

        Self {
            id,
            commands,
            state: state_rx,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Submits a command and waits for the actor's verdict.
    pub async fn send(&self, command: Command) -> Result<Reply> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Envelope { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)?
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    pub fn snapshot(&self) -> GameState {
        self.state.borrow().clone()
    }

    pub fn valid_plays(&self, player: usize) -> Vec<usize> {
        self.state.borrow().valid_plays(player)
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    pub fn active_color(&self) -> CardColor {
        self.state.borrow().active_color()
    }

    pub fn current_player(&self) -> usize {
        self.state.borrow().current_player()
    }
}

struct MatchActor<R> {
    id: MatchId,
    state: GameState,
    rules: GameRules<R>,
    inbox: mpsc::Receiver<Envelope>,
    published: watch::Sender<GameState>,
    idle_timeout: Duration,
}

impl<R: RngCore + CryptoRng> MatchActor<R> {
    async fn run(mut self) {
        info!(match_id = self.id, "match started");

        loop {
            let envelope = match timeout(self.idle_timeout, self.inbox.recv()).await {
                Ok(Some(envelope)) => envelope,
                Ok(None) => {
                    info!(match_id = self.id, "every handle dropped, closing match");
                    break;
                }
                Err(_) => {
                    warn!(
                        match_id = self.id,
                        idle_timeout = ?self.idle_timeout,
                        "no command within the idle timeout, closing match"
                    );
                    break;
                }
            };

            let outcome = self.apply(envelope.command);
            match &outcome {
                Ok(_) => {
                    self.published.send_replace(self.state.clone());
                }
                Err(err) => {
                    debug!(match_id = self.id, command = ?envelope.command, %err, "command rejected");
                }
            }

            // The requester may have stopped waiting; the command still took effect.
            let _ = envelope.reply.send(outcome);

            if self.state.phase() == Phase::GameOver {
                info!(match_id = self.id, winner = ?self.state.winner(), "match finished");
                break;
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Reply> {
        let state = &mut self.state;
        let reply = match command {
            Command::PlayCard {
                player,
                index,
                color,
            } => Reply::Played(self.rules.play_card(state, player, index, color)?),
            Command::ChooseColor { player, color } => {
                Reply::Played(self.rules.choose_color(state, player, color)?)
            }
            Command::DrawCard { player } => Reply::Drew(self.rules.draw_card(state, player)?),
            Command::CallUno { player } => {
                self.rules.call_uno(state, player)?;
                Reply::Ok
            }
            Command::ChallengeUno { target } => {
                self.rules.challenge_uno(state, target)?;
                Reply::Ok
            }
            Command::EndTurn => {
                self.rules.end_turn(state)?;
                Reply::Ok
            }
        };

        debug!(match_id = self.id, ?command, ?reply, "command applied");
        Ok(reply)
    }
}
