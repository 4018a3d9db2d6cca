//! Runs two-player UNO matches, one actor per match.
//!
//! Each match owns its [`duno::GameState`] inside a task that applies commands one at a time,
//! so two players submitting at once can never interleave inside a single command.

pub mod actor;
pub mod command;
pub mod config;
pub mod error;
pub mod registry;

pub use actor::{MatchHandle, MatchId};
pub use command::{parse_color, Command, Reply};
pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use registry::MatchRegistry;

use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
