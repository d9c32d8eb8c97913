//! Core session types: players, configuration, state.
//!
//! These are plain owned values. Single-threaded hosts can hold a
//! `SessionState` directly; shared access goes through `store`.

pub mod player;
pub mod config;
pub mod state;

pub use player::{Player, PlayerId};
pub use config::{
    ConfigError, PlayerSeed, SessionConfig, DEFAULT_PLAYER_COUNT, DEFAULT_ROUNDS_TO_PLAY,
    DEFAULT_TIME_LIMIT_PER_TURN,
};
pub use state::SessionState;
