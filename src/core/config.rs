//! Session configuration.
//!
//! A session is configured once, before play starts:
//! - `rounds_to_play`: how many rounds the session lasts
//! - `time_limit_per_turn`: seconds per turn (informational, never enforced here)
//! - `players`: the starting roster, in turn order
//!
//! Configuration can be built in code or read from TOML:
//!
//! ```toml
//! rounds_to_play = 3
//! time_limit_per_turn = 45
//!
//! [[players]]
//! id = "a"
//! name = "Alice"
//!
//! [[players]]
//! id = "b"
//! name = "Bob"
//! ```
//!
//! Omitted keys fall back to the defaults. Validation happens only when
//! loading from text; the live session never validates.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use super::player::{Player, PlayerId};

/// Default number of rounds in a session.
pub const DEFAULT_ROUNDS_TO_PLAY: u32 = 5;

/// Default turn length in seconds.
pub const DEFAULT_TIME_LIMIT_PER_TURN: u32 = 30;

/// Number of seats in the default roster.
pub const DEFAULT_PLAYER_COUNT: usize = 2;

/// A roster entry as written in configuration (no score).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeed {
    /// Stable identity given to the player.
    pub id: PlayerId,

    /// Display label.
    pub name: String,
}

impl PlayerSeed {
    /// Create a new seed.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Turn the seed into a fresh player with a zero score.
    #[must_use]
    pub fn to_player(&self) -> Player {
        Player::new(self.id.clone(), self.name.clone())
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Total rounds in the session.
    pub rounds_to_play: u32,

    /// Seconds per turn.
    pub time_limit_per_turn: u32,

    /// Starting roster in turn order.
    pub players: Vec<PlayerSeed>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rounds_to_play: DEFAULT_ROUNDS_TO_PLAY,
            time_limit_per_turn: DEFAULT_TIME_LIMIT_PER_TURN,
            players: (1..=DEFAULT_PLAYER_COUNT)
                .map(|n| PlayerSeed::new(n.to_string(), format!("Player {n}")))
                .collect(),
        }
    }
}

impl SessionConfig {
    /// Default configuration (5 rounds, 30 seconds, two players).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds_to_play = rounds;
        self
    }

    /// Set the per-turn time limit in seconds.
    #[must_use]
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit_per_turn = seconds;
        self
    }

    /// Replace the roster.
    #[must_use]
    pub fn with_players(mut self, players: impl IntoIterator<Item = PlayerSeed>) -> Self {
        self.players = players.into_iter().collect();
        self
    }

    /// Append one player to the roster.
    #[must_use]
    pub fn with_player(mut self, id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        self.players.push(PlayerSeed::new(id, name));
        self
    }

    /// Number of configured players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Check that the configuration can start a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds_to_play == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.time_limit_per_turn == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.players.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let mut seen = HashSet::with_capacity(self.players.len());
        for seed in &self.players {
            if !seen.insert(&seed.id) {
                return Err(ConfigError::DuplicatePlayerId(seed.id.to_string()));
            }
        }

        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        debug!("Session config: {:?}", config);
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            "Loaded session config from {} ({} players, {} rounds)",
            path.display(),
            config.player_count(),
            config.rounds_to_play
        );
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::Serialize)
    }
}

/// Errors from loading a session configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    ZeroRounds,
    ZeroTimeLimit,
    EmptyRoster,
    DuplicatePlayerId(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
            ConfigError::ZeroRounds => write!(f, "rounds_to_play must be at least 1"),
            ConfigError::ZeroTimeLimit => write!(f, "time_limit_per_turn must be at least 1"),
            ConfigError::EmptyRoster => write!(f, "at least one player is required"),
            ConfigError::DuplicatePlayerId(id) => write!(f, "duplicate player id: {id}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}
