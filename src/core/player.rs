//! Player identification and roster entries.
//!
//! ## PlayerId
//!
//! Opaque, stable identifier. Unique among the players of one session.
//!
//! ## Player
//!
//! One roster entry: identity, display name, and running score.

use serde::{Deserialize, Serialize};

/// Opaque player identifier.
///
/// The session never interprets the contents; ids are only compared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A player in the session roster.
///
/// All fields are public: gameplay code outside the session writes `score`
/// directly and nothing here validates it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Stable identity for the whole session.
    pub id: PlayerId,

    /// Display label.
    pub name: String,

    /// Running score (starts at 0).
    pub score: i64,
}

impl Player {
    /// Create a player with a zero score.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
        }
    }

    /// Set the starting score (builder pattern).
    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    /// Build the default roster entry for seat `n` (1-based): id `"n"`, name `"Player n"`.
    #[must_use]
    pub fn numbered(n: usize) -> Self {
        Self::new(n.to_string(), format!("Player {n}"))
    }
}
