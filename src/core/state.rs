//! Session state: configuration plus progress.
//!
//! ## Fields
//!
//! - `rounds_to_play`, `time_limit_per_turn`: configuration, untouched by reset
//! - `players`: roster in turn order, identity stable for the session
//! - `current_round`, `current_player_index`: progress, restored by reset
//!
//! Every field is public and writable. Nothing here checks that
//! `current_round <= rounds_to_play` or that `current_player_index` is in
//! range: turn-advancement code owns those rules. Accessors that would need
//! a valid index return `Option` instead of panicking.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use super::config::SessionConfig;
use super::player::{Player, PlayerId};

/// The shared record read by every screen.
///
/// Uses an `im` vector for the roster so snapshots handed to listeners are
/// O(1) clones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    // === Configuration ===
    /// Total rounds configured for the session.
    pub rounds_to_play: u32,

    /// Seconds per turn. Not enforced.
    pub time_limit_per_turn: u32,

    /// Roster in turn order.
    pub players: Vector<Player>,

    // === Progress ===
    /// Round in progress (starts at 1).
    pub current_round: u32,

    /// Index into `players` of whoever's turn it is.
    pub current_player_index: usize,
}

impl Default for SessionState {
    /// 5 rounds, 30 seconds per turn, "Player 1" and "Player 2".
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl SessionState {
    /// Create a fresh session from configuration.
    ///
    /// Starts at round 1 with the first player to act and all scores at 0.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        assert!(!config.players.is_empty(), "Must have at least 1 player");

        Self {
            rounds_to_play: config.rounds_to_play,
            time_limit_per_turn: config.time_limit_per_turn,
            players: config.players.iter().map(|seed| seed.to_player()).collect(),
            current_round: 1,
            current_player_index: 0,
        }
    }

    /// Restore progress for a new game.
    ///
    /// Round goes back to 1, the first player acts, every score is zeroed.
    /// Configuration and roster identity/order are kept. Idempotent.
    pub fn reset_game(&mut self) {
        self.current_round = 1;
        self.current_player_index = 0;
        for player in self.players.iter_mut() {
            player.score = 0;
        }
        debug!("Session reset ({} players, {} rounds)", self.players.len(), self.rounds_to_play);
    }

    // === Roster ===

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player whose turn it is, if the index is in range.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Look up a player by id for mutation.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Replace the roster. The caller keeps it non-empty.
    pub fn set_players(&mut self, players: impl IntoIterator<Item = Player>) {
        self.players = players.into_iter().collect();
    }

    /// Append a player to the end of the turn order.
    pub fn add_player(&mut self, player: Player) {
        self.players.push_back(player);
    }

    // === Configuration ===

    /// Change the number of rounds.
    pub fn set_rounds_to_play(&mut self, rounds: u32) {
        self.rounds_to_play = rounds;
    }

    /// Change the per-turn time limit.
    pub fn set_time_limit_per_turn(&mut self, seconds: u32) {
        self.time_limit_per_turn = seconds;
    }

    // === Progress ===

    /// Add `delta` to the score of the player at `index`.
    ///
    /// Out-of-range indices are ignored.
    pub fn add_score(&mut self, index: usize, delta: i64) {
        if let Some(player) = self.players.get_mut(index) {
            player.score = player.score.saturating_add(delta);
        }
    }

    /// Pass the turn to the next player.
    ///
    /// After the last player the turn wraps to the first and the round
    /// counter moves on. The round is not clamped to `rounds_to_play`;
    /// check `is_over()` to stop.
    pub fn advance_turn(&mut self) {
        let next = self.current_player_index.saturating_add(1);
        if next >= self.players.len() {
            self.current_player_index = 0;
            self.current_round = self.current_round.saturating_add(1);
        } else {
            self.current_player_index = next;
        }
        debug!(
            "Turn advanced to player {} in round {}",
            self.current_player_index, self.current_round
        );
    }

    /// True while the last configured round is in progress (or beyond).
    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.rounds_to_play
    }

    /// True once progress has moved past the last configured round.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.current_round > self.rounds_to_play
    }

    /// Players holding the highest score, in turn order.
    #[must_use]
    pub fn leaders(&self) -> Vec<&Player> {
        let Some(best) = self.players.iter().map(|p| p.score).max() else {
            return Vec::new();
        };
        self.players.iter().filter(|p| p.score == best).collect()
    }
}
