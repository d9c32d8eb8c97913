//! # party-session
//!
//! Shared session state and screen routing for a turn-based party game.
//!
//! ## Design Principles
//!
//! 1. **Plain Data**: Every session field is public. Gameplay code writes
//!    rounds, turns, and scores directly; nothing here validates them.
//!
//! 2. **Total Operations**: Reading, writing, resetting, and navigating
//!    never fail. Only loading configuration from text returns a `Result`.
//!
//! 3. **Explicit Sharing**: A single-threaded host owns a `SessionState`.
//!    Anything wider goes through `SessionStore`, which adds locking and
//!    change notifications.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, session state and reset
//! - `store`: Shared handle with subscriptions
//! - `navigation`: The `start` / `game` / `end` route table
//!
//! ## Example
//!
//! ```
//! use party_session::{Location, Navigator, SessionStore};
//!
//! let store = SessionStore::default();
//! let mut nav = Navigator::new("lobby", "table", "results");
//!
//! nav.navigate(Location::Game);
//! store.update(|s| {
//!     s.players[0].score += 3;
//!     s.advance_turn();
//! });
//!
//! nav.navigate(Location::End);
//! store.reset_game();
//! assert_eq!(store.read(|s| s.players[0].score), 0);
//! assert!(nav.is_active(Location::End));
//! ```

pub mod core;
pub mod store;
pub mod navigation;

pub use crate::core::{
    ConfigError, Player, PlayerId, PlayerSeed, SessionConfig, SessionState,
    DEFAULT_PLAYER_COUNT, DEFAULT_ROUNDS_TO_PLAY, DEFAULT_TIME_LIMIT_PER_TURN,
};

pub use crate::store::{SessionEvent, SessionStore, SubscriptionId, WeakSessionStore};

pub use crate::navigation::{Location, Navigator, Route, Screen};
