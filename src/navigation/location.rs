//! The three places a player can be.

use serde::{Deserialize, Serialize};

/// Named navigation target.
///
/// Each location has a stable name and a URL-style path:
///
/// | Location | name      | path    |
/// |----------|-----------|---------|
/// | `Start`  | `"start"` | `/`     |
/// | `Game`   | `"game"`  | `/game` |
/// | `End`    | `"end"`   | `/end`  |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Lobby / setup screen. Initial location.
    #[default]
    Start,
    /// In-game screen.
    Game,
    /// Results screen.
    End,
}

impl Location {
    /// Every location, in route-table order.
    pub const ALL: [Location; 3] = [Location::Start, Location::Game, Location::End];

    /// Route name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Location::Start => "start",
            Location::Game => "game",
            Location::End => "end",
        }
    }

    /// Route path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Location::Start => "/",
            Location::Game => "/game",
            Location::End => "/end",
        }
    }

    /// Position in the route table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a route name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }

    /// Resolve a route path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.path() == path)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
