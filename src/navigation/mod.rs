//! Screen routing.
//!
//! Three fixed locations (`start`, `game`, `end`) each map to a screen.
//! The navigator is pure configuration plus "which one is showing"; it holds
//! no game logic and no history.

pub mod location;
pub mod navigator;

pub use location::Location;
pub use navigator::{Navigator, Route, Screen};
