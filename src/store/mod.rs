//! Shared ownership of the session across screens and threads.
//!
//! - `SessionStore`: cloneable handle with read/update/reset
//! - `WeakSessionStore`: non-owning handle for listeners
//! - `SessionEvent`: what listeners are told after each write

pub mod event;
pub mod shared;

pub use event::{SessionEvent, SubscriptionId};
pub use shared::{SessionStore, WeakSessionStore};
