//! Shared session handle.
//!
//! `SessionStore` is the process-wide owner of the session. Clones share
//! one `SessionState` behind a `RwLock`, so screens on any thread read the
//! latest write.
//!
//! Every write queues a snapshot while it still holds the write lock, so the
//! queue is in write order. One caller at a time drains the queue; writers
//! that find a drain in progress leave their snapshot for it. Listeners
//! therefore see writes in the order they happened, and the last delivery is
//! always the latest state. Callbacks run with no lock held and may read,
//! write, subscribe or unsubscribe. Writes made from a callback are delivered
//! after it returns.
//!
//! Listeners that need the store should capture a `WeakSessionStore`
//! (`SessionStore::downgrade`). A strong clone inside a listener keeps the
//! store alive until that listener is unsubscribed.
//!
//! Reads, writes, reset and subscription calls never fail. A poisoned lock
//! (a panicking writer) is recovered and the state is used as the writer
//! left it.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};

use log::debug;

use super::event::{SessionEvent, SubscriptionId};
use crate::core::{SessionConfig, SessionState};

type Listener = Arc<dyn Fn(SessionEvent, &SessionState) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u32,
    by_id: FxHashMap<SubscriptionId, Listener>,
}

/// Snapshots waiting for delivery, in write order.
#[derive(Default)]
struct Outbox {
    pending: VecDeque<(SessionEvent, SessionState)>,
    draining: bool,
}

/// Clears `draining` when a listener panics mid-drain.
struct DrainGuard<'a> {
    outbox: &'a Mutex<Outbox>,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock_outbox(self.outbox).draining = false;
        }
    }
}

fn lock_outbox(outbox: &Mutex<Outbox>) -> MutexGuard<'_, Outbox> {
    outbox.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable handle to the one session record.
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    listeners: Arc<RwLock<Listeners>>,
    outbox: Arc<Mutex<Outbox>>,
}

/// Non-owning handle, for listeners that call back into the store.
#[derive(Clone, Default)]
pub struct WeakSessionStore {
    state: Weak<RwLock<SessionState>>,
    listeners: Weak<RwLock<Listeners>>,
    outbox: Weak<Mutex<Outbox>>,
}

impl WeakSessionStore {
    /// Get a strong handle, or `None` once every `SessionStore` is gone.
    #[must_use]
    pub fn upgrade(&self) -> Option<SessionStore> {
        Some(SessionStore {
            state: self.state.upgrade()?,
            listeners: self.listeners.upgrade()?,
            outbox: self.outbox.upgrade()?,
        })
    }
}

impl SessionStore {
    /// Wrap an existing state.
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            listeners: Arc::default(),
            outbox: Arc::default(),
        }
    }

    /// Create a store holding a fresh session for `config`.
    ///
    /// Panics if `config` has no players.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(SessionState::new(config))
    }

    /// Non-owning handle to this store.
    #[must_use]
    pub fn downgrade(&self) -> WeakSessionStore {
        WeakSessionStore {
            state: Arc::downgrade(&self.state),
            listeners: Arc::downgrade(&self.listeners),
            outbox: Arc::downgrade(&self.outbox),
        }
    }

    // === Reads ===

    /// Run `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&*self.read_guard())
    }

    /// Copy of the current state. The roster is shared structurally, so
    /// this is cheap.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.read_guard().clone()
    }

    // === Writes ===

    /// Apply a direct mutation and notify listeners with `Updated`.
    ///
    /// Nothing is validated; the closure may write any field.
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let result = {
            let mut state = self.write_guard();
            let result = f(&mut *state);
            self.enqueue(SessionEvent::Updated, &state);
            result
        };
        self.drain();
        result
    }

    /// Restore progress for a new game and notify listeners with `Reset`.
    pub fn reset_game(&self) {
        {
            let mut state = self.write_guard();
            state.reset_game();
            self.enqueue(SessionEvent::Reset, &state);
        }
        self.drain();
    }

    /// Swap in a freshly configured session and notify with `Replaced`.
    ///
    /// Existing handles and subscriptions keep working. Panics if `config`
    /// has no players, like `SessionState::new`.
    pub fn reconfigure(&self, config: &SessionConfig) {
        let fresh = SessionState::new(config);
        {
            let mut state = self.write_guard();
            *state = fresh;
            self.enqueue(SessionEvent::Replaced, &state);
        }
        self.drain();
    }

    // === Subscriptions ===

    /// Register a listener called after every write.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(SessionEvent, &SessionState) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId::new(listeners.next_id);
        listeners.next_id = listeners.next_id.wrapping_add(1);
        listeners.by_id.insert(id, Arc::new(listener));
        debug!("Registered session listener {}", id);
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.by_id.remove(&id).is_some()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .len()
    }

    // Called with the state write lock held, which fixes the queue order.
    fn enqueue(&self, event: SessionEvent, state: &SessionState) {
        lock_outbox(&self.outbox)
            .pending
            .push_back((event, state.clone()));
    }

    fn drain(&self) {
        {
            let mut outbox = lock_outbox(&self.outbox);
            if outbox.draining {
                return;
            }
            outbox.draining = true;
        }
        let _guard = DrainGuard { outbox: &self.outbox };

        loop {
            // Empty check and hand-off share one lock, so nothing queued
            // after the last pop is stranded.
            let (event, state) = {
                let mut outbox = lock_outbox(&self.outbox);
                match outbox.pending.pop_front() {
                    Some(next) => next,
                    None => {
                        outbox.draining = false;
                        return;
                    }
                }
            };
            self.deliver(event, &state);
        }
    }

    fn deliver(&self, event: SessionEvent, state: &SessionState) {
        // Copy out so callbacks can subscribe/unsubscribe without deadlocking.
        let mut targets: Vec<(SubscriptionId, Listener)> = {
            let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
            listeners
                .by_id
                .iter()
                .map(|(id, listener)| (*id, Arc::clone(listener)))
                .collect()
        };
        // Registration order.
        targets.sort_by_key(|(id, _)| *id);

        for (_, listener) in targets {
            listener(event, state);
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.read_guard())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl std::fmt::Debug for WeakSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakSessionStore")
            .field("alive", &(self.state.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_default_store() {
        let store = SessionStore::default();
        assert_eq!(store.snapshot(), SessionState::default());
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::default();
        let other = store.clone();

        store.update(|s| s.current_round = 4);

        assert_eq!(other.read(|s| s.current_round), 4);
    }

    #[test]
    fn test_update_returns_closure_result() {
        let store = SessionStore::default();
        let name = store.update(|s| {
            s.players[0].name = String::from("Ana");
            s.players[0].name.clone()
        });
        assert_eq!(name, "Ana");
    }

    #[test]
    fn test_reset_game_through_store() {
        let store = SessionStore::default();
        store.update(|s| {
            s.players[0].score = 10;
            s.current_player_index = 1;
        });

        store.reset_game();

        let state = store.snapshot();
        assert_eq!(state.players[0].score, 0);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn test_listeners_see_post_write_state() {
        let store = SessionStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        store.subscribe(move |event, state| {
            sink.lock().unwrap().push((event, state.current_round));
        });

        store.update(|s| s.current_round = 3);
        store.reset_game();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![(SessionEvent::Updated, 3), (SessionEvent::Reset, 1)]);
    }

    #[test]
    fn test_unsubscribe() {
        let store = SessionStore::default();
        let count = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&count);
        let id = store.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        store.reset_game();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.reset_game();

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = SessionStore::default();
        let observed = Arc::new(Mutex::new(None));

        let handle = store.downgrade();
        let slot = Arc::clone(&observed);
        store.subscribe(move |_, _| {
            if let Some(store) = handle.upgrade() {
                *slot.lock().unwrap() = Some(store.read(|s| s.current_player_index));
            }
        });

        store.update(|s| s.current_player_index = 1);

        assert_eq!(*observed.lock().unwrap(), Some(1));
    }

    #[test]
    fn test_reconfigure() {
        let store = SessionStore::default();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |event, _| sink.lock().unwrap().push(event));

        store.reconfigure(&SessionConfig::new().with_rounds(2).with_player("3", "Player 3"));

        assert_eq!(store.read(|s| s.rounds_to_play), 2);
        assert_eq!(store.read(|s| s.player_count()), 3);
        assert_eq!(*events.lock().unwrap(), vec![SessionEvent::Replaced]);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_reconfigure_empty_roster() {
        let store = SessionStore::default();
        store.reconfigure(&SessionConfig::new().with_players(Vec::new()));
    }

    #[test]
    fn test_debug_output() {
        let store = SessionStore::default();
        let text = format!("{:?}", store);
        assert!(text.starts_with("SessionStore"));
        assert!(text.contains("listeners: 0"));
    }

    #[test]
    fn test_weak_listener_releases_store() {
        let store = SessionStore::default();
        let witness = Arc::new(());
        let released = Arc::downgrade(&witness);

        let handle = store.downgrade();
        store.subscribe(move |_, _| {
            let _keep = &witness;
            if let Some(store) = handle.upgrade() {
                store.read(|s| s.current_round);
            }
        });
        store.reset_game();

        let weak = store.downgrade();
        drop(store);

        assert!(weak.upgrade().is_none());
        assert!(released.upgrade().is_none());
    }

    #[test]
    fn test_write_from_listener_is_delivered_after() {
        let store = SessionStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let handle = store.downgrade();
        let sink = Arc::clone(&seen);
        store.subscribe(move |event, state| {
            sink.lock().unwrap().push((event, state.current_round));
            if event == SessionEvent::Reset {
                if let Some(store) = handle.upgrade() {
                    store.update(|s| s.current_round = 2);
                }
            }
        });

        store.reset_game();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(SessionEvent::Reset, 1), (SessionEvent::Updated, 2)]
        );
        assert_eq!(store.read(|s| s.current_round), 2);
    }

    #[test]
    fn test_subscription_ids_wrap() {
        let store = SessionStore::default();
        store.listeners.write().unwrap().next_id = u32::MAX;

        let last = store.subscribe(|_, _| {});
        let first = store.subscribe(|_, _| {});

        assert_eq!(last, SubscriptionId::new(u32::MAX));
        assert_eq!(first, SubscriptionId::new(0));
        assert_eq!(store.listener_count(), 2);
    }

    #[test]
    fn test_weak_debug_output() {
        let store = SessionStore::default();
        let weak = store.downgrade();
        assert!(format!("{:?}", weak).contains("alive: true"));
        drop(store);
        assert!(format!("{:?}", weak).contains("alive: false"));
    }
}
