use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::subscription::{Registry, Subscribers};
use super::{Reduce, Subscription};

/// A thread-safe store for managing application state.
///
/// Every commit ([`Store::update`], [`Store::set`], [`Store::dispatch`]) mutates the
/// state and then notifies subscribers synchronously, on the committing thread,
/// with the state as of that commit. Commits are serialized, so subscribers see
/// transitions in commit order. A subscriber must not commit to the same store
/// from inside its callback.
///
/// There is no global store; construct one explicitly and pass clones around.
/// Clones share the same state and subscribers.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<RwLock<Subscribers<T>>>,
    commit: Arc<Mutex<()>>,
}

impl<T: Clone + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(Subscribers::new())),
            commit: Arc::new(Mutex::new(())),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.read_state().clone()
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&*self.read_state())
    }

    /// Update the state using a function.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let _commit = self.commit.lock().unwrap_or_else(PoisonError::into_inner);
        let committed = {
            let mut state = self.write_state();
            f(&mut *state);
            (*state).clone()
        };
        self.notify(&committed);
    }

    /// Set a new state value.
    pub fn set(&self, new_state: T) {
        self.update(move |state| *state = new_state);
    }

    /// Apply `action` through the state's reducer.
    pub fn dispatch<A>(&self, action: A)
    where
        T: Reduce<A>,
    {
        self.update(move |state| state.reduce(action));
    }

    /// Subscribe to state changes.
    ///
    /// The callback is called after every commit. It stays registered until the
    /// returned [`Subscription`] is disposed or dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Arc::new(callback));
        let registry: Arc<dyn Registry> = self.subscribers.clone();
        Subscription::new(id, Arc::downgrade(&registry))
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Notify all subscribers of a state change.
    fn notify(&self, state: &T) {
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot();
        for subscriber in subscribers {
            subscriber(state);
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, T> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, T> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            commit: Arc::clone(&self.commit),
        }
    }
}
