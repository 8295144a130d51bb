use std::sync::{Arc, PoisonError, RwLock, Weak};

pub(crate) type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Registered subscriber callbacks, keyed by registration id.
pub(crate) struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(u64, Subscriber<T>)>,
}

impl<T> Subscribers<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, subscriber: Subscriber<T>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, subscriber));
        id
    }

    /// Clones the callbacks so they can run without holding the lock.
    pub(crate) fn snapshot(&self) -> Vec<Subscriber<T>> {
        self.entries.iter().map(|(_, s)| Arc::clone(s)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Type-erased removal so [`Subscription`] does not carry the state type.
pub(crate) trait Registry: Send + Sync {
    fn remove(&self, id: u64) -> bool;
}

impl<T> Registry for RwLock<Subscribers<T>> {
    fn remove(&self, id: u64) -> bool {
        let mut subscribers = self.write().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.entries.len();
        subscribers.entries.retain(|(entry_id, _)| *entry_id != id);
        subscribers.entries.len() != before
    }
}

/// Handle to a store subscription.
///
/// The callback stays registered until the handle is disposed or dropped. Call
/// [`Subscription::detach`] to keep it for the lifetime of the store instead.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Registry>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: Weak<dyn Registry>) -> Self {
        Self { id, registry }
    }

    /// Whether this handle still controls a registration on a live store.
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }

    /// Unsubscribe now.
    pub fn dispose(self) {
        drop(self);
    }

    /// Leave the callback registered for as long as the store lives.
    pub fn detach(mut self) {
        let released: Weak<dyn Registry> = Weak::<RwLock<Subscribers<()>>>::new();
        self.registry = released;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
