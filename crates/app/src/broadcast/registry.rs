//! Registry of live subscriber connections.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

/// Transient identity of one registered subscriber.
///
/// Lives only as long as the connection it names; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(uuid::Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Concurrency-safe set of live outbound channels.
///
/// The registry exclusively owns subscriber state: it creates the
/// per-subscriber channel on [`register`](Self::register) and drops the
/// sending half on [`deregister`](Self::deregister), which closes the channel
/// and lets the connection's writer task wind down. Both operations and
/// [`snapshot`](Self::snapshot) share one lock, so a snapshot is a consistent
/// point-in-time view of the live set.
pub struct SubscriberRegistry {
    buffer: usize,
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<String>>>,
}

impl SubscriberRegistry {
    /// Create an empty registry whose subscriber channels hold `buffer`
    /// undelivered payloads before the subscriber counts as stalled.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer,
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Add a subscriber, returning its id and the receiving half of its
    /// outbound channel.
    pub fn register(&self) -> (SubscriberId, mpsc::Receiver<String>) {
        let id = SubscriberId::new();
        let (sender, receiver) = mpsc::channel(self.buffer);
        self.lock().insert(id, sender);
        (id, receiver)
    }

    /// Remove a subscriber and close its channel.
    ///
    /// Removing an id that is not (or no longer) present is a no-op, so the
    /// connection handler and the dispatcher may race to deregister the same
    /// subscriber without harm.
    pub fn deregister(&self, id: SubscriberId) {
        self.lock().remove(&id);
    }

    /// Point-in-time copy of the live subscriber set, taken under the lock
    /// and iterated outside it.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(SubscriberId, mpsc::Sender<String>)> {
        self.lock()
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriberId, mpsc::Sender<String>>> {
        // A panic while holding the lock leaves the map itself intact, so
        // recovering the guard is safe.
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
