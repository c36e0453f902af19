//! Registry of event listeners.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use super::event::{Event, MessageKind};

/// Handle returned by [`Registry::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Clone)]
struct Entry {
    id: ListenerId,
    filter: Option<MessageKind>,
    callback: Callback,
}

/// Listeners notified synchronously of published events.
///
/// The registry is copy-on-write: subscribing or unsubscribing replaces the
/// list, and a publish in progress keeps iterating the list it started with.
/// It may be used from any thread.
pub struct Registry {
    entries: RwLock<Arc<[Entry]>>,
    next_id: AtomicU64,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Vec::new().into()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("listeners", &self.len())
            .finish()
    }
}

impl Registry {
    /// Register a callback for events of one kind, or of every kind if
    /// `filter` is `None`.
    pub fn subscribe(
        &self,
        filter: Option<MessageKind>,
        callback: impl Fn(&Event) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let entry = Entry {
            id,
            filter,
            callback: Arc::new(callback),
        };

        self.update(|entries| entries.push(entry));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut found = false;

        self.update(|entries| {
            let len = entries.len();
            entries.retain(|e| e.id != id);
            found = entries.len() != len;
        });

        found
    }

    /// Notify every matching listener, in subscription order.
    pub fn publish(&self, event: &Event) {
        let snapshot = self.snapshot();

        for entry in snapshot.iter() {
            if entry.filter.is_none_or(|kind| kind == event.kind()) {
                (entry.callback)(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Arc<[Entry]> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&entries)
    }

    fn update(&self, f: impl FnOnce(&mut Vec<Entry>)) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let mut updated = entries.to_vec();
        f(&mut updated);
        *entries = updated.into();
    }
}
