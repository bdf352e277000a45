//! Change notification for stores.
//!
//! Listeners take no arguments: on a change they re-query the store for
//! whatever state they need.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::trace;

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Returned by [`ChangeEmitter::add_listener`]; pass it back to remove the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

pub struct ChangeEmitter {
    listeners: RwLock<Vec<(ListenerHandle, Listener)>>,
    next_handle: AtomicU64,
}

impl Default for ChangeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeEmitter {
    pub fn new() -> Self {
        ChangeEmitter {
            listeners: RwLock::new(Vec::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    pub fn add_listener<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        let handle = ListenerHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let mut listeners = match self.listeners.write() {
            Ok(listeners) => listeners,
            Err(poisoned) => poisoned.into_inner(),
        };
        listeners.push((handle, Arc::new(listener)));
        handle
    }

    /// Returns false if the handle was not subscribed.
    pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
        let mut listeners = match self.listeners.write() {
            Ok(listeners) => listeners,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = listeners.len();
        listeners.retain(|(h, _)| *h != handle);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }

    /// Notify every listener subscribed at the moment of the call.
    ///
    /// The list is copied first, so listeners may subscribe or unsubscribe
    /// (themselves or others) while being notified.
    pub fn emit(&self) {
        let snapshot: Vec<Listener> = match self.listeners.read() {
            Ok(listeners) => listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect(),
        };

        trace!(listeners = snapshot.len(), "emitting change");
        for listener in snapshot {
            listener();
        }
    }
}
