#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use author_flux::{Author, AuthorAction, AuthorStore, Dispatcher};

pub fn author(id: &str, first: &str, last: &str) -> Author {
    Author::new(id, first, last)
}

/// A dispatcher with one subscribed store.
pub fn wired() -> (Arc<Dispatcher<AuthorAction>>, Arc<AuthorStore>) {
    let dispatcher = Arc::new(Dispatcher::<AuthorAction>::new());
    let store = Arc::new(AuthorStore::default());
    store.register(&dispatcher).unwrap();
    (dispatcher, store)
}

/// Counts change notifications from a store.
pub struct ChangeCounter(Arc<AtomicUsize>);

impl ChangeCounter {
    pub fn attach(store: &AuthorStore) -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        store.add_change_listener(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        ChangeCounter(count)
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
