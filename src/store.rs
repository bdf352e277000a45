//! AuthorStore - the single owner of author state.
//!
//! The store holds an [`AuthorCollection`], applies dispatched
//! [`AuthorAction`]s to it, and tells change listeners when it moved.
//! Nothing outside the store can mutate the collection: queries hand out
//! owned copies.
//!
//! ## Example
//!
//! ```ignore
//! let dispatcher = Dispatcher::new();
//! let store = Arc::new(AuthorStore::default());
//! store.register(&dispatcher)?;
//!
//! let view = Arc::clone(&store);
//! store.add_change_listener(move || render(view.get_all_authors()));
//!
//! dispatcher.dispatch(AuthorAction::create(Author::new("2", "Sam", "Lee")))?;
//! ```

use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::action::AuthorAction;
use crate::author::Author;
use crate::dispatcher::{DispatchToken, Dispatcher};
use crate::emitter::{ChangeEmitter, ListenerHandle};
use crate::error::DispatchError;

/// Ordered author records. Insertion order is preserved by every operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorCollection {
    authors: Vec<Author>,
}

impl AuthorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Author] {
        &self.authors
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    pub fn replace_all(&mut self, authors: Vec<Author>) {
        self.authors = authors;
    }

    pub fn push(&mut self, author: Author) {
        self.authors.push(author);
    }

    /// Replace the first author with the same id, keeping its position.
    /// Returns false if no author matched.
    pub fn update(&mut self, author: Author) -> bool {
        match self.authors.iter_mut().find(|a| a.id == author.id) {
            Some(slot) => {
                *slot = author;
                true
            }
            None => false,
        }
    }

    /// Remove every author with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.authors.len();
        self.authors.retain(|a| a.id != id);
        before - self.authors.len()
    }
}

impl From<Vec<Author>> for AuthorCollection {
    fn from(authors: Vec<Author>) -> Self {
        Self { authors }
    }
}

impl FromIterator<Author> for AuthorCollection {
    fn from_iter<I: IntoIterator<Item = Author>>(iter: I) -> Self {
        Self {
            authors: iter.into_iter().collect(),
        }
    }
}

/// Owns the author collection.
///
/// State changes only by dispatching an action; there is no public
/// mutation path:
///
/// ```compile_fail
/// use author_flux::{Author, AuthorAction, AuthorStore};
///
/// let store = AuthorStore::default();
/// store.reduce(&AuthorAction::create(Author::new("1", "Jane", "Doe")));
/// ```
pub struct AuthorStore {
    state: RwLock<AuthorCollection>,
    emitter: ChangeEmitter,
    dispatch_token: OnceLock<DispatchToken>,
}

impl Default for AuthorStore {
    fn default() -> Self {
        Self::new(AuthorCollection::new())
    }
}

impl AuthorStore {
    pub fn new(state: AuthorCollection) -> Self {
        AuthorStore {
            state: RwLock::new(state),
            emitter: ChangeEmitter::new(),
            dispatch_token: OnceLock::new(),
        }
    }

    /// Subscribe this store to `dispatcher`.
    ///
    /// The dispatcher only holds a weak reference, so dropping the last
    /// `Arc<AuthorStore>` turns the handler into a no-op.
    pub fn register(
        self: &Arc<Self>,
        dispatcher: &Dispatcher<AuthorAction>,
    ) -> Result<DispatchToken, DispatchError> {
        let store = Arc::downgrade(self);
        let token = dispatcher.register(move |action: &AuthorAction| {
            if let Some(store) = store.upgrade() {
                store.handle(action);
            }
        })?;
        if self.dispatch_token.set(token).is_err() {
            warn!(%token, "store registered with more than one dispatcher");
        }
        Ok(token)
    }

    /// Token of the first registration, for use with `wait_for`.
    pub fn dispatch_token(&self) -> Option<DispatchToken> {
        self.dispatch_token.get().copied()
    }

    /// Apply `action` and notify listeners if the collection changed.
    fn handle(&self, action: &AuthorAction) {
        if self.reduce(action) {
            self.emit_change();
        }
    }

    /// Apply `action` to the collection. Returns true if state changed.
    fn reduce(&self, action: &AuthorAction) -> bool {
        let mut state = self.write();
        match action {
            AuthorAction::Initialise { initial_data } => {
                state.replace_all(initial_data.authors.clone());
                debug!(authors = state.len(), "authors initialised");
                true
            }
            AuthorAction::CreateAuthor { author } => {
                if state.find(&author.id).is_some() {
                    warn!(id = %author.id, "creating author with an id already in use");
                }
                state.push(author.clone());
                debug!(id = %author.id, "author created");
                true
            }
            AuthorAction::UpdateAuthor { author } => {
                let updated = state.update(author.clone());
                if updated {
                    debug!(id = %author.id, "author updated");
                } else {
                    debug!(id = %author.id, "update ignored, no such author");
                }
                updated
            }
            AuthorAction::DeleteAuthor { id } => {
                let removed = state.remove(id);
                debug!(%id, removed, "author delete applied");
                removed > 0
            }
            AuthorAction::Unknown => false,
        }
    }

    pub fn get_all_authors(&self) -> Vec<Author> {
        self.read().as_slice().to_vec()
    }

    pub fn get_author_by_id(&self, id: &str) -> Option<Author> {
        self.read().find(id).cloned()
    }

    /// Copy of the whole collection.
    pub fn snapshot(&self) -> AuthorCollection {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn add_change_listener<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.emitter.add_listener(listener)
    }

    pub fn remove_change_listener(&self, handle: ListenerHandle) -> bool {
        self.emitter.remove_listener(handle)
    }

    pub fn emit_change(&self) {
        self.emitter.emit();
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthorCollection> {
        match self.state.read() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthorCollection> {
        match self.state.write() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
