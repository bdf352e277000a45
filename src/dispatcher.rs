//! Dispatcher - synchronous broadcast of actions to registered handlers.
//!
//! Every registered handler sees every action, in registration order, before
//! `dispatch` returns. A dispatch cannot start while another is in flight:
//! the second call fails with [`DispatchError::AlreadyDispatching`] instead of
//! queueing or recursing.
//!
//! ## Example
//!
//! ```ignore
//! let dispatcher = Arc::new(Dispatcher::<AuthorAction>::new());
//! let token = dispatcher.register(|action| {
//!     println!("saw {}", action.action_type());
//! })?;
//!
//! dispatcher.dispatch(AuthorAction::delete("2"))?;
//! dispatcher.unregister(token)?;
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::{debug, trace, warn};

use crate::action::Action;
use crate::error::DispatchError;

type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Identifies a registered handler. Tokens order by registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DispatchToken(u64);

impl fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID_{}", self.0)
    }
}

/// Bookkeeping for the dispatch currently in flight.
struct InFlight<A> {
    action: A,
    /// Handlers registered when the dispatch started.
    handlers: BTreeMap<DispatchToken, Handler<A>>,
    pending: HashSet<DispatchToken>,
    handled: HashSet<DispatchToken>,
}

pub struct Dispatcher<A: Action> {
    handlers: RwLock<BTreeMap<DispatchToken, Handler<A>>>,
    in_flight: Mutex<Option<InFlight<A>>>,
    next_token: AtomicU64,
}

/// Clears the in-flight slot when the dispatch ends, even on panic.
struct DispatchGuard<'a, A> {
    slot: &'a Mutex<Option<InFlight<A>>>,
}

impl<A> Drop for DispatchGuard<'_, A> {
    fn drop(&mut self) {
        // a poisoned slot must still be cleared or the dispatcher stays locked
        let mut slot = match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = None;
    }
}

impl<A: Action> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> Dispatcher<A> {
    pub fn new() -> Self {
        Dispatcher {
            handlers: RwLock::new(BTreeMap::new()),
            in_flight: Mutex::new(None),
            next_token: AtomicU64::new(1),
        }
    }

    /// Register a handler to be invoked with every dispatched action.
    pub fn register<F>(&self, handler: F) -> Result<DispatchToken, DispatchError>
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| DispatchError::LockPoisoned("register"))?;
        let token = DispatchToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        handlers.insert(token, Arc::new(handler));
        debug!(%token, "handler registered");
        Ok(token)
    }

    pub fn unregister(&self, token: DispatchToken) -> Result<(), DispatchError> {
        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| DispatchError::LockPoisoned("unregister"))?;
        if handlers.remove(&token).is_none() {
            return Err(DispatchError::UnknownToken(token));
        }
        debug!(%token, "handler unregistered");
        Ok(())
    }

    pub fn is_dispatching(&self) -> Result<bool, DispatchError> {
        Ok(self.slot("is_dispatching")?.is_some())
    }

    pub fn handler_count(&self) -> Result<usize, DispatchError> {
        let handlers = self
            .handlers
            .read()
            .map_err(|_| DispatchError::LockPoisoned("handler_count"))?;
        Ok(handlers.len())
    }

    /// Invoke every registered handler with `action`.
    ///
    /// The handler set is fixed when the call starts: handlers registered
    /// meanwhile wait for the next action, and handlers unregistered
    /// meanwhile still see this one.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        let action_type = action.action_type();
        let handlers = self
            .handlers
            .read()
            .map_err(|_| DispatchError::LockPoisoned("dispatch"))?
            .clone();
        let tokens: Vec<DispatchToken> = handlers.keys().copied().collect();

        {
            let mut slot = self.slot("dispatch")?;
            if let Some(current) = slot.as_ref() {
                let err = DispatchError::AlreadyDispatching {
                    action_type: current.action.action_type(),
                };
                warn!(rejected = action_type, error = %err, "dispatch rejected");
                return Err(err);
            }
            *slot = Some(InFlight {
                action,
                handlers,
                pending: HashSet::new(),
                handled: HashSet::new(),
            });
        }
        let _guard = DispatchGuard {
            slot: &self.in_flight,
        };

        debug!(action_type, handlers = tokens.len(), "dispatching");

        for token in tokens {
            let pending = self
                .slot("dispatch")?
                .as_ref()
                .map(|f| f.pending.contains(&token))
                .unwrap_or(false);
            if pending {
                continue;
            }
            self.invoke(token)?;
        }

        Ok(())
    }

    /// Run the handlers named by `tokens` before continuing the current one.
    ///
    /// Only valid from inside a handler during a dispatch.
    pub fn wait_for(&self, tokens: &[DispatchToken]) -> Result<(), DispatchError> {
        if !self.is_dispatching()? {
            return Err(DispatchError::NotDispatching);
        }

        for &token in tokens {
            {
                let slot = self.slot("wait_for")?;
                let in_flight = slot.as_ref().ok_or(DispatchError::NotDispatching)?;
                if in_flight.pending.contains(&token) {
                    if !in_flight.handled.contains(&token) {
                        return Err(DispatchError::CircularDependency(token));
                    }
                    continue;
                }
                if !in_flight.handlers.contains_key(&token) {
                    return Err(DispatchError::UnknownToken(token));
                }
            }

            self.invoke(token)?;
        }

        Ok(())
    }

    fn slot(
        &self,
        operation: &'static str,
    ) -> Result<MutexGuard<'_, Option<InFlight<A>>>, DispatchError> {
        self.in_flight
            .lock()
            .map_err(|_| DispatchError::LockPoisoned(operation))
    }

    /// Call one handler from the in-flight snapshot. No lock is held while
    /// the handler runs.
    fn invoke(&self, token: DispatchToken) -> Result<(), DispatchError> {
        let (handler, action) = {
            let mut slot = self.slot("dispatch")?;
            let in_flight = slot.as_mut().ok_or(DispatchError::NotDispatching)?;
            let handler = in_flight
                .handlers
                .get(&token)
                .cloned()
                .ok_or(DispatchError::UnknownToken(token))?;
            in_flight.pending.insert(token);
            (handler, in_flight.action.clone())
        };

        trace!(%token, action_type = action.action_type(), "invoking handler");
        handler(&action);

        if let Some(in_flight) = self.slot("dispatch")?.as_mut() {
            in_flight.handled.insert(token);
        }
        Ok(())
    }
}
