use std::sync::Arc;

use tracing::info;

use crate::action::AuthorAction;
use crate::actions::AuthorActions;
use crate::config::AppConfig;
use crate::dispatcher::Dispatcher;
use crate::error::ActionError;
use crate::store::AuthorStore;

/// One dispatcher, one author store subscribed to it, and the action
/// creators that feed it. Each instance is fully independent.
pub struct AuthorApp {
    dispatcher: Arc<Dispatcher<AuthorAction>>,
    store: Arc<AuthorStore>,
    actions: AuthorActions,
}

impl AuthorApp {
    /// Wire everything together and load the configured seed authors.
    pub fn new(config: &AppConfig) -> Result<Self, ActionError> {
        let dispatcher = Arc::new(Dispatcher::<AuthorAction>::new());
        let store = Arc::new(AuthorStore::default());
        let token = store.register(&dispatcher)?;
        let actions = AuthorActions::with_validation(Arc::clone(&dispatcher), config.validation());

        actions.initialise(config.seed.authors.clone())?;
        info!(%token, authors = store.len(), "author app ready");

        Ok(Self {
            dispatcher,
            store,
            actions,
        })
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher<AuthorAction>> {
        &self.dispatcher
    }

    pub fn store(&self) -> &Arc<AuthorStore> {
        &self.store
    }

    pub fn actions(&self) -> &AuthorActions {
        &self.actions
    }
}
