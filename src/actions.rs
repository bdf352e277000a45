//! Action creators: build [`AuthorAction`]s and hand them to the dispatcher.

use std::sync::Arc;

use tracing::info;

use crate::action::AuthorAction;
use crate::author::{Author, AuthorValidation};
use crate::dispatcher::Dispatcher;
use crate::error::ActionError;

#[derive(Clone)]
pub struct AuthorActions {
    dispatcher: Arc<Dispatcher<AuthorAction>>,
    validation: AuthorValidation,
}

impl AuthorActions {
    pub fn new(dispatcher: Arc<Dispatcher<AuthorAction>>) -> Self {
        Self::with_validation(dispatcher, AuthorValidation::default())
    }

    pub fn with_validation(
        dispatcher: Arc<Dispatcher<AuthorAction>>,
        validation: AuthorValidation,
    ) -> Self {
        Self {
            dispatcher,
            validation,
        }
    }

    pub fn validation(&self) -> AuthorValidation {
        self.validation
    }

    pub fn initialise(&self, authors: Vec<Author>) -> Result<(), ActionError> {
        info!(authors = authors.len(), "initialising author data");
        self.dispatcher.dispatch(AuthorAction::initialise(authors))?;
        Ok(())
    }

    pub fn create_author(&self, author: Author) -> Result<(), ActionError> {
        self.dispatcher.dispatch(AuthorAction::create(author))?;
        Ok(())
    }

    pub fn update_author(&self, author: Author) -> Result<(), ActionError> {
        self.dispatcher.dispatch(AuthorAction::update(author))?;
        Ok(())
    }

    pub fn delete_author(&self, id: impl Into<String>) -> Result<(), ActionError> {
        self.dispatcher.dispatch(AuthorAction::delete(id))?;
        Ok(())
    }

    /// Validate and save an author submitted from a form.
    ///
    /// An author without an id is created with an id derived from its names;
    /// one with an id replaces the existing record.
    pub fn save_author(&self, mut author: Author) -> Result<Author, ActionError> {
        self.validation.validate(&author)?;

        if author.is_new() {
            author.id = author.slug();
            self.create_author(author.clone())?;
        } else {
            self.update_author(author.clone())?;
        }

        Ok(author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (AuthorActions, Arc<Mutex<Vec<AuthorAction>>>) {
        let dispatcher = Arc::new(Dispatcher::<AuthorAction>::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        dispatcher
            .register(move |action: &AuthorAction| sink.lock().unwrap().push(action.clone()))
            .unwrap();
        (AuthorActions::new(dispatcher), log)
    }

    #[test]
    fn save_new_author_creates_with_slug_id() {
        let (actions, log) = recording();
        let saved = actions
            .save_author(Author::unsaved("Cory", "House"))
            .unwrap();

        assert_eq!(saved.id, "cory-house");
        assert_eq!(*log.lock().unwrap(), vec![AuthorAction::create(saved)]);
    }

    #[test]
    fn save_existing_author_updates() {
        let (actions, log) = recording();
        let author = Author::new("1", "Janet", "Doe");
        actions.save_author(author.clone()).unwrap();

        assert_eq!(*log.lock().unwrap(), vec![AuthorAction::update(author)]);
    }

    #[test]
    fn invalid_author_is_not_dispatched() {
        let (actions, log) = recording();
        let err = actions.save_author(Author::unsaved("Al", "Doe")).unwrap_err();

        match err {
            ActionError::Invalid(errors) => {
                assert!(errors.first_name.is_some());
                assert!(errors.last_name.is_none());
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn delete_and_initialise_dispatch_their_actions() {
        let (actions, log) = recording();
        actions.initialise(vec![]).unwrap();
        actions.delete_author("2").unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![AuthorAction::initialise(vec![]), AuthorAction::delete("2")]
        );
    }
}
