//! Unidirectional data flow for author records.
//!
//! ```text
//! AuthorActions ──dispatch()──► Dispatcher ──► AuthorStore::reduce()
//!       ▲                                              │
//!       │                                        emit_change()
//!       │                                              ▼
//!   caller  ◄──── get_all_authors() ◄──────── change listeners
//! ```

mod action;
mod actions;
mod app;
mod author;
mod config;
mod dispatcher;
mod emitter;
mod error;
mod store;
pub mod telemetry;

pub use action::{Action, AuthorAction, InitialData};
pub use actions::AuthorActions;
pub use app::AuthorApp;
pub use author::{Author, AuthorValidation, ValidationErrors};
pub use config::{AppConfig, ENV_LOG_FILTER, ENV_MIN_NAME_LENGTH};
pub use dispatcher::{DispatchToken, Dispatcher};
pub use emitter::{ChangeEmitter, ListenerHandle};
pub use error::{ActionError, ConfigError, DispatchError};
pub use store::{AuthorCollection, AuthorStore};
