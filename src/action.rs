//! Actions: tagged messages describing an intended state change.
//!
//! On the wire an action is a JSON object whose `actionType` field selects the
//! variant and whose remaining fields are the payload:
//!
//! ```text
//! {"actionType":"INITIALISE","initialData":{"authors":[...]}}
//! {"actionType":"CREATE_AUTHOR","author":{"id":"2","firstName":"Sam","lastName":"Lee"}}
//! {"actionType":"UPDATE_AUTHOR","author":{...}}
//! {"actionType":"DELETE_AUTHOR","id":"2"}
//! ```

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::author::Author;

/// Anything that can travel through a [`Dispatcher`](crate::Dispatcher).
pub trait Action: Clone + Debug + Send + Sync + 'static {
    /// Name used for logging and error reporting.
    fn action_type(&self) -> &'static str;
}

/// Seed payload supplied at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialData {
    #[serde(default)]
    pub authors: Vec<Author>,
}

impl InitialData {
    pub fn new(authors: Vec<Author>) -> Self {
        Self { authors }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actionType")]
pub enum AuthorAction {
    #[serde(rename = "INITIALISE", rename_all = "camelCase")]
    Initialise { initial_data: InitialData },
    #[serde(rename = "CREATE_AUTHOR")]
    CreateAuthor { author: Author },
    #[serde(rename = "UPDATE_AUTHOR")]
    UpdateAuthor { author: Author },
    #[serde(rename = "DELETE_AUTHOR")]
    DeleteAuthor { id: String },
    /// Any action type this store does not handle.
    #[serde(other)]
    Unknown,
}

impl AuthorAction {
    pub const INITIALISE: &'static str = "INITIALISE";
    pub const CREATE_AUTHOR: &'static str = "CREATE_AUTHOR";
    pub const UPDATE_AUTHOR: &'static str = "UPDATE_AUTHOR";
    pub const DELETE_AUTHOR: &'static str = "DELETE_AUTHOR";
    pub const UNKNOWN: &'static str = "UNKNOWN";

    pub fn initialise(authors: Vec<Author>) -> Self {
        AuthorAction::Initialise {
            initial_data: InitialData::new(authors),
        }
    }

    pub fn create(author: Author) -> Self {
        AuthorAction::CreateAuthor { author }
    }

    pub fn update(author: Author) -> Self {
        AuthorAction::UpdateAuthor { author }
    }

    pub fn delete(id: impl Into<String>) -> Self {
        AuthorAction::DeleteAuthor { id: id.into() }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Action for AuthorAction {
    fn action_type(&self) -> &'static str {
        match self {
            AuthorAction::Initialise { .. } => Self::INITIALISE,
            AuthorAction::CreateAuthor { .. } => Self::CREATE_AUTHOR,
            AuthorAction::UpdateAuthor { .. } => Self::UPDATE_AUTHOR,
            AuthorAction::DeleteAuthor { .. } => Self::DELETE_AUTHOR,
            AuthorAction::Unknown => Self::UNKNOWN,
        }
    }
}
