use std::fmt;

use serde::{Deserialize, Serialize};

/// An author record. Identity is the `id` field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// An author that has not been saved yet (empty id).
    pub fn unsaved(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::new("", first_name, last_name)
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Derive an id from the author's names, e.g. `"Cory House"` -> `"cory-house"`.
    pub fn slug(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Per-field messages produced by [`AuthorValidation::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Form rules applied before an author is saved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthorValidation {
    pub min_name_length: usize,
}

impl Default for AuthorValidation {
    fn default() -> Self {
        Self { min_name_length: 3 }
    }
}

impl AuthorValidation {
    pub fn new(min_name_length: usize) -> Self {
        Self { min_name_length }
    }

    pub fn validate(&self, author: &Author) -> Result<(), ValidationErrors> {
        let errors = ValidationErrors {
            first_name: self.check(&author.first_name, "First name"),
            last_name: self.check(&author.last_name, "Last name"),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check(&self, value: &str, label: &str) -> Option<String> {
        if value.trim().chars().count() < self.min_name_length {
            Some(format!(
                "{} must be at least {} characters",
                label, self.min_name_length
            ))
        } else {
            None
        }
    }
}
