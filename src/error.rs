use std::error::Error;
use std::fmt;

use crate::author::ValidationErrors;
use crate::dispatcher::DispatchToken;

/// Errors raised by [`Dispatcher`](crate::Dispatcher) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A dispatch was requested while another one is still running.
    AlreadyDispatching { action_type: &'static str },
    /// `wait_for` was called outside of a dispatch.
    NotDispatching,
    /// The token does not name a registered handler.
    UnknownToken(DispatchToken),
    /// `wait_for` found a handler that is running but has not finished.
    CircularDependency(DispatchToken),
    LockPoisoned(&'static str),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::AlreadyDispatching { action_type } => write!(
                f,
                "cannot dispatch in the middle of a dispatch ({} in progress)",
                action_type
            ),
            DispatchError::NotDispatching => {
                write!(f, "wait_for must be invoked while dispatching")
            }
            DispatchError::UnknownToken(token) => {
                write!(f, "{} does not map to a registered handler", token)
            }
            DispatchError::CircularDependency(token) => {
                write!(f, "circular dependency detected while waiting for {}", token)
            }
            DispatchError::LockPoisoned(operation) => {
                write!(f, "dispatcher lock poisoned during {}", operation)
            }
        }
    }
}

impl Error for DispatchError {}

/// Errors returned by the action creators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The author failed form validation; nothing was dispatched.
    Invalid(ValidationErrors),
    Dispatch(DispatchError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Invalid(errors) => write!(f, "invalid author: {}", errors),
            ActionError::Dispatch(e) => write!(f, "dispatch failed: {}", e),
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ActionError::Dispatch(e) => Some(e),
            ActionError::Invalid(_) => None,
        }
    }
}

impl From<DispatchError> for ActionError {
    fn from(err: DispatchError) -> Self {
        ActionError::Dispatch(err)
    }
}

impl From<ValidationErrors> for ActionError {
    fn from(err: ValidationErrors) -> Self {
        ActionError::Invalid(err)
    }
}

/// Errors raised while loading [`AppConfig`](crate::AppConfig).
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    /// An environment override could not be parsed.
    InvalidOverride { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path, source)
            }
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::InvalidOverride { key, value } => {
                write!(f, "invalid value {:?} for {}", value, key)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidOverride { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
