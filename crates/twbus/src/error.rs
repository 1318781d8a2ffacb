//! Error types for the disclosure panel.
//!
//! None of these errors escape an operation the caller did not ask for: the
//! controller absorbs them, logs them, and reports them through its event
//! signal.

use std::path::PathBuf;

use crate::element::ElementRole;

/// Errors reported by the element adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// A required element could not be resolved.
    #[error("required {role} element '{selector}' not found")]
    Missing { role: ElementRole, selector: String },

    /// The element was removed from the document while in use.
    #[error("element '{id}' is no longer attached to the document")]
    Detached { id: String },
}

impl ElementError {
    /// Create a missing-element error.
    pub fn missing(role: ElementRole, selector: impl Into<String>) -> Self {
        Self::Missing {
            role,
            selector: selector.into(),
        }
    }

    /// Create a detached-element error.
    pub fn detached(id: impl Into<String>) -> Self {
        Self::Detached { id: id.into() }
    }
}

/// Reasons the controller could not bind to its elements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// The container or the toggle control is missing.
    #[error(transparent)]
    MissingElement(#[from] ElementError),

    /// No Tokio runtime is available to drive transition timers.
    #[error("no async runtime available to drive transitions")]
    NoRuntime,
}

/// A fault raised while a transition was running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationFault {
    /// An item rejected a visual update.
    #[error("item {ordinal} failed to animate: {source}")]
    Element {
        ordinal: usize,
        #[source]
        source: ElementError,
    },

    /// A control or container update failed at transition start.
    #[error("affordance update failed: {0}")]
    Affordance(#[source] ElementError),

    /// The transition task was dropped before it settled.
    #[error("transition aborted before settling")]
    Aborted,
}

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds an unusable value.
    #[error("invalid value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    /// Create a validation error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
