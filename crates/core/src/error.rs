//! Error types for the link resolver.

use thiserror::Error;

/// Result type alias using the resolver's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the link resolver.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Link Errors
    // =========================================================================
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid link error.
    pub fn invalid_link(msg: impl Into<String>) -> Self {
        Self::InvalidLink(msg.into())
    }

    /// Create an unknown screen error.
    pub fn unknown_screen(name: impl Into<String>) -> Self {
        Self::UnknownScreen(name.into())
    }

    /// Create a session store error.
    pub fn session_store(msg: impl Into<String>) -> Self {
        Self::SessionStore(msg.into())
    }

    /// Create a navigation error.
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Create a scheduler error.
    pub fn scheduler(msg: impl Into<String>) -> Self {
        Self::Scheduler(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
