//! Error types for core operations

use crate::apply::ApplyStep;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the registry, the profile store and the applier
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown tool or profile name
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// Persisted profile data failed to parse or validate
    #[error("Profile store {path} is corrupt: {message}")]
    CorruptStore { path: PathBuf, message: String },

    /// The profile store could not be read or written
    #[error("Failed to persist profiles to {path}: {message}")]
    Persistence { path: PathBuf, message: String },

    /// One external mutation failed while applying a profile
    #[error("Step '{step}' failed: {message}")]
    CommandFailed { step: ApplyStep, message: String },

    /// Input rejected before anything was changed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The PDF collaborator reported an error
    #[error("PDF error: {0}")]
    Pdf(String),
}

impl CoreError {
    pub(crate) fn tool_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: "Tool",
            name: name.to_string(),
        }
    }

    pub(crate) fn profile_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: "Profile",
            name: name.to_string(),
        }
    }

    /// Get the error code for CLI/API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::CorruptStore { .. } => "CORRUPT_STORE",
            Self::Persistence { .. } => "PERSISTENCE_ERROR",
            Self::CommandFailed { .. } => "COMMAND_FAILED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Pdf(_) => "PDF_ERROR",
        }
    }

    /// Whether the caller can recover by choosing a fallback
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
