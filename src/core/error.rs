//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`HelmPilotError`] which provides comprehensive error
//! handling for all helm-pilot operations. It uses `thiserror` for ergonomic
//! error definitions and includes specialized error constructors for common
//! failure scenarios.
//!
//! # Public API
//! - [`HelmPilotError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, HelmPilotError>`
//!
//! # Error Categories
//! - **Argument validation**: Missing organization/user where required
//! - **Cache operations**: Missing, unreadable, or corrupt cache file
//! - **Registry operations**: Transport failures, unexpected HTTP status
//! - **Resolution**: No repository or package found, user cancellation
//! - **Installer**: helm launch and step failures, surfaced verbatim

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for helm-pilot
#[derive(Error, Debug)]
pub enum HelmPilotError {
    // Argument validation errors
    #[error("organization or user must be specified")]
    MissingOrgOrUser,

    // Cache errors
    #[error("Cache file does not exist at '{path}'. Run 'helm-pilot official update' first.")]
    CacheFileNotFound { path: PathBuf },

    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{path}': {source}. Run 'helm-pilot official update' to rebuild it.")]
    CacheParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize cache data: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no repositories found for organization: {organization}")]
    NoRepositoriesForOrganization { organization: String },

    // Registry errors
    #[error("Registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registry request failed: status code {status}")]
    UnexpectedStatus { status: u16 },

    #[error("no official repository found")]
    NoOfficialRepository,

    #[error("no package found")]
    NoPackageFound,

    // Interactive errors
    #[error("operation cancelled by user")]
    Cancelled,

    // Installer errors
    #[error("Failed to launch helm: {source}. Is helm on your PATH?")]
    HelmLaunchFailed { source: std::io::Error },

    #[error("helm {step} failed: {status}")]
    HelmStepFailed {
        step: String,
        status: std::process::ExitStatus,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using HelmPilotError
pub type Result<T> = std::result::Result<T, HelmPilotError>;

impl HelmPilotError {
    /// Create a cache file not found error
    pub fn cache_file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::CacheFileNotFound { path: path.into() }
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache parse failed error
    pub fn cache_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache serialization failed error
    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an empty organization filter error
    pub fn no_repositories_for_organization(organization: impl Into<String>) -> Self {
        Self::NoRepositoriesForOrganization {
            organization: organization.into(),
        }
    }

    /// Create an unexpected HTTP status error
    pub fn unexpected_status(status: u16) -> Self {
        Self::UnexpectedStatus { status }
    }

    /// Create a helm launch failed error
    pub fn helm_launch_failed(source: std::io::Error) -> Self {
        Self::HelmLaunchFailed { source }
    }

    /// Create a helm step failed error
    pub fn helm_step_failed(step: impl Into<String>, status: std::process::ExitStatus) -> Self {
        Self::HelmStepFailed {
            step: step.into(),
            status,
        }
    }
}
