//! Core functionality for the helm-pilot tool.
//!
//! This module provides the fundamental building blocks for repository
//! resolution: the local cache, the Artifact Hub client, interactive
//! selection, and the orchestrating resolver.

pub mod cache;
pub mod error;
pub mod helm;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod registry;
pub mod resolver;
pub mod table;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{HelmPilotError, Result};

// === Cache store ===
// On-disk snapshot of verified official repositories
pub use cache::{CacheStore, RepositoryRecord, OFFICIAL_REPOS_FILE};

// === Registry client ===
// Paginated Artifact Hub search queries
pub use registry::{PackageHit, RegistryClient, SearchedRepository, ARTIFACT_HUB_API};

// === Interactive selection ===
// Prompter capability and the two interactive primitives
pub use prompt::{choose, confirm, ConsolePrompter, Prompter, ScriptedPrompter};

// === Resolution ===
// The cache -> remote -> package-search fallback chain
pub use resolver::{update_official_repositories, Resolver};

// === Installer ===
// External helm binary collaborator
pub use helm::HelmCli;

// === Progress reporting ===
// Background stderr spinner used during cache refreshes
pub use progress::ProgressSpinner;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_section_header, print_success};
