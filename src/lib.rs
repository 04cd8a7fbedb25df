//! Helm Pilot - install Kubernetes applications with Helm via Artifact Hub.
//!
//! This library provides the core functionality for helm-pilot: resolving a
//! software name into exactly one chart repository URL through a local cache
//! of official repositories, remote organization/user search, and a free-text
//! package search fallback, then driving the external `helm` binary.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which
//! provides:
//! - The official repositories cache store
//! - The Artifact Hub registry client
//! - Interactive selection primitives behind an injectable prompter
//! - The resolution orchestrator and the helm installer wrapper
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    choose,
    confirm,

    print_error,
    print_info,
    print_section_header,
    print_success,

    update_official_repositories,

    // Cache store
    CacheStore,
    // Interactive selection
    ConsolePrompter,
    // Installer
    HelmCli,
    // Error handling
    HelmPilotError,
    PackageHit,
    // Progress reporting
    ProgressSpinner,
    Prompter,
    // Registry client
    RegistryClient,
    RepositoryRecord,
    // Resolution
    Resolver,
    Result,
    ScriptedPrompter,
    SearchedRepository,

    ARTIFACT_HUB_API,
    OFFICIAL_REPOS_FILE,
};
