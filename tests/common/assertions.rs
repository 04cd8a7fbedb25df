//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating helm-pilot command output, error
//! messages, and expected behaviors.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for a cancelled resolution
pub fn cancelled() -> impl Predicate<str> {
    predicates::str::contains("operation cancelled by user")
}

/// Creates a predicate that checks for the missing-cache error message
pub fn cache_missing() -> impl Predicate<str> {
    predicates::str::contains("Cache file does not exist")
}

/// Creates a predicate that checks for the corrupt-cache error message
pub fn cache_corrupt() -> impl Predicate<str> {
    predicates::str::contains("Failed to parse cache file")
}

/// Creates a predicate that checks for the final install success message
pub fn install_success() -> impl Predicate<str> {
    predicates::str::contains("Installation completed successfully!")
}

/// Creates a predicate that checks that a local cache hit was reported
pub fn found_local_repository() -> impl Predicate<str> {
    predicates::str::contains("Found local official repository")
}
