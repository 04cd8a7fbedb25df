//! Local cache of verified official chart repositories.
//!
//! This module defines [`RepositoryRecord`] and [`CacheStore`], the on-disk
//! snapshot of official repositories refreshed from the Artifact Hub catalog.
//! The cache is a single flat JSON file, replaced wholesale on every refresh
//! and read-only to every other operation.
//!
//! # Public API
//! - [`RepositoryRecord`]: One verified, organization-published repository
//! - [`CacheStore`]: Load, filter, and replace operations over the cache file
//!
//! # Cache Strategy
//! - **JSON serialization**: Human-readable, pretty-printed with 2-space indent
//! - **Deterministic layout**: Records sorted by name before serialization, so
//!   refreshing against an unchanged catalog rewrites an identical file
//! - **Atomic replacement**: Written to a temp file in the same directory and
//!   renamed over the target, so readers never observe a partial write

use crate::core::error::{HelmPilotError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default cache file name, resolved against the process working directory.
pub const OFFICIAL_REPOS_FILE: &str = "official_repos.json";

/// One verified, organization-published chart repository.
///
/// The upstream `verified_publisher` flag is intentionally absent: only
/// verified records are ever written to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    #[serde(rename = "organization_name")]
    pub organization: String,
    pub url: String,
}

/// Store for the official repositories cache file.
///
/// The path is injected at construction so tests can isolate themselves from
/// the working directory default.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(OFFICIAL_REPOS_FILE)
    }
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the cache file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every record from the cache file.
    pub fn load_all(&self) -> Result<Vec<RepositoryRecord>> {
        if !self.path.exists() {
            log::debug!("Cache file does not exist: {}", self.path.display());
            return Err(HelmPilotError::cache_file_not_found(&self.path));
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            log::error!("Failed to read cache file '{}': {}", self.path.display(), e);
            HelmPilotError::cache_read_failed(&self.path, e)
        })?;

        let records: Vec<RepositoryRecord> = serde_json::from_str(&content).map_err(|e| {
            log::error!(
                "Failed to parse cache file '{}': {}",
                self.path.display(),
                e
            );
            HelmPilotError::cache_parse_failed(&self.path, e)
        })?;

        log::debug!(
            "Loaded {} repositories from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Keep only records whose organization matches `organization` exactly.
    ///
    /// The match is case-sensitive. An empty result is an error, not an empty
    /// list, so callers fall through to the remote search explicitly.
    pub fn filter_by_organization(
        records: &[RepositoryRecord],
        organization: &str,
    ) -> Result<Vec<RepositoryRecord>> {
        let filtered: Vec<RepositoryRecord> = records
            .iter()
            .filter(|record| record.organization == organization)
            .cloned()
            .collect();

        if filtered.is_empty() {
            return Err(HelmPilotError::no_repositories_for_organization(
                organization,
            ));
        }

        Ok(filtered)
    }

    /// Load the cache and filter it to one organization in a single step.
    pub fn repositories_for_organization(
        &self,
        organization: &str,
    ) -> Result<Vec<RepositoryRecord>> {
        let records = self.load_all()?;
        Self::filter_by_organization(&records, organization)
    }

    /// Replace the whole cache file with `records`.
    ///
    /// Records are sorted by name before serialization and the file is
    /// replaced via temp-file-then-rename, never updated in place.
    pub fn replace_all(&self, records: &[RepositoryRecord]) -> Result<()> {
        let mut sorted: Vec<RepositoryRecord> = records.to_vec();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let json = serde_json::to_string_pretty(&sorted).map_err(|e| {
            log::error!("Failed to serialize cache data: {e}");
            HelmPilotError::cache_serialization_failed(e)
        })?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
            .map_err(|e| HelmPilotError::cache_write_failed(&self.path, e))?;

        tmp.write_all(json.as_bytes())
            .map_err(|e| HelmPilotError::cache_write_failed(&self.path, e))?;

        tmp.persist(&self.path).map_err(|e| {
            log::error!(
                "Failed to write cache file '{}': {}",
                self.path.display(),
                e.error
            );
            HelmPilotError::cache_write_failed(&self.path, e.error)
        })?;

        log::debug!(
            "Wrote {} repositories to {}",
            sorted.len(),
            self.path.display()
        );
        Ok(())
    }
}
