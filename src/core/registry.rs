//! Artifact Hub search client.
//!
//! Provides paginated queries against the Artifact Hub HTTP API: repository
//! search by organization or user, free-text package search, and the
//! full-catalog crawl that feeds the local official repositories cache.
//!
//! Rate limiting (HTTP 429) is advisory: the crawl pauses for a fixed
//! interval and retries the same page with no retry cap. Every other non-200
//! status aborts the operation. Transport failures are never retried.

use crate::core::cache::RepositoryRecord;
use crate::core::error::{HelmPilotError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

/// Base URL of the Artifact Hub API.
pub const ARTIFACT_HUB_API: &str = "https://artifacthub.io/api/v1";

/// Pause after a 429 before retrying the same page.
const RATE_LIMIT_WAIT: Duration = Duration::from_secs(1);

/// Self-throttle between successful catalog pages.
const PAGE_PAUSE: Duration = Duration::from_secs(1);

/// Page size for the full-catalog crawl.
const PAGE_SIZE: usize = 50;

/// A repository as returned by the Artifact Hub search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchedRepository {
    pub name: String,
    pub url: String,
    #[serde(rename = "organization_name", default)]
    pub organization: String,
    #[serde(rename = "verified_publisher", default)]
    pub verified_publisher: bool,
}

impl From<SearchedRepository> for RepositoryRecord {
    fn from(repo: SearchedRepository) -> Self {
        RepositoryRecord {
            name: repo.name,
            organization: repo.organization,
            url: repo.url,
        }
    }
}

/// One package hit from the free-text package search.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageHit {
    pub name: String,
    pub repository: SearchedRepository,
}

/// Envelope of the `/packages/search` endpoint.
#[derive(Debug, Deserialize)]
struct PackageSearchResponse {
    #[serde(default)]
    packages: Vec<PackageHit>,
}

/// Blocking client for the Artifact Hub search endpoints.
pub struct RegistryClient {
    client: reqwest::blocking::Client,
    base_url: String,
    rate_limit_wait: Duration,
    page_pause: Duration,
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryClient {
    /// Creates a client against the public Artifact Hub API.
    pub fn new() -> Self {
        Self::with_base_url(ARTIFACT_HUB_API)
    }

    /// Creates a client against an alternate base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("helm-pilot/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            base_url: base_url.into(),
            rate_limit_wait: RATE_LIMIT_WAIT,
            page_pause: PAGE_PAUSE,
        }
    }

    /// Overrides the rate-limit and inter-page pauses. Tests use this to run
    /// the crawl without wall-clock delays.
    pub fn with_pauses(mut self, rate_limit_wait: Duration, page_pause: Duration) -> Self {
        self.rate_limit_wait = rate_limit_wait;
        self.page_pause = page_pause;
        self
    }

    /// Searches official Helm repositories by organization and/or user.
    ///
    /// At least one of `org`/`user` must be non-empty; this is validated
    /// before any network access.
    pub fn search_by_org_or_user(&self, org: &str, user: &str) -> Result<Vec<SearchedRepository>> {
        if org.is_empty() && user.is_empty() {
            return Err(HelmPilotError::MissingOrgOrUser);
        }

        let url = format!("{}/repositories/search", self.base_url);
        log::debug!("Searching repositories for org='{org}' user='{user}'");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("offset", "0"),
                ("limit", "10"),
                ("kind", "0"),
                ("official", "true"),
                ("user", user),
                ("org", org),
            ])
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(HelmPilotError::unexpected_status(status.as_u16()));
        }

        let repos: Vec<SearchedRepository> = response.json()?;
        log::debug!("Repository search returned {} results", repos.len());
        Ok(repos)
    }

    /// Free-text search over verified, official, non-deprecated chart
    /// packages.
    pub fn search_packages_by_name(&self, text: &str) -> Result<Vec<PackageHit>> {
        let url = format!("{}/packages/search", self.base_url);
        log::debug!("Searching packages for '{text}'");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ts_query_web", text),
                ("kind", "0"),
                ("verified_publisher", "true"),
                ("official", "true"),
                ("deprecated", "false"),
            ])
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(HelmPilotError::unexpected_status(status.as_u16()));
        }

        let result: PackageSearchResponse = response.json()?;
        log::debug!("Package search returned {} results", result.packages.len());
        Ok(result.packages)
    }

    /// Crawls the whole verified catalog, page by page, until an empty page.
    ///
    /// Records are deduplicated by repository name (last page wins) and only
    /// verified repositories with a non-empty organization are kept. A 429
    /// pauses and retries the same page indefinitely; the retry is unbounded
    /// on purpose.
    pub fn fetch_all_verified_repositories(&self) -> Result<Vec<RepositoryRecord>> {
        let url = format!("{}/packages/search", self.base_url);
        let mut repositories: BTreeMap<String, RepositoryRecord> = BTreeMap::new();
        let mut page: usize = 0;

        loop {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("kind", "0"),
                    ("verified_publisher", "true"),
                    ("official", "true"),
                ])
                .query(&[
                    ("limit", PAGE_SIZE.to_string()),
                    ("offset", (page * PAGE_SIZE).to_string()),
                ])
                .send()?;

            let status = response.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                log::warn!("Rate limit reached on catalog page {page}, waiting before retry");
                thread::sleep(self.rate_limit_wait);
                continue;
            }

            if status != reqwest::StatusCode::OK {
                return Err(HelmPilotError::unexpected_status(status.as_u16()));
            }

            let body: PackageSearchResponse = response.json()?;
            if body.packages.is_empty() {
                log::debug!("Catalog crawl finished after {page} pages");
                break;
            }

            for hit in body.packages {
                let repo = hit.repository;
                if repo.verified_publisher && !repo.organization.is_empty() {
                    repositories.insert(repo.name.clone(), repo.into());
                }
            }

            page += 1;
            thread::sleep(self.page_pause);
        }

        Ok(repositories.into_values().collect())
    }
}
