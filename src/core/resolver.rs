//! Repository resolution pipeline.
//!
//! [`Resolver`] turns a software name plus optional organization/user hints
//! into exactly one chart repository URL, or a terminal error. The fallback
//! chain is: local cache (refreshed on first use if absent) → remote
//! organization/user search → free-text package search.
//!
//! # Resolution rules
//! - A single local match returns directly, without any prompt.
//! - Ambiguity is resolved interactively: an index selection over a candidate
//!   table, followed by a Y/N confirmation on the repository paths.
//! - A declined confirmation cancels the whole resolution. It never falls
//!   through to the next search tier.
//! - Only the "no official repository found" outcome moves resolution from
//!   the official-repository search to the package search.

use crate::core::cache::{CacheStore, RepositoryRecord};
use crate::core::error::{HelmPilotError, Result};
use crate::core::progress::ProgressSpinner;
use crate::core::prompt::{self, Prompter};
use crate::core::registry::{PackageHit, RegistryClient};
use crate::core::table;

const CONFIRM_REPOSITORY_PROMPT: &str = "Do you want to proceed with this repository? (Y/N): ";

/// Orchestrates cache, registry, and interactive selection into a single
/// repository URL.
pub struct Resolver<'a> {
    cache: CacheStore,
    registry: RegistryClient,
    prompter: &'a mut dyn Prompter,
}

impl<'a> Resolver<'a> {
    pub fn new(cache: CacheStore, registry: RegistryClient, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            cache,
            registry,
            prompter,
        }
    }

    /// Resolves `software` to a repository URL, trying the official
    /// repository search first when an organization or user hint is present.
    pub fn get_repository_url(&mut self, software: &str, org: &str, user: &str) -> Result<String> {
        if !org.is_empty() || !user.is_empty() {
            match self.search_official_repository(org, user) {
                Ok(url) => {
                    println!("Official repository found: {url}");
                    return Ok(url);
                }
                Err(HelmPilotError::NoOfficialRepository) => {
                    println!("No official repository found, falling back to package search...");
                }
                Err(err) => return Err(err),
            }
        }

        self.search_package_fallback(software)
    }

    /// Searches the official repositories: local cache first, then the
    /// remote org/user endpoint.
    pub fn search_official_repository(&mut self, org: &str, user: &str) -> Result<String> {
        if !self.cache.exists() {
            println!("Local repository file not found. Updating repositories...");
            self.update_official_repositories()?;
        }

        if !org.is_empty() {
            println!("Searching for official repository locally for organization: {org}...");
            match self.cache.repositories_for_organization(org) {
                Ok(repos) => return self.select_local_repository(&repos),
                Err(HelmPilotError::NoRepositoriesForOrganization { .. }) => {
                    println!("No local repository found. Falling back to remote search...");
                }
                Err(err) => return Err(err),
            }
        }

        let repos: Vec<RepositoryRecord> = self
            .registry
            .search_by_org_or_user(org, user)?
            .into_iter()
            .map(Into::into)
            .collect();

        if repos.is_empty() {
            return Err(HelmPilotError::NoOfficialRepository);
        }

        if repos.len() == 1 {
            println!("Found remote official repository: {}", repos[0].url);
            return Ok(repos[0].url.clone());
        }

        println!("Multiple repositories found remotely. Please select one:");
        self.select_and_confirm_repository(&repos)
    }

    fn select_local_repository(&mut self, repos: &[RepositoryRecord]) -> Result<String> {
        if repos.len() == 1 {
            println!("Found local official repository: {}", repos[0].url);
            return Ok(repos[0].url.clone());
        }

        println!("Multiple repositories found. Please select one:");
        self.select_and_confirm_repository(repos)
    }

    fn select_and_confirm_repository(&mut self, repos: &[RepositoryRecord]) -> Result<String> {
        table::print_repository_candidates(repos);
        let index = prompt::choose(self.prompter, repos.len())?;

        let selected = &repos[index];
        println!("You selected: {} (URL: {})", selected.name, selected.url);

        if prompt::confirm(self.prompter, CONFIRM_REPOSITORY_PROMPT)? {
            Ok(selected.url.clone())
        } else {
            Err(HelmPilotError::Cancelled)
        }
    }

    /// Free-text package search, filtered to names containing `software`.
    pub fn search_package_fallback(&mut self, software: &str) -> Result<String> {
        let packages = self.registry.search_packages_by_name(software)?;
        if packages.is_empty() {
            return Err(HelmPilotError::NoPackageFound);
        }

        let filtered: Vec<PackageHit> = packages
            .iter()
            .filter(|package| package.name.contains(software))
            .cloned()
            .collect();

        if filtered.len() == 1 {
            let package = &filtered[0];
            println!(
                "Match found: {} (Repository URL: {})",
                package.name, package.repository.url
            );
            return if prompt::confirm(self.prompter, CONFIRM_REPOSITORY_PROMPT)? {
                Ok(package.repository.url.clone())
            } else {
                Err(HelmPilotError::Cancelled)
            };
        }

        // A choice from a list is final; only the single-match path asks for
        // an extra confirmation.
        if filtered.len() > 1 {
            println!("Multiple matches found. Please select a package from the list below:");
            table::print_package_candidates(&filtered);
            let index = prompt::choose(self.prompter, filtered.len())?;
            return Ok(filtered[index].repository.url.clone());
        }

        println!("No exact or partial match found. Please select a package from the list below:");
        table::print_package_candidates(&packages);
        let index = prompt::choose(self.prompter, packages.len())?;
        Ok(packages[index].repository.url.clone())
    }

    /// Rebuilds the local cache from the full remote catalog.
    pub fn update_official_repositories(&self) -> Result<()> {
        update_official_repositories(&self.cache, &self.registry)
    }
}

/// Rebuilds `cache` from the full remote catalog, with a spinner on stderr
/// while the crawl runs.
pub fn update_official_repositories(cache: &CacheStore, registry: &RegistryClient) -> Result<()> {
    let spinner = ProgressSpinner::start("Updating repositories...");
    let fetched = registry.fetch_all_verified_repositories();
    // The spinner must be fully stopped before anything else is printed.
    spinner.finish();

    let records = fetched?;
    cache.replace_all(&records)?;
    log::debug!("Cache refreshed with {} repositories", records.len());
    println!("Official repositories list updated successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::OFFICIAL_REPOS_FILE;
    use crate::core::prompt::ScriptedPrompter;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Loopback HTTP stub serving canned responses in connection order.
    fn serve_responses(responses: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            for body in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };

                let mut buf = [0u8; 4096];
                let mut head = Vec::new();
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let Ok(n) = stream.read(&mut buf) else { return };
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}")
    }

    fn record(name: &str, organization: &str, url: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            organization: organization.to_string(),
            url: url.to_string(),
        }
    }

    fn seeded_cache(dir: &TempDir, records: &[RepositoryRecord]) -> CacheStore {
        let cache = CacheStore::new(dir.path().join(OFFICIAL_REPOS_FILE));
        cache.replace_all(records).unwrap();
        cache
    }

    /// Registry pointed at a closed port: any network access fails loudly.
    fn unreachable_registry() -> RegistryClient {
        RegistryClient::with_base_url("http://127.0.0.1:1")
    }

    fn stub_registry(responses: Vec<String>) -> RegistryClient {
        RegistryClient::with_base_url(serve_responses(responses))
            .with_pauses(Duration::from_millis(1), Duration::ZERO)
    }

    fn package_json(name: &str, repo_name: &str, org: &str) -> String {
        format!(
            r#"{{"name":"{name}","repository":{{"name":"{repo_name}","url":"https://charts.example.com/{repo_name}","organization_name":"{org}","verified_publisher":true}}}}"#
        )
    }

    #[test]
    fn test_single_local_match_returns_without_prompting() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(
            &dir,
            &[record("nginx", "bitnami", "https://charts.bitnami.com/bitnami")],
        );
        let mut prompter = ScriptedPrompter::default();
        let mut resolver = Resolver::new(cache, unreachable_registry(), &mut prompter);

        let url = resolver.get_repository_url("nginx", "bitnami", "").unwrap();
        assert_eq!(url, "https://charts.bitnami.com/bitnami");
    }

    #[test]
    fn test_multiple_local_matches_selects_and_confirms() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(
            &dir,
            &[
                record("bitnami", "bitnami", "https://charts.bitnami.com/bitnami"),
                record("bitnami-full", "bitnami", "https://charts.bitnami.com/full"),
            ],
        );
        let mut prompter = ScriptedPrompter::new(["1", "Y"]);
        let mut resolver = Resolver::new(cache, unreachable_registry(), &mut prompter);

        let url = resolver.get_repository_url("nginx", "bitnami", "").unwrap();
        assert_eq!(url, "https://charts.bitnami.com/full");
    }

    #[test]
    fn test_declined_local_choice_is_terminal() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(
            &dir,
            &[
                record("bitnami", "bitnami", "https://charts.bitnami.com/bitnami"),
                record("bitnami-full", "bitnami", "https://charts.bitnami.com/full"),
            ],
        );
        let mut prompter = ScriptedPrompter::new(["0", "N"]);
        // Any fallback to the package search would hit the unreachable
        // registry and surface a transport error instead of Cancelled.
        let mut resolver = Resolver::new(cache, unreachable_registry(), &mut prompter);

        let err = resolver.get_repository_url("nginx", "bitnami", "").unwrap_err();
        assert!(matches!(err, HelmPilotError::Cancelled));
    }

    #[test]
    fn test_corrupt_cache_is_terminal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OFFICIAL_REPOS_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let mut prompter = ScriptedPrompter::default();
        let mut resolver = Resolver::new(
            CacheStore::new(path),
            unreachable_registry(),
            &mut prompter,
        );

        let err = resolver.get_repository_url("nginx", "bitnami", "").unwrap_err();
        assert!(matches!(err, HelmPilotError::CacheParseFailed { .. }));
    }

    #[test]
    fn test_zero_local_and_zero_remote_reaches_package_fallback() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(
            &dir,
            &[record("grafana", "grafana", "https://grafana.github.io/helm-charts")],
        );
        // Remote org search finds nothing, then the package search returns
        // two superstring matches of "redis".
        let registry = stub_registry(vec![
            "[]".to_string(),
            format!(
                r#"{{"total":2,"packages":[{},{}]}}"#,
                package_json("redis", "bitnami", "bitnami"),
                package_json("redis-cluster", "bitnami", "bitnami")
            ),
        ]);
        let mut prompter = ScriptedPrompter::new(["0"]);
        let mut resolver = Resolver::new(cache, registry, &mut prompter);

        // Multi-match selection returns directly, with no confirmation: the
        // scripted prompter has no answer left for one.
        let url = resolver.get_repository_url("redis", "acme", "").unwrap();
        assert_eq!(url, "https://charts.example.com/bitnami");
    }

    #[test]
    fn test_user_only_hint_searches_remote() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(
            &dir,
            &[record("grafana", "grafana", "https://grafana.github.io/helm-charts")],
        );
        let registry = stub_registry(vec![
            r#"[{"name":"jane-charts","url":"https://jane.example.com/charts","organization_name":"","verified_publisher":true}]"#.to_string(),
        ]);
        let mut prompter = ScriptedPrompter::default();
        let mut resolver = Resolver::new(cache, registry, &mut prompter);

        let url = resolver.get_repository_url("app", "", "jane").unwrap();
        assert_eq!(url, "https://jane.example.com/charts");
    }

    #[test]
    fn test_single_package_match_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(&dir, &[record("x", "x", "https://x.example.com")]);
        let registry = stub_registry(vec![format!(
            r#"{{"total":1,"packages":[{}]}}"#,
            package_json("redis", "bitnami", "bitnami")
        )]);
        let mut prompter = ScriptedPrompter::new(["Y"]);
        let mut resolver = Resolver::new(cache, registry, &mut prompter);

        let url = resolver.search_package_fallback("redis").unwrap();
        assert_eq!(url, "https://charts.example.com/bitnami");
    }

    #[test]
    fn test_declined_single_package_match_is_cancelled() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(&dir, &[record("x", "x", "https://x.example.com")]);
        let registry = stub_registry(vec![format!(
            r#"{{"total":1,"packages":[{}]}}"#,
            package_json("redis", "bitnami", "bitnami")
        )]);
        let mut prompter = ScriptedPrompter::new(["N"]);
        let mut resolver = Resolver::new(cache, registry, &mut prompter);

        let err = resolver.search_package_fallback("redis").unwrap_err();
        assert!(matches!(err, HelmPilotError::Cancelled));
    }

    #[test]
    fn test_zero_filtered_matches_presents_full_result_set() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(&dir, &[record("x", "x", "https://x.example.com")]);
        // Neither name contains the query; the whole unfiltered set is shown.
        let registry = stub_registry(vec![format!(
            r#"{{"total":2,"packages":[{},{}]}}"#,
            package_json("valkey", "valkey-io", "valkey"),
            package_json("keydb", "keydb-io", "keydb")
        )]);
        let mut prompter = ScriptedPrompter::new(["1"]);
        let mut resolver = Resolver::new(cache, registry, &mut prompter);

        let url = resolver.search_package_fallback("redis").unwrap();
        assert_eq!(url, "https://charts.example.com/keydb-io");
    }

    #[test]
    fn test_no_packages_found() {
        let dir = TempDir::new().unwrap();
        let cache = seeded_cache(&dir, &[record("x", "x", "https://x.example.com")]);
        let registry = stub_registry(vec![r#"{"total":0,"packages":[]}"#.to_string()]);
        let mut prompter = ScriptedPrompter::default();
        let mut resolver = Resolver::new(cache, registry, &mut prompter);

        let err = resolver.search_package_fallback("no-such-thing").unwrap_err();
        assert!(matches!(err, HelmPilotError::NoPackageFound));
    }

    #[test]
    fn test_absent_cache_triggers_refresh_before_local_search() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path().join(OFFICIAL_REPOS_FILE));
        // Catalog crawl: one page with an acme repository, then the empty
        // page that stops pagination. The local filter then matches without
        // any further network access.
        let registry = stub_registry(vec![
            format!(
                r#"{{"total":1,"packages":[{}]}}"#,
                package_json("widget", "acme-charts", "acme")
            ),
            r#"{"total":1,"packages":[]}"#.to_string(),
        ]);
        let mut prompter = ScriptedPrompter::default();
        let mut resolver = Resolver::new(cache.clone(), registry, &mut prompter);

        let url = resolver.get_repository_url("widget", "acme", "").unwrap();
        assert_eq!(url, "https://charts.example.com/acme-charts");
        assert!(cache.exists());
    }
}
