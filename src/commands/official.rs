use crate::core::{
    cache::CacheStore,
    error::Result,
    output::print_section_header,
    registry::RegistryClient,
    resolver,
    table,
};

/// Print the cached official repositories as a table.
pub fn execute_official_list() -> Result<()> {
    let cache = CacheStore::default();
    let repos = cache.load_all()?;

    print_section_header("Official Repositories");
    table::print_repository_list(&repos);
    Ok(())
}

/// Refresh the official repositories cache from the remote catalog.
pub fn execute_official_update() -> Result<()> {
    resolver::update_official_repositories(&CacheStore::default(), &RegistryClient::new())
}

/// Refresh the cache, then print the repositories of one organization.
pub fn execute_official_query(organization: &str) -> Result<()> {
    println!("Updating official repositories...");
    let cache = CacheStore::default();
    resolver::update_official_repositories(&cache, &RegistryClient::new())?;

    let repos = cache.repositories_for_organization(organization)?;
    print_section_header(&format!("Repositories for {organization}"));
    table::print_repository_list(&repos);
    Ok(())
}
