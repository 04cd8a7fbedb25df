use crate::core::{
    cache::CacheStore,
    error::Result,
    helm::HelmCli,
    output::print_success,
    prompt::ConsolePrompter,
    registry::RegistryClient,
    resolver::Resolver,
};

/// Resolve `software` to a chart repository URL and install it into
/// `namespace` via the external helm binary.
#[allow(clippy::too_many_arguments)]
pub fn execute_install(
    namespace: &str,
    software: &str,
    org: &str,
    user: &str,
    version: Option<&str>,
    values: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let mut prompter = ConsolePrompter;
    let mut resolver = Resolver::new(
        CacheStore::default(),
        RegistryClient::new(),
        &mut prompter,
    );

    let repo_url = resolver.get_repository_url(software, org, user)?;
    log::debug!("Resolved '{software}' to repository {repo_url}");

    let helm = HelmCli::new(verbose);
    helm.install(namespace, software, &repo_url, version, values)?;

    print_success("Installation completed successfully!");
    Ok(())
}
