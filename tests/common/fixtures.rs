//! Test data generation utilities and predefined scenarios
//!
//! Provides a temporary workspace holding the cache file and a fake `helm`
//! binary that records every invocation, so install flows can be exercised
//! end-to-end without a cluster or network access.

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variable the fake helm script appends its argv to.
const HELM_LOG_ENV: &str = "HELM_PILOT_TEST_LOG";

pub struct TestWorkspace {
    /// Working directory of the command under test; the cache file lives here
    pub dir: TempDir,
    /// Directory prepended to PATH, holding the fake helm binary
    pub bin_dir: PathBuf,
    /// File the fake helm appends each invocation to
    pub helm_log: PathBuf,
}

pub fn setup_workspace() -> Result<TestWorkspace> {
    let dir = TempDir::new()?;
    let bin_dir = dir.path().join("bin");
    fs::create_dir_all(&bin_dir)?;
    let helm_log = dir.path().join("helm-invocations.log");

    Ok(TestWorkspace {
        dir,
        bin_dir,
        helm_log,
    })
}

/// Installs a fake `helm` into the workspace bin directory that logs its
/// arguments and exits with `exit_code`.
pub fn install_fake_helm(workspace: &TestWorkspace, exit_code: i32) -> Result<()> {
    let script = format!(
        "#!/bin/sh\necho \"helm $@\" >> \"${HELM_LOG_ENV}\"\nexit {exit_code}\n"
    );
    let path = workspace.bin_dir.join("helm");
    fs::write(&path, script)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Writes `official_repos.json` into the workspace from (name, organization,
/// url) triples, using the wire field names.
pub fn seed_cache(workspace: &TestWorkspace, records: &[(&str, &str, &str)]) -> Result<()> {
    let entries: Vec<String> = records
        .iter()
        .map(|(name, organization, url)| {
            format!(
                "  {{\n    \"name\": \"{name}\",\n    \"organization_name\": \"{organization}\",\n    \"url\": \"{url}\"\n  }}"
            )
        })
        .collect();

    fs::write(
        workspace.dir.path().join("official_repos.json"),
        format!("[\n{}\n]", entries.join(",\n")),
    )?;
    Ok(())
}

/// Builds a helm-pilot command running inside the workspace, with the fake
/// helm first on PATH.
pub fn helm_pilot_cmd(workspace: &TestWorkspace) -> Result<Command> {
    let mut cmd = Command::cargo_bin("helm-pilot")?;
    let path = format!(
        "{}:{}",
        workspace.bin_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );
    cmd.current_dir(workspace.dir.path())
        .env("PATH", path)
        .env(HELM_LOG_ENV, &workspace.helm_log);
    Ok(cmd)
}

/// Every invocation the fake helm recorded, one line per call.
pub fn helm_invocations(workspace: &TestWorkspace) -> Vec<String> {
    fs::read_to_string(&workspace.helm_log)
        .map(|content| content.lines().map(String::from).collect())
        .unwrap_or_default()
}
