//! External `helm` binary collaborator.
//!
//! Drives the fixed three-step install contract: add the resolved repository
//! under the software name, refresh known repositories, then install the
//! chart `software/software` into the target namespace. Each step is fatal on
//! failure and reported upward verbatim.

use crate::core::error::{HelmPilotError, Result};
use crate::core::output::print_info;
use std::ffi::OsStr;
use std::process::{Command, Stdio};

/// Wrapper around the external `helm` executable.
pub struct HelmCli {
    program: String,
    verbose: bool,
}

impl HelmCli {
    /// Uses the `helm` binary from PATH.
    pub fn new(verbose: bool) -> Self {
        Self::with_program("helm", verbose)
    }

    /// Uses an alternate program, so tests can substitute a stand-in binary.
    pub fn with_program(program: impl Into<String>, verbose: bool) -> Self {
        Self {
            program: program.into(),
            verbose,
        }
    }

    /// Adds `repo_url` as a repository named `software`, refreshes
    /// repositories, and installs `software/software` into `namespace`,
    /// creating the namespace if absent.
    pub fn install(
        &self,
        namespace: &str,
        software: &str,
        repo_url: &str,
        version: Option<&str>,
        values: Option<&str>,
    ) -> Result<()> {
        if self.verbose {
            print_info("Adding Helm repository...");
        }
        self.run("repo add", ["repo", "add", software, repo_url])?;

        if self.verbose {
            print_info("Updating Helm repositories...");
        }
        self.run("repo update", ["repo", "update"])?;

        let chart = format!("{software}/{software}");
        let mut args = vec![
            "install".to_string(),
            software.to_string(),
            chart,
            "--namespace".to_string(),
            namespace.to_string(),
            "--create-namespace".to_string(),
        ];
        if let Some(version) = version {
            args.push("--version".to_string());
            args.push(version.to_string());
        }
        if let Some(values) = values {
            args.push("--values".to_string());
            args.push(values.to_string());
        }

        if self.verbose {
            print_info(&format!("Executing: helm {}", args.join(" ")));
        }
        self.run("install", &args)
    }

    fn run<I, S>(&self, step: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args);

        if self.verbose {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        log::debug!("Running {} {step}", self.program);
        let status = command
            .status()
            .map_err(HelmPilotError::helm_launch_failed)?;

        if !status.success() {
            log::error!("helm {step} exited with {status}");
            return Err(HelmPilotError::helm_step_failed(step, status));
        }

        Ok(())
    }
}
