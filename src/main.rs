use clap::{Parser, Subcommand};
use helm_pilot::commands::*;
use helm_pilot::core::{error::Result, print_error};
use std::env;

#[derive(Parser)]
#[command(name = "helm-pilot")]
#[command(about = "Install Kubernetes applications with Helm via Artifact Hub")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a Kubernetes application using Helm
    Install {
        /// Target namespace (created if absent)
        namespace: String,
        /// Software name to resolve on Artifact Hub
        software: String,
        /// Restrict the search to an organization (optional)
        #[arg(short = 'o', long)]
        org: Option<String>,
        /// Restrict the search to a user (optional)
        #[arg(short = 'u', long)]
        user: Option<String>,
        /// Chart version to install (optional)
        #[arg(short = 'v', long)]
        version: Option<String>,
        /// Values file passed through to helm (optional)
        #[arg(long)]
        values: Option<String>,
        /// Narrate each installer step
        #[arg(long)]
        verbose: bool,
    },
    /// Manage the list of official repositories
    Official {
        #[command(subcommand)]
        command: OfficialCommands,
    },
}

#[derive(Subcommand)]
enum OfficialCommands {
    /// List the cached official repositories
    List,
    /// Update the list of official repositories
    Update,
    /// Update the cache and show one organization's repositories
    Query {
        /// Organization name to filter by
        organization: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli.command) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Install {
            namespace,
            software,
            org,
            user,
            version,
            values,
            verbose,
        } => execute_install(
            &namespace,
            &software,
            org.as_deref().unwrap_or_default(),
            user.as_deref().unwrap_or_default(),
            version.as_deref(),
            values.as_deref(),
            verbose,
        ),
        Commands::Official { command } => match command {
            OfficialCommands::List => execute_official_list(),
            OfficialCommands::Update => execute_official_update(),
            OfficialCommands::Query { organization } => execute_official_query(&organization),
        },
    }
}
