//! Kubernetes Manifest Generator CLI
//!
//! A command-line tool for generating Kubernetes manifests from structured
//! resource requests, with best-practice analysis and validation.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{analyze, generate, order, validate};
use std::path::PathBuf;

/// Kubernetes Manifest Generator CLI
#[derive(Parser)]
#[command(name = "mgen")]
#[command(author, version, about = "CLI for the Kubernetes Manifest Generator", long_about = None)]
pub struct Cli {
    /// Output format (falls back to the config file, then table)
    #[arg(long, short, global = true, env = "MGEN_FORMAT")]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate YAML manifests from a resource request
    Generate {
        /// Request file (.json, .yaml or .yml), or - for stdin
        input: String,

        /// Write the manifest to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Prepend a Namespace document for non-default namespaces
        #[arg(long)]
        include_namespace: bool,
    },

    /// Show warnings, suggestions, dependencies and commands for a request
    Analyze {
        /// Request file (.json, .yaml or .yml), or - for stdin
        input: String,
    },

    /// Validate a resource request
    Validate {
        /// Request file (.json, .yaml or .yml), or - for stdin
        input: String,
    },

    /// Show the recommended apply order across resource kinds
    Order,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load()?;
    let format = cli.format.or_else(|| config.format()).unwrap_or_default();

    match cli.command {
        Commands::Generate {
            input,
            output,
            include_namespace,
        } => {
            let include_namespace = include_namespace || config.include_namespace.unwrap_or(false);
            generate::run(&input, output, include_namespace, format)?;
        }
        Commands::Analyze { input } => {
            analyze::run(&input, format)?;
        }
        Commands::Validate { input } => {
            validate::run(&input, format)?;
        }
        Commands::Order => {
            order::run(format)?;
        }
    }

    Ok(())
}
