//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Carry the flag layer that overrides the config file and environment.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `CURATOR_*` variables; `ConfigLoader::from_env` does.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use curator_config::LogFormat;

#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Curator - run index maintenance actions against a cluster", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  curator run actions.yml\n  curator --dry-run run actions.yml\n  curator --hosts https://es.internal:9200 show-indices --filter-list '[{\"filtertype\":\"pattern\",\"kind\":\"prefix\",\"value\":\"logs-\"}]'\n"
)]
pub struct Cli {
    /// Path to the client configuration file (default: ~/.curator/curator.yml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cluster URL (e.g., https://localhost:9200)
    #[arg(long, global = true)]
    pub hosts: Option<String>,

    /// Username for basic authentication
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// API key (preferred over username/password)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of retries for transient failures
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Log level (DEBUG, INFO, WARNING, ERROR)
    #[arg(long, global = true)]
    pub loglevel: Option<String>,

    /// Log format (default or json)
    #[arg(long, global = true)]
    pub logformat: Option<LogFormat>,

    /// Append log lines to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// Log what would happen without changing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every action in an action file
    Run {
        /// YAML action file
        action_file: PathBuf,
    },

    /// Print the indices left after applying a filter list
    ShowIndices {
        /// Filter list as JSON (a list of filter mappings, or a single one)
        #[arg(long, default_value = r#"[{"filtertype":"none"}]"#)]
        filter_list: String,

        /// Print name, state, document count, size and creation date as JSON
        #[arg(long)]
        verbose: bool,
    },
}
