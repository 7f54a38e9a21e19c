//! Curator CLI - run index maintenance actions from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Merge the client config file, `CURATOR_*` environment and flags.
//! - Install logging and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Action semantics or REST calls (see `crates/engine` and `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` values are visible.
//! - Precedence is file, then environment, then flags; later layers win.

mod args;
mod commands;
mod dispatch;
mod error;
mod logging;

use std::time::Duration;

use args::Cli;
use clap::Parser;
use curator_config::{Config, ConfigError, ConfigLoader};
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};

/// Layer the config file, environment and flags.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path.clone());
    }
    loader = loader.from_file()?.from_env()?;

    if let Some(hosts) = &cli.hosts {
        loader = loader.with_hosts(hosts.clone());
    }
    if let Some(username) = &cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(password) = &cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(key) = &cli.api_key {
        loader = loader.with_api_key(key.clone());
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(level) = &cli.loglevel {
        loader = loader.with_loglevel(level.clone());
    }
    if let Some(format) = cli.logformat {
        loader = loader.with_logformat(format);
    }
    if let Some(path) = &cli.logfile {
        loader = loader.with_logfile(path.clone());
    }
    loader.build()
}

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigurationError.as_i32());
    }

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(ExitCode::ConfigurationError.as_i32());
        }
    };

    let log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(e.exit_code().as_i32());
        }
    };

    let exit_code = match run_command(cli, config).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    drop(log_guard);
    std::process::exit(exit_code.as_i32());
}
