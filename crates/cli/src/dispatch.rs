//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;
use curator_config::Config;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Run { action_file } => {
            commands::run::run(&config, &action_file, cli.dry_run).await?;
        }
        Commands::ShowIndices {
            filter_list,
            verbose,
        } => {
            commands::show_indices::run(&config, &filter_list, verbose).await?;
        }
    }
    Ok(())
}
