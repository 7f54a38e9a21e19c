//! Configuration loader for files, environment variables and flags.
//!
//! Responsibilities:
//! - Load the YAML client configuration file (`~/.curator/curator.yml` by default).
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Action files (see `action_file`).
//! - Applying the logging section (the CLI owns subscriber setup).
//!
//! Invariants / Assumptions:
//! - Precedence is file, then environment, then builder overrides; the caller
//!   applies them in that order.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod file;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use file::{default_config_path, read_yaml_document};

#[cfg(test)]
mod tests;
