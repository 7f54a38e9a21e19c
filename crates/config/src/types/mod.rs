//! Configuration types.
//!
//! Responsibilities:
//! - Re-export connection, auth and logging types.
//!
//! Does NOT handle:
//! - Loading (see `loader`) or validation (see `schema`).

mod auth;
mod connection;
mod logging;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig, TlsConfig};
pub use logging::{LogFormat, LoggingConfig};
