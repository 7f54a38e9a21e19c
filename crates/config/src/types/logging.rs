//! Logging configuration types.
//!
//! The subscriber itself is installed by the CLI; this module only carries
//! the settings read from the config file or flags.

use std::path::PathBuf;

use serde::Deserialize;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable text.
    #[default]
    Default,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected default or json)")),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub loglevel: String,
    pub logformat: LogFormat,
    pub logfile: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            loglevel: DEFAULT_LOG_LEVEL.to_string(),
            logformat: LogFormat::Default,
            logfile: None,
        }
    }
}

impl LoggingConfig {
    /// The level as a `tracing` filter directive (`WARNING` maps to `warn`).
    pub fn filter_directive(&self) -> String {
        match self.loglevel.to_ascii_lowercase().as_str() {
            "warning" => "warn".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_maps_warning() {
        let config = LoggingConfig {
            loglevel: "WARNING".to_string(),
            ..Default::default()
        };
        assert_eq!(config.filter_directive(), "warn");
        assert_eq!(LoggingConfig::default().filter_directive(), "info");
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("logstash".parse::<LogFormat>().is_err());
    }
}
