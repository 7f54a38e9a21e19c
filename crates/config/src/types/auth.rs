//! Authentication types for cluster connections.
//!
//! Responsibilities:
//! - Hold credentials as read from the config file, env vars or flags.
//! - Resolve them into a single authentication strategy.
//!
//! Does NOT handle:
//! - Applying credentials to HTTP requests (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - An API key wins over username/password when both are present.

use secrecy::SecretString;

/// Strategy for authenticating with the cluster.
#[derive(Debug, Clone, Default)]
pub enum AuthStrategy {
    /// No credentials.
    #[default]
    None,
    /// HTTP basic authentication.
    Basic {
        username: String,
        password: Option<SecretString>,
    },
    /// `Authorization: ApiKey <key>` authentication.
    ApiKey { key: SecretString },
}

/// Credentials gathered from all configuration sources.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub api_key: Option<SecretString>,
}

impl AuthConfig {
    /// Resolve the credentials into a strategy.
    pub fn strategy(&self) -> AuthStrategy {
        if let Some(key) = &self.api_key {
            return AuthStrategy::ApiKey { key: key.clone() };
        }
        match &self.username {
            Some(username) => AuthStrategy::Basic {
                username: username.clone(),
                password: self.password.clone(),
            },
            None => AuthStrategy::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_api_key_takes_precedence() {
        let auth = AuthConfig {
            username: Some("elastic".to_string()),
            password: Some(SecretString::new("changeme".to_string().into())),
            api_key: Some(SecretString::new("abc123".to_string().into())),
        };
        match auth.strategy() {
            AuthStrategy::ApiKey { key } => assert_eq!(key.expose_secret(), "abc123"),
            other => panic!("unexpected strategy: {other:?}"),
        }
    }

    #[test]
    fn test_username_without_password_is_basic() {
        let auth = AuthConfig {
            username: Some("elastic".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            auth.strategy(),
            AuthStrategy::Basic { password: None, .. }
        ));
    }

    #[test]
    fn test_no_credentials() {
        assert!(matches!(AuthConfig::default().strategy(), AuthStrategy::None));
    }
}
