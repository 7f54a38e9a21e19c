//! Request authentication.
//!
//! Applies an [`AuthStrategy`] to an outgoing request. Secrets are only
//! exposed at the point the header is written.

use reqwest::RequestBuilder;
use secrecy::ExposeSecret;

use curator_config::AuthStrategy;

/// Attach credentials for `auth` to the request.
pub(crate) fn authorize(builder: RequestBuilder, auth: &AuthStrategy) -> RequestBuilder {
    match auth {
        AuthStrategy::None => builder,
        AuthStrategy::Basic { username, password } => builder.basic_auth(
            username,
            password.as_ref().map(|p| p.expose_secret().to_string()),
        ),
        AuthStrategy::ApiKey { key } => {
            builder.header("Authorization", format!("ApiKey {}", key.expose_secret()))
        }
    }
}
