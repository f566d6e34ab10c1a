//! Credentials and request stamping

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use std::env;
use std::fmt;
use tracing::warn;

/// API key header expected by the pinning endpoints
const API_KEY_HEADER: &str = "pinata_api_key";

/// API secret header expected by the pinning endpoints
const API_SECRET_HEADER: &str = "pinata_secret_api_key";

/// Credentials for the Pinata API.
///
/// Holds either an API key/secret pair, a bearer token (JWT), or both. A
/// non-empty bearer token always wins: only `Authorization: Bearer ...` is
/// sent and the key/secret pair is ignored.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Authenticator {
    api_key: Option<String>,
    api_secret: Option<String>,
    bearer_token: Option<String>,
}

impl Authenticator {
    /// Create an authenticator from any combination of credentials
    pub fn new(
        api_key: Option<String>,
        api_secret: Option<String>,
        bearer_token: Option<String>,
    ) -> Self {
        Self {
            api_key,
            api_secret,
            bearer_token,
        }
    }

    /// Authenticate with an API key/secret pair
    pub fn from_api_key(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::new(Some(api_key.into()), Some(api_secret.into()), None)
    }

    /// Authenticate with a bearer token (JWT)
    pub fn from_bearer_token(token: impl Into<String>) -> Self {
        Self::new(None, None, Some(token.into()))
    }

    /// Read credentials from the environment
    ///
    /// - `PINATA_JWT`: bearer token
    /// - `PINATA_API_KEY` / `PINATA_API_SECRET`: key/secret pair
    ///
    /// Missing variables are left unset; nothing is validated here.
    pub fn from_env() -> Self {
        Self::new(
            env::var("PINATA_API_KEY").ok(),
            env::var("PINATA_API_SECRET").ok(),
            env::var("PINATA_JWT").ok(),
        )
    }

    /// The bearer token, if one is set and non-empty
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Set the authentication headers on an outgoing request.
    ///
    /// Exactly one mechanism is stamped. Empty key/secret values are sent
    /// as-is and left for the service to reject. A credential that is not a
    /// legal header value is skipped with a warning.
    pub fn stamp(&self, headers: &mut HeaderMap) {
        if let Some(token) = self.bearer_token() {
            insert_credential(headers, AUTHORIZATION, &format!("Bearer {token}"));
            return;
        }

        insert_credential(
            headers,
            HeaderName::from_static(API_KEY_HEADER),
            self.api_key.as_deref().unwrap_or_default(),
        );
        insert_credential(
            headers,
            HeaderName::from_static(API_SECRET_HEADER),
            self.api_secret.as_deref().unwrap_or_default(),
        );
    }
}

fn insert_credential(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(name, value);
        }
        Err(_) => warn!(header = %name, "Credential is not a valid header value, skipping"),
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Authenticator")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("bearer_token", &redact(&self.bearer_token))
            .finish()
    }
}
