//! Main API client implementation

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::endpoints::{GroupsApi, KeysApi, PinningApi, SignaturesApi, SwapsApi};
use crate::error::{ErrorDecoder, LooseErrorDecoder, PinataError, PinataResult};
use crate::request::RequestBuilder;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Response of the credential check endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTestResponse {
    /// Greeting returned for valid credentials
    pub message: String,
}

/// Pinata API client
///
/// Owns one connection pool and one [`Authenticator`]. Cloning is cheap and
/// clones share both, so a single client can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct PinataClient {
    inner: Client,
    config: Arc<ClientConfig>,
    auth: Arc<Authenticator>,
    error_decoder: Arc<dyn ErrorDecoder>,
}

impl PinataClient {
    /// Create a new client with credentials and configuration from environment
    ///
    /// # Errors
    ///
    /// Returns [`PinataError::Config`] when `PINATA_TIMEOUT_SECS` is not a
    /// number or the resulting configuration fails validation.
    pub fn new() -> PinataResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(Authenticator::from_env(), config)
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn with_auth(auth: Authenticator) -> PinataResult<Self> {
        Self::with_config(auth, ClientConfig::default())
    }

    /// Create a new client with specific configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid (see [`ClientConfig::validate`])
    /// or the HTTP client cannot be built.
    pub fn with_config(auth: Authenticator, config: ClientConfig) -> PinataResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| PinataError::config(format!("invalid user agent: {e}")))?;
        default_headers.insert(USER_AGENT, user_agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .default_headers(default_headers)
            .build()
            .map_err(PinataError::Network)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            auth: Arc::new(auth),
            error_decoder: Arc::new(LooseErrorDecoder),
        })
    }

    /// Point the client at a different base URL (e.g. a local mock server)
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).base_url = url.into();
        self
    }

    /// Replace the decoder used for non-2xx response bodies
    #[must_use]
    pub fn with_error_decoder(mut self, decoder: impl ErrorDecoder + 'static) -> Self {
        self.error_decoder = Arc::new(decoder);
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the credentials used to stamp requests
    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    pub(crate) fn http(&self) -> &Client {
        &self.inner
    }

    pub(crate) fn error_decoder(&self) -> &dyn ErrorDecoder {
        self.error_decoder.as_ref()
    }

    /// Start a request against `path`, which may contain `{name}` placeholders
    pub fn new_request(&self, method: Method, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, method, path)
    }

    /// Check that the configured credentials are accepted
    ///
    /// GET /data/testAuthentication
    pub async fn test_authentication(&self) -> PinataResult<AuthTestResponse> {
        self.new_request(Method::GET, "/data/testAuthentication")
            .send()
            .await
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access pinning, listing, and unpinning endpoints
    #[must_use]
    pub fn pinning(&self) -> PinningApi {
        PinningApi::new(self.clone())
    }

    /// Access group endpoints
    #[must_use]
    pub fn groups(&self) -> GroupsApi {
        GroupsApi::new(self.clone())
    }

    /// Access CID signature endpoints
    #[must_use]
    pub fn signatures(&self) -> SignaturesApi {
        SignaturesApi::new(self.clone())
    }

    /// Access hot swap endpoints
    #[must_use]
    pub fn swaps(&self) -> SwapsApi {
        SwapsApi::new(self.clone())
    }

    /// Access API key endpoints
    #[must_use]
    pub fn keys(&self) -> KeysApi {
        KeysApi::new(self.clone())
    }
}

impl fmt::Debug for PinataClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataClient")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .field("error_decoder", &self.error_decoder)
            .finish_non_exhaustive()
    }
}
