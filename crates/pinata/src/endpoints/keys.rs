//! API key management endpoints
//!
//! Both the legacy `/users` routes and the `/v3/pinata/keys` routes are
//! exposed; they return the same shapes.

use crate::client::PinataClient;
use crate::error::{PinataError, PinataResult};
use crate::request::RequestBuilder;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// API keys interface
#[derive(Clone)]
pub struct KeysApi {
    client: PinataClient,
}

impl KeysApi {
    /// Create a new keys API interface
    pub(crate) fn new(client: PinataClient) -> Self {
        Self { client }
    }

    /// Generate a key
    ///
    /// POST /users/generateApiKey
    pub async fn generate(&self, options: &GenerateApiKeyOptions) -> PinataResult<ApiKeySecret> {
        self.generate_at("/users/generateApiKey", options).await
    }

    /// Generate a key
    ///
    /// POST /v3/pinata/keys
    pub async fn generate_v3(&self, options: &GenerateApiKeyOptions) -> PinataResult<ApiKeySecret> {
        self.generate_at("/v3/pinata/keys", options).await
    }

    /// List keys
    ///
    /// GET /users/apiKeys
    pub async fn list(&self) -> PinataResult<ApiKeyList> {
        self.client
            .new_request(Method::GET, "/users/apiKeys")
            .send()
            .await
    }

    /// List keys with filters
    ///
    /// GET /v3/pinata/keys
    pub async fn list_v3(&self, options: Option<&ListApiKeysOptions>) -> PinataResult<ApiKeyList> {
        let mut request = self.client.new_request(Method::GET, "/v3/pinata/keys");
        if let Some(options) = options {
            request = options.apply(request);
        }
        request.send().await
    }

    /// Revoke a key
    ///
    /// PUT /users/revokeApiKey
    pub async fn revoke(&self, api_key: &str) -> PinataResult<()> {
        if api_key.is_empty() {
            return Err(PinataError::validation("api key is required"));
        }

        self.client
            .new_request(Method::PUT, "/users/revokeApiKey")
            .json_body(&json!({ "apiKey": api_key }))?
            .send_discard()
            .await
    }

    /// Revoke a key
    ///
    /// PUT /v3/pinata/keys/{key}
    pub async fn revoke_v3(&self, key: &str) -> PinataResult<()> {
        if key.is_empty() {
            return Err(PinataError::validation("key is required"));
        }

        self.client
            .new_request(Method::PUT, "/v3/pinata/keys/{key}")
            .path_param("key", key)
            .send_discard()
            .await
    }

    async fn generate_at(
        &self,
        path: &str,
        options: &GenerateApiKeyOptions,
    ) -> PinataResult<ApiKeySecret> {
        if options.key_name.is_empty() {
            return Err(PinataError::validation("key name is required"));
        }

        self.client
            .new_request(Method::POST, path)
            .json_body(options)?
            .send()
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Options for generating a key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateApiKeyOptions {
    /// Display name of the key
    pub key_name: String,
    /// What the key may do
    pub permissions: Permissions,
    /// Number of uses before the key stops working
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
}

impl GenerateApiKeyOptions {
    /// Key with no permissions
    #[must_use]
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            ..Self::default()
        }
    }

    /// Key with full access
    #[must_use]
    pub fn admin(key_name: impl Into<String>) -> Self {
        Self::new(key_name).with_permissions(Permissions {
            admin: true,
            endpoints: None,
        })
    }

    /// Replace the permissions
    #[must_use]
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Limit how many times the key may be used
    #[must_use]
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }
}

/// What a generated key may do
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Full access; `endpoints` is ignored when set
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub admin: bool,
    /// Granted endpoints of a scoped key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<EndpointPermissions>,
}

/// Per-endpoint permissions of a scoped key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPermissions {
    /// Data endpoints
    pub data: DataScope,
    /// Pinning endpoints
    pub pinning: PinningScope,
}

/// Data endpoint permissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataScope {
    /// `/data/pinList`
    pub pin_list: bool,
    /// `/data/userPinnedDataTotal`
    pub user_pinned_data_total: bool,
}

/// Pinning endpoint permissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinningScope {
    /// `/pinning/hashMetadata`
    #[serde(rename = "hashMetadata")]
    pub hash_metadata: bool,
    /// `/pinning/hashPinPolicy`
    #[serde(rename = "hashPinPolicy")]
    pub hash_pin_policy: bool,
    /// `/pinning/pinByHash`
    #[serde(rename = "pinByHash")]
    pub pin_by_hash: bool,
    /// `/pinning/pinFileToIPFS`
    #[serde(rename = "pinFileToIPFS")]
    pub pin_file_to_ipfs: bool,
    /// `/pinning/pinJSONToIPFS`
    #[serde(rename = "pinJSONToIPFS")]
    pub pin_json_to_ipfs: bool,
    /// `/pinning/pinJobs`
    #[serde(rename = "pinJobs")]
    pub pin_jobs: bool,
    /// `/pinning/unpin`
    pub unpin: bool,
    /// `/pinning/userPinPolicy`
    #[serde(rename = "userPinPolicy")]
    pub user_pin_policy: bool,
}

/// Pinning Service API permissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsaScope {
    /// Pin object operations
    pub pins: PsaPinsScope,
}

/// Pinning Service API pin object permissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PsaPinsScope {
    /// Add pins
    pub add_pin_object: bool,
    /// Read one pin
    pub get_pin_object: bool,
    /// List pins
    pub list_pin_objects: bool,
    /// Remove pins
    pub remove_pin_object: bool,
    /// Replace pins
    pub replace_pin_object: bool,
}

/// Endpoints granted to an existing key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeEndpoints {
    /// Data endpoints
    pub data: DataScope,
    /// Pinning endpoints
    pub pinning: PinningScope,
    /// Pinning Service API
    pub psa: PsaScope,
}

/// Scopes of an existing key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyScopes {
    /// Granted endpoints
    pub endpoints: ScopeEndpoints,
    /// Full access
    pub admin: bool,
}

/// Credentials returned once, when a key is generated
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeySecret {
    /// Bearer token for the new key
    #[serde(rename = "JWT")]
    pub jwt: String,
    /// Public key half
    pub pinata_api_key: String,
    /// Secret key half
    pub pinata_api_secret: String,
}

impl std::fmt::Debug for ApiKeySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeySecret")
            .field("jwt", &"<redacted>")
            .field("pinata_api_key", &self.pinata_api_key)
            .field("pinata_api_secret", &"<redacted>")
            .finish()
    }
}

/// Page of API keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeyList {
    /// This page
    pub keys: Vec<ApiKey>,
    /// Total keys
    pub count: u64,
}

/// An existing API key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    /// Key record ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Public key
    pub key: String,
    /// Hashed secret
    pub secret: String,
    /// Use limit, if any
    pub max_uses: Option<u32>,
    /// Times used
    pub uses: u32,
    /// Owning user
    pub user_id: String,
    /// Granted scopes
    pub scopes: KeyScopes,
    /// Whether the key was revoked
    pub revoked: bool,
    /// Creation time
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for [`KeysApi::list_v3`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListApiKeysOptions {
    /// Only revoked or only active keys
    pub revoked: Option<bool>,
    /// Only keys with a use limit
    pub limited_use: Option<bool>,
    /// Only keys that hit their use limit
    pub exhausted: Option<bool>,
    /// Only keys with this name
    pub name: Option<String>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl ListApiKeysOptions {
    fn apply<'a>(&self, mut request: RequestBuilder<'a>) -> RequestBuilder<'a> {
        if let Some(name) = &self.name {
            request = request.query_param("name", name);
        }
        if let Some(offset) = self.offset {
            request = request.query_param("offset", offset);
        }
        if let Some(revoked) = self.revoked {
            request = request.query_param("revoked", revoked);
        }
        if let Some(limited_use) = self.limited_use {
            request = request.query_param("limitedUse", limited_use);
        }
        if let Some(exhausted) = self.exhausted {
            request = request.query_param("exhausted", exhausted);
        }
        request
    }
}
