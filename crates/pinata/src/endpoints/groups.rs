//! Group API endpoints

use crate::client::PinataClient;
use crate::error::{PinataError, PinataResult};
use crate::request::RequestBuilder;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Groups API interface
#[derive(Clone)]
pub struct GroupsApi {
    client: PinataClient,
}

impl GroupsApi {
    /// Create a new groups API interface
    pub(crate) fn new(client: PinataClient) -> Self {
        Self { client }
    }

    /// Create a group
    ///
    /// POST /groups
    pub async fn create(&self, name: &str) -> PinataResult<PinataGroup> {
        if name.is_empty() {
            return Err(PinataError::validation("group name is required"));
        }

        self.client
            .new_request(Method::POST, "/groups")
            .json_body(&json!({ "name": name }))?
            .send()
            .await
    }

    /// Get a group by ID
    ///
    /// GET /groups/{id}
    pub async fn get(&self, id: &str) -> PinataResult<PinataGroup> {
        if id.is_empty() {
            return Err(PinataError::validation("group id is required"));
        }

        self.client
            .new_request(Method::GET, "/groups/{id}")
            .path_param("id", id)
            .send()
            .await
    }

    /// List groups
    ///
    /// GET /groups
    pub async fn list(&self, options: Option<&ListGroupsOptions>) -> PinataResult<Vec<PinataGroup>> {
        let mut request = self.client.new_request(Method::GET, "/groups");
        if let Some(options) = options {
            request = options.apply(request);
        }
        request.send().await
    }

    /// Rename a group
    ///
    /// PUT /groups/{id}
    pub async fn update(&self, id: &str, name: &str) -> PinataResult<PinataGroup> {
        if id.is_empty() || name.is_empty() {
            return Err(PinataError::validation(
                "group id and new group name are required",
            ));
        }

        self.client
            .new_request(Method::PUT, "/groups/{id}")
            .path_param("id", id)
            .json_body(&json!({ "name": name }))?
            .send()
            .await
    }

    /// Add CIDs to a group
    ///
    /// PUT /groups/{id}/cids
    pub async fn add_cids<S: AsRef<str>>(&self, id: &str, cids: &[S]) -> PinataResult<()> {
        self.change_cids(Method::PUT, id, cids).await
    }

    /// Remove CIDs from a group
    ///
    /// DELETE /groups/{id}/cids
    pub async fn remove_cids<S: AsRef<str>>(&self, id: &str, cids: &[S]) -> PinataResult<()> {
        self.change_cids(Method::DELETE, id, cids).await
    }

    /// Delete a group; its CIDs stay pinned
    ///
    /// DELETE /groups/{id}
    pub async fn remove(&self, id: &str) -> PinataResult<()> {
        if id.is_empty() {
            return Err(PinataError::validation("group id is required"));
        }

        self.client
            .new_request(Method::DELETE, "/groups/{id}")
            .path_param("id", id)
            .send_discard()
            .await
    }

    async fn change_cids<S: AsRef<str>>(
        &self,
        method: Method,
        id: &str,
        cids: &[S],
    ) -> PinataResult<()> {
        if id.is_empty() || cids.is_empty() {
            return Err(PinataError::validation(
                "group id and at least one cid is required",
            ));
        }

        let cids: Vec<&str> = cids.iter().map(|cid| cid.as_ref()).collect();
        self.client
            .new_request(method, "/groups/{id}/cids")
            .path_param("id", id)
            .json_body(&json!({ "cids": cids }))?
            .send_discard()
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A named collection of pins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinataGroup {
    /// Group ID
    pub id: String,
    /// Owning user
    #[serde(rename = "user_id")]
    pub owner_id: String,
    /// Display name
    pub name: String,
    /// Creation time
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Last update time
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Filters for [`GroupsApi::list`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGroupsOptions {
    /// Only groups whose name contains this text
    pub name_contains: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl ListGroupsOptions {
    /// Create empty filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by name substring
    #[must_use]
    pub fn with_name_contains(mut self, text: impl Into<String>) -> Self {
        self.name_contains = Some(text.into());
        self
    }

    /// Set page size and offset
    #[must_use]
    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    fn apply<'a>(&self, mut request: RequestBuilder<'a>) -> RequestBuilder<'a> {
        if let Some(text) = &self.name_contains {
            request = request.query_param("nameContains", text);
        }
        if let Some(limit) = self.limit {
            request = request.query_param("limit", limit);
        }
        if let Some(offset) = self.offset {
            request = request.query_param("offset", offset);
        }
        request
    }
}
