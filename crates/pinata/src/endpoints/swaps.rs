//! Hot swap endpoints
//!
//! A swap makes gateway requests for one CID serve the content of another.

use crate::client::PinataClient;
use crate::error::{PinataError, PinataResult};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const SWAP_PATH: &str = "/v3/ipfs/swap/{cid}";

/// Swaps API interface
#[derive(Clone)]
pub struct SwapsApi {
    client: PinataClient,
}

impl SwapsApi {
    /// Create a new swaps API interface
    pub(crate) fn new(client: PinataClient) -> Self {
        Self { client }
    }

    /// Serve `swap_cid` in place of `cid`
    ///
    /// PUT /v3/ipfs/swap/{cid}
    pub async fn add(&self, cid: &str, swap_cid: &str) -> PinataResult<AddSwapResponse> {
        if cid.is_empty() || swap_cid.is_empty() {
            return Err(PinataError::validation("cid and swapcid are required"));
        }

        self.client
            .new_request(Method::PUT, SWAP_PATH)
            .path_param("cid", cid)
            .json_body(&json!({ "swapCid": swap_cid }))?
            .send()
            .await
    }

    /// Swap history of a CID as seen through `domain`
    ///
    /// GET /v3/ipfs/swap/{cid}?domain=
    pub async fn history(&self, cid: &str, domain: &str) -> PinataResult<SwapHistoryResponse> {
        if cid.is_empty() || domain.is_empty() {
            return Err(PinataError::validation("cid and domain are required"));
        }

        self.client
            .new_request(Method::GET, SWAP_PATH)
            .path_param("cid", cid)
            .query_param("domain", domain)
            .send()
            .await
    }

    /// Remove the swap for a CID
    ///
    /// DELETE /v3/ipfs/swap/{cid}
    pub async fn remove(&self, cid: &str) -> PinataResult<RemoveSwapResponse> {
        if cid.is_empty() {
            return Err(PinataError::validation("cid is required"));
        }

        self.client
            .new_request(Method::DELETE, SWAP_PATH)
            .path_param("cid", cid)
            .send()
            .await
    }
}

/// One swap mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapData {
    /// CID now served
    pub mapped_cid: String,
    /// When the swap was made
    pub created_at: DateTime<Utc>,
}

/// Response of [`SwapsApi::add`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSwapResponse {
    /// The new mapping
    pub data: SwapData,
}

/// Response of [`SwapsApi::history`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapHistoryResponse {
    /// Mappings, newest first
    #[serde(default)]
    pub data: Vec<SwapData>,
}

/// Response of [`SwapsApi::remove`]; the payload shape is undocumented
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoveSwapResponse {
    /// Raw payload
    #[serde(default)]
    pub data: Value,
}
