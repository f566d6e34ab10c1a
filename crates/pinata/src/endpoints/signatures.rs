//! CID signature endpoints

use crate::client::PinataClient;
use crate::error::{PinataError, PinataResult};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

const SIGNATURE_PATH: &str = "/v3/ipfs/signature/{cid}";

/// Signatures API interface
#[derive(Clone)]
pub struct SignaturesApi {
    client: PinataClient,
}

impl SignaturesApi {
    /// Create a new signatures API interface
    pub(crate) fn new(client: PinataClient) -> Self {
        Self { client }
    }

    /// Attach a signature to a CID
    ///
    /// POST /v3/ipfs/signature/{cid}
    pub async fn add(&self, cid: &str, signature: &str) -> PinataResult<CidSignature> {
        if cid.is_empty() || signature.is_empty() {
            return Err(PinataError::validation("cid and signature is required"));
        }

        self.client
            .new_request(Method::POST, SIGNATURE_PATH)
            .path_param("cid", cid)
            .json_body(&json!({ "signature": signature }))?
            .send()
            .await
    }

    /// Get the signature attached to a CID
    ///
    /// GET /v3/ipfs/signature/{cid}
    pub async fn get(&self, cid: &str) -> PinataResult<CidSignature> {
        if cid.is_empty() {
            return Err(PinataError::validation("cid is required"));
        }

        self.client
            .new_request(Method::GET, SIGNATURE_PATH)
            .path_param("cid", cid)
            .send()
            .await
    }

    /// Remove the signature from a CID
    ///
    /// DELETE /v3/ipfs/signature/{cid}
    pub async fn remove(&self, cid: &str) -> PinataResult<()> {
        if cid.is_empty() {
            return Err(PinataError::validation("cid is required"));
        }

        self.client
            .new_request(Method::DELETE, SIGNATURE_PATH)
            .path_param("cid", cid)
            .send_discard()
            .await
    }
}

/// Signature record wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CidSignature {
    /// Signature record
    pub data: SignatureData,
}

/// A CID and its signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureData {
    /// Signed CID
    pub cid: String,
    /// Hex-encoded signature
    pub signature: String,
}
