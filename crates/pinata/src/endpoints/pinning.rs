//! Pinning API endpoints
//!
//! Uploading files, folders, URLs, and JSON; pinning existing CIDs; listing
//! pins and pin jobs; updating pin metadata; unpinning.

use crate::client::PinataClient;
use crate::error::{PinataError, PinataResult};
use crate::pool::WorkerPool;
use crate::request::RequestBuilder;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Upload endpoint for files, folders, and fetched URLs
const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";

/// Arbitrary key/value metadata attached to a pin
pub type KeyValues = Map<String, Value>;

/// Pinning API interface
#[derive(Clone)]
pub struct PinningApi {
    client: PinataClient,
}

impl PinningApi {
    /// Create a new pinning API interface
    pub(crate) fn new(client: PinataClient) -> Self {
        Self { client }
    }

    /// Upload and pin a single local file
    ///
    /// POST /pinning/pinFileToIPFS
    ///
    /// The whole `options` value is sent as the `pinataOptions` form field.
    pub async fn pin_file(
        &self,
        path: impl AsRef<Path>,
        options: Option<&PinOptions>,
    ) -> PinataResult<PinResponse> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(PinataError::validation("filepath is required"));
        }

        let contents = read_file(path).await?;
        let mut form = new_form().part("file", file_part(contents, base_name(path))?);

        if let Some(options) = options {
            let options = serde_json::to_string(options).map_err(PinataError::Serialization)?;
            form = form.text("pinataOptions", options);
        }

        self.client
            .new_request(Method::POST, PIN_FILE_PATH)
            .multipart_body(form)
            .send()
            .await
    }

    /// Pin several local files concurrently, one request per file.
    ///
    /// `options[i]` applies to `paths[i]`; paths past the end of `options`
    /// are pinned without options. At most
    /// [`MAX_WORKERS`](crate::pool::MAX_WORKERS) uploads run at once.
    ///
    /// Fails fast: the first failed upload is returned immediately and the
    /// outcomes of uploads still in flight are dropped. Files already pinned
    /// stay pinned. Unlike [`delete_files`](Self::delete_files), there is no
    /// way to learn which other items succeeded.
    #[instrument(skip_all, fields(count = paths.len()))]
    pub async fn pin_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: Option<&[PinOptions]>,
    ) -> PinataResult<Vec<PinResponse>> {
        if paths.is_empty() {
            return Err(PinataError::validation("at least one filepath is required"));
        }

        let jobs: Vec<(PathBuf, Option<PinOptions>)> = paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let options = options.and_then(|options| options.get(i)).cloned();
                (path.as_ref().to_path_buf(), options)
            })
            .collect();

        let api = self.clone();
        let mut pool = WorkerPool::spawn(jobs, move |(path, options): (PathBuf, Option<PinOptions>)| {
            let api = api.clone();
            async move { api.pin_file(&path, options.as_ref()).await }
        });

        let mut responses = Vec::with_capacity(paths.len());
        while let Some(outcome) = pool.next().await? {
            match outcome {
                Ok(response) => responses.push(response),
                Err(e) => {
                    warn!(error = %e, pinned = responses.len(), "Batch pin aborted");
                    return Err(e);
                }
            }
        }

        debug!(pinned = responses.len(), "Batch pin complete");
        Ok(responses)
    }

    /// Upload several local files as one folder
    ///
    /// POST /pinning/pinFileToIPFS
    ///
    /// Each file is stored as `<folder>/<file name>`. The folder is named by
    /// `options.pinata_metadata.name`, or `folder_from_sdk_<timestamp>`.
    pub async fn pin_folder<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: Option<&PinOptions>,
    ) -> PinataResult<PinResponse> {
        if paths.is_empty() {
            return Err(PinataError::validation("at least one filepath is required"));
        }

        let folder = upload_name(options, "folder_from_sdk");
        let mut form = new_form();
        for path in paths {
            let path = path.as_ref();
            let contents = read_file(path).await?;
            let name = format!("{folder}/{}", base_name(path));
            form = form.part("file", file_part(contents, name)?);
        }

        self.pin_form(with_folder_fields(form, options, &folder))
            .await
    }

    /// Upload files keeping their directory layout below `base_dir`
    ///
    /// POST /pinning/pinFileToIPFS
    ///
    /// Each file is stored as `<folder>/<path relative to base_dir>`, with
    /// `/` separators on every platform.
    pub async fn pin_nested_folders<P: AsRef<Path>>(
        &self,
        base_dir: impl AsRef<Path>,
        paths: &[P],
        options: Option<&PinOptions>,
    ) -> PinataResult<PinResponse> {
        let base_dir = base_dir.as_ref();
        if base_dir.as_os_str().is_empty() || paths.is_empty() {
            return Err(PinataError::validation(
                "base dir and at least one filepath is required",
            ));
        }

        let folder = upload_name(options, "folder_from_sdk");
        let mut form = new_form();
        for path in paths {
            let path = path.as_ref();
            let relative = relative_path(base_dir, path)?;
            let contents = read_file(path).await?;
            form = form.part("file", file_part(contents, format!("{folder}/{relative}"))?);
        }

        self.pin_form(with_folder_fields(form, options, &folder))
            .await
    }

    /// Download `url` and pin its contents
    ///
    /// The download uses this client's connection pool and timeout. Any
    /// status other than 200 is reported as [`PinataError::Api`].
    #[instrument(skip(self, options))]
    pub async fn pin_url(&self, url: &str, options: Option<&PinOptions>) -> PinataResult<PinResponse> {
        if url.is_empty() {
            return Err(PinataError::validation("url is required"));
        }

        let source = Url::parse(url).map_err(|e| PinataError::InvalidUrl(format!("{url}: {e}")))?;
        let file_name = source
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .unwrap_or("file")
            .to_string();

        let response = self.client.http().get(source).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(PinataError::api_response(
                status.as_u16(),
                format!("HTTP error fetching {url}: {status}"),
            ));
        }
        let contents = response.bytes().await?;
        debug!(bytes = contents.len(), "Fetched URL contents");

        let name = upload_name(options, "url_upload");
        let form = new_form().part("file", file_part(contents.to_vec(), file_name)?);

        self.pin_form(with_folder_fields(form, options, &name))
            .await
    }

    /// Pin a JSON document
    ///
    /// POST /pinning/pinJSONToIPFS
    pub async fn pin_json<T: Serialize + ?Sized>(
        &self,
        data: &T,
        options: Option<&PinOptions>,
    ) -> PinataResult<PinResponse> {
        let content = serde_json::to_value(data).map_err(PinataError::Serialization)?;
        if content.is_null() {
            return Err(PinataError::validation("JSON data is required"));
        }

        let mut payload = json!({ "pinataContent": content });
        if let Some(options) = options {
            payload["pinataOptions"] = serde_json::to_value(&options.pinata_options)
                .map_err(PinataError::Serialization)?;
            payload["pinataMetadata"] = serde_json::to_value(&options.pinata_metadata)
                .map_err(PinataError::Serialization)?;
        }

        self.client
            .new_request(Method::POST, "/pinning/pinJSONToIPFS")
            .json_body(&payload)?
            .send()
            .await
    }

    /// Pin content that already exists on the IPFS network
    ///
    /// POST /pinning/pinByHash
    pub async fn pin_by_cid(
        &self,
        cid: &str,
        options: Option<&PinByCidOptions>,
    ) -> PinataResult<PinByCidResponse> {
        if cid.is_empty() {
            return Err(PinataError::validation("hashToPin is required"));
        }

        let request = PinByCidRequest {
            hash_to_pin: cid,
            pinata_options: options.map(|o| &o.pinata_options),
            pinata_metadata: options.map(|o| &o.pinata_metadata),
        };

        self.client
            .new_request(Method::POST, "/pinning/pinByHash")
            .json_body(&request)?
            .send()
            .await
    }

    /// List pinned files
    ///
    /// GET /data/pinList
    pub async fn list_files(&self, options: Option<&ListFilesOptions>) -> PinataResult<ListFilesResponse> {
        let mut request = self.client.new_request(Method::GET, "/data/pinList");
        if let Some(options) = options {
            request = options.apply(request);
        }
        request.send().await
    }

    /// List queued pin-by-CID jobs
    ///
    /// GET /pinning/pinJobs
    pub async fn list_pin_by_cid_jobs(
        &self,
        options: Option<&ListPinByCidOptions>,
    ) -> PinataResult<ListPinByCidResponse> {
        let mut request = self.client.new_request(Method::GET, "/pinning/pinJobs");
        if let Some(options) = options {
            request = options.apply(request);
        }
        request.send().await
    }

    /// Replace the name and key/values of a pin
    ///
    /// PUT /pinning/hashMetadata
    pub async fn update_metadata(
        &self,
        cid: &str,
        options: &PinMetadataUpdateOptions,
    ) -> PinataResult<()> {
        if cid.is_empty() {
            return Err(PinataError::validation("fileHash and options are required"));
        }

        let request = UpdateMetadataRequest {
            ipfs_pin_hash: cid,
            name: options.name.as_deref(),
            keyvalues: options.keyvalues.as_ref(),
        };

        self.client
            .new_request(Method::PUT, "/pinning/hashMetadata")
            .json_body(&request)?
            .send_discard()
            .await
    }

    /// Unpin a CID
    ///
    /// DELETE /pinning/unpin/{cid}
    pub async fn delete_file(&self, cid: &str) -> PinataResult<()> {
        if cid.is_empty() {
            return Err(PinataError::validation("cid is required"));
        }

        self.client
            .new_request(Method::DELETE, "/pinning/unpin/{cid}")
            .path_param("cid", cid)
            .send_discard()
            .await
    }

    /// Unpin several CIDs concurrently.
    ///
    /// Every CID is attempted regardless of earlier failures. On failure the
    /// error list holds one [`PinataError::DeleteFailed`] per failed CID, in
    /// completion order.
    #[instrument(skip_all, fields(count = cids.len()))]
    pub async fn delete_files<S: AsRef<str>>(&self, cids: &[S]) -> Result<(), Vec<PinataError>> {
        if cids.is_empty() {
            return Err(vec![PinataError::validation("at least one CID is required")]);
        }

        let jobs: Vec<String> = cids.iter().map(|cid| cid.as_ref().to_string()).collect();
        let api = self.clone();
        let mut pool = WorkerPool::spawn(jobs, move |cid: String| {
            let api = api.clone();
            async move {
                api.delete_file(&cid)
                    .await
                    .map_err(|source| PinataError::DeleteFailed {
                        cid,
                        source: Box::new(source),
                    })
            }
        });

        let mut errors = Vec::new();
        loop {
            match pool.next().await {
                Ok(Some(Ok(()))) => {}
                Ok(Some(Err(e))) => errors.push(e),
                Ok(None) => break,
                Err(e) => {
                    errors.push(e);
                    break;
                }
            }
        }

        if errors.is_empty() {
            debug!("Batch delete complete");
            Ok(())
        } else {
            warn!(failed = errors.len(), "Batch delete finished with failures");
            Err(errors)
        }
    }

    async fn pin_form(&self, form: Form) -> PinataResult<PinResponse> {
        self.client
            .new_request(Method::POST, PIN_FILE_PATH)
            .multipart_body(form)
            .send()
            .await
    }
}

// ============================================================================
// Multipart helpers
// ============================================================================

/// File names carry `/` for folder uploads and must reach the service as-is
fn new_form() -> Form {
    Form::new().percent_encode_noop()
}

fn file_part(contents: Vec<u8>, file_name: impl Into<String>) -> PinataResult<Part> {
    Ok(Part::bytes(contents)
        .file_name(file_name.into())
        .mime_str("application/octet-stream")?)
}

async fn read_file(path: &Path) -> PinataResult<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|source| PinataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// `path` relative to `base_dir`, joined with `/`
fn relative_path(base_dir: &Path, path: &Path) -> PinataResult<String> {
    let relative = path.strip_prefix(base_dir).map_err(|_| {
        PinataError::validation(format!(
            "{} is not inside {}",
            path.display(),
            base_dir.display()
        ))
    })?;

    let segments: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        return Err(PinataError::validation(format!(
            "{} is not a file below {}",
            path.display(),
            base_dir.display()
        )));
    }
    Ok(segments.join("/"))
}

/// Metadata name if set, otherwise `<prefix>_<timestamp>`
fn upload_name(options: Option<&PinOptions>, prefix: &str) -> String {
    options
        .and_then(|o| o.pinata_metadata.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            format!(
                "{prefix}_{}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
            )
        })
}

/// Add the `pinataMetadata` and `pinataOptions` fields used by folder uploads
fn with_folder_fields(form: Form, options: Option<&PinOptions>, name: &str) -> Form {
    let Some(options) = options else {
        return form;
    };

    let metadata = json!({
        "name": name,
        "keyvalues": options.pinata_metadata.keyvalues,
    });
    let pin_options = json!({
        "cidVersion": options.pinata_options.cid_version.unwrap_or_default(),
    });

    form.text("pinataMetadata", metadata.to_string())
        .text("pinataOptions", pin_options.to_string())
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Name and key/values stored with a pin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinataMetadata {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Custom key/value pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyvalues: Option<KeyValues>,
}

/// Upload settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CidOptions {
    /// CID version to produce (0 or 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid_version: Option<u8>,
}

/// Options for uploads and JSON pins
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinOptions {
    /// Metadata stored with the pin
    pub pinata_metadata: PinataMetadata,
    /// Upload settings
    pub pinata_options: CidOptions,
}

impl PinOptions {
    /// Create empty options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pin name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.pinata_metadata.name = Some(name.into());
        self
    }

    /// Add one metadata key/value pair
    #[must_use]
    pub fn with_keyvalue(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.pinata_metadata
            .keyvalues
            .get_or_insert_with(KeyValues::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the CID version
    #[must_use]
    pub fn with_cid_version(mut self, version: u8) -> Self {
        self.pinata_options.cid_version = Some(version);
        self
    }
}

/// Settings for pinning an existing CID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinByCidSettings {
    /// Group to add the pin to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Multiaddresses of nodes known to hold the content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_nodes: Vec<String>,
}

/// Options for [`PinningApi::pin_by_cid`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinByCidOptions {
    /// Pin settings
    pub pinata_options: PinByCidSettings,
    /// Metadata stored with the pin
    pub pinata_metadata: PinataMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PinByCidRequest<'a> {
    hash_to_pin: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinata_options: Option<&'a PinByCidSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinata_metadata: Option<&'a PinataMetadata>,
}

/// Result of an upload or JSON pin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PinResponse {
    /// CID of the pinned content
    pub ipfs_hash: String,
    /// Size in bytes
    pub pin_size: u64,
    /// When the pin was created
    pub timestamp: String,
    /// Whether the content was already pinned
    pub is_duplicate: bool,
}

/// Queued pin-by-CID job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PinByCidResponse {
    /// Job ID
    pub id: String,
    /// CID being pinned
    pub ipfs_hash: String,
    /// Job status
    pub status: String,
    /// Pin name
    pub name: String,
}

/// New metadata for an existing pin
///
/// Unset fields are sent as `null`, which clears them on the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinMetadataUpdateOptions {
    /// New name
    pub name: Option<String>,
    /// Key/values to set
    pub keyvalues: Option<KeyValues>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateMetadataRequest<'a> {
    ipfs_pin_hash: &'a str,
    name: Option<&'a str>,
    keyvalues: Option<&'a KeyValues>,
}

/// Filters for [`PinningApi::list_files`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFilesOptions {
    /// Only this CID
    pub cid: Option<String>,
    /// Only pins in this group
    pub group_id: Option<String>,
    /// `all`, `pinned`, or `unpinned`
    pub status: Option<String>,
    /// Page size
    pub page_limit: Option<u32>,
    /// Rows to skip
    pub page_offset: Option<u32>,
    /// Metadata filter, sent as JSON
    pub metadata: Option<KeyValues>,
    /// Minimum pin size in bytes
    pub pin_size_min: Option<u64>,
    /// Maximum pin size in bytes
    pub pin_size_max: Option<u64>,
    /// Pinned at or after
    pub pin_start: Option<DateTime<Utc>>,
    /// Pinned at or before
    pub pin_end: Option<DateTime<Utc>>,
    /// Unpinned at or after
    pub unpin_start: Option<DateTime<Utc>>,
    /// Unpinned at or before
    pub unpin_end: Option<DateTime<Utc>>,
    /// Ask for the total row count; always sent
    pub include_count: bool,
}

impl ListFilesOptions {
    /// Create empty filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by CID
    #[must_use]
    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    /// Filter by group
    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Filter by pin status
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set page size and offset
    #[must_use]
    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.page_limit = Some(limit);
        self.page_offset = Some(offset);
        self
    }

    /// Restrict the pin date range
    #[must_use]
    pub fn with_pinned_between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.pin_start = Some(start);
        self.pin_end = Some(end);
        self
    }

    /// Request the total count
    #[must_use]
    pub fn with_count(mut self) -> Self {
        self.include_count = true;
        self
    }

    fn apply<'a>(&self, mut request: RequestBuilder<'a>) -> RequestBuilder<'a> {
        let timestamp = |t: &DateTime<Utc>| t.to_rfc3339_opts(SecondsFormat::Secs, true);

        if let Some(cid) = &self.cid {
            request = request.query_param("cid", cid);
        }
        if let Some(group_id) = &self.group_id {
            request = request.query_param("groupId", group_id);
        }
        if let Some(status) = &self.status {
            request = request.query_param("status", status);
        }
        if let Some(limit) = self.page_limit {
            request = request.query_param("pageLimit", limit);
        }
        if let Some(offset) = self.page_offset {
            request = request.query_param("pageOffset", offset);
        }
        if let Some(min) = self.pin_size_min {
            request = request.query_param("pinSizeMin", min);
        }
        if let Some(max) = self.pin_size_max {
            request = request.query_param("pinSizeMax", max);
        }
        if let Some(start) = &self.pin_start {
            request = request.query_param("pinStart", timestamp(start));
        }
        if let Some(end) = &self.pin_end {
            request = request.query_param("pinEnd", timestamp(end));
        }
        if let Some(start) = &self.unpin_start {
            request = request.query_param("unpinStart", timestamp(start));
        }
        if let Some(end) = &self.unpin_end {
            request = request.query_param("unpinEnd", timestamp(end));
        }
        request = request.query_param("includeCount", self.include_count);
        if let Some(metadata) = &self.metadata {
            request = request.query_param("metadata", Value::Object(metadata.clone()));
        }
        request
    }
}

/// Page of pinned files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFilesResponse {
    /// Total matching rows, when requested
    pub count: u64,
    /// Pins on this page
    pub rows: Vec<Pin>,
}

/// A pinned file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pin {
    /// Pin record ID
    pub id: String,
    /// Pinned CID
    pub ipfs_pin_hash: String,
    /// Size in bytes
    pub size: u64,
    /// Owning user
    pub user_id: String,
    /// When the pin was created
    pub date_pinned: Option<String>,
    /// When the pin was removed, if it was
    pub date_unpinned: Option<String>,
    /// Name and key/values
    pub metadata: Option<Value>,
    /// Replication by region
    pub regions: Vec<Region>,
    /// Detected MIME type
    pub mime_type: Option<String>,
    /// File count; more than one for directories
    pub number_of_files: u64,
}

/// Replication state of a pin in one region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Region {
    /// Region identifier
    pub region_id: String,
    /// Copies held now
    pub current_replication_count: u32,
    /// Copies requested
    pub desired_replication_count: u32,
}

/// Sort order for pin job listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// Wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a pin-by-CID job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinStatus {
    /// Queued and being checked
    Prechecking,
    /// Content is being fetched
    Retrieving,
    /// Content was not found in time
    Expired,
    /// Account free tier exceeded
    OverFreeLimit,
    /// Content exceeds the size limit
    OverMaxSize,
    /// CID does not resolve to valid content
    InvalidObject,
    /// A supplied host node was unreachable
    BadHostNode,
}

impl PinStatus {
    /// Wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prechecking => "prechecking",
            Self::Retrieving => "retrieving",
            Self::Expired => "expired",
            Self::OverFreeLimit => "over_free_limit",
            Self::OverMaxSize => "over_max_size",
            Self::InvalidObject => "invalid_object",
            Self::BadHostNode => "bad_host_node",
        }
    }
}

impl fmt::Display for PinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for [`PinningApi::list_pin_by_cid_jobs`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPinByCidOptions {
    /// Order by queue date
    pub sort: Option<SortOrder>,
    /// Only jobs in this state
    pub status: Option<PinStatus>,
    /// Only jobs for this CID
    pub ipfs_pin_hash: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl ListPinByCidOptions {
    fn apply<'a>(&self, mut request: RequestBuilder<'a>) -> RequestBuilder<'a> {
        if let Some(sort) = self.sort {
            request = request.query_param("sort", sort);
        }
        if let Some(status) = self.status {
            request = request.query_param("status", status);
        }
        if let Some(cid) = &self.ipfs_pin_hash {
            request = request.query_param("ipfs_pin_hash", cid);
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

/// Page of pin-by-CID jobs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPinByCidResponse {
    /// Total matching jobs
    pub count: u64,
    /// This page
    pub rows: Vec<PinJob>,
}

/// A queued pin-by-CID job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinJob {
    /// Job ID
    pub id: String,
    /// CID being pinned
    pub ipfs_pin_hash: String,
    /// When the job was queued
    pub date_queued: String,
    /// Pin name
    pub name: String,
    /// Job state, see [`PinStatus`]
    pub status: String,
    /// Custom metadata
    pub keyvalues: Option<Value>,
    /// Peers to fetch from
    pub host_nodes: Vec<String>,
    /// Requested replication
    pub pin_policy: PinPolicy,
}

/// Replication policy of a pin job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinPolicy {
    /// Per-region replication
    pub regions: Vec<PolicyRegion>,
    /// Policy version
    pub version: u32,
}

/// Desired replication in one region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyRegion {
    /// Region identifier
    pub id: String,
    /// Copies requested
    pub desired_replication_count: u32,
}
