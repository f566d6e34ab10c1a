//! Request construction and execution
//!
//! [`RequestBuilder`] describes one HTTP call against the Pinata API: a
//! method, a path template with `{name}` placeholders, path and query
//! parameters, headers, and an optional body. [`RequestBuilder::send`]
//! renders the URL, stamps authentication, executes the call on the client's
//! connection pool, and decodes the JSON response.
//!
//! A builder is consumed by `send`; it is never shared between tasks.

use crate::client::PinataClient;
use crate::error::{PinataError, PinataResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, instrument, warn, Span};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "x-request-id";

/// Content type recorded by [`RequestBuilder::json_body`]
const APPLICATION_JSON: &str = "application/json";

/// Characters escaped inside a path segment: everything but RFC 3986 unreserved
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Request payload
enum Payload {
    Bytes(Vec<u8>),
    Multipart(Form),
}

/// Fluent description of a single API call.
///
/// Created by [`PinataClient::new_request`]. Every configuration method takes
/// the builder by value and hands it back, so calls chain:
///
/// ```rust,no_run
/// # async fn demo(client: &pinata_sdk::PinataClient) -> pinata_sdk::PinataResult<()> {
/// use reqwest::Method;
///
/// let group: serde_json::Value = client
///     .new_request(Method::GET, "/groups/{id}")
///     .path_param("id", "group 1")
///     .query_param("includeCount", true)
///     .send()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[must_use = "a request does nothing until it is sent"]
pub struct RequestBuilder<'a> {
    client: &'a PinataClient,
    method: Method,
    path: String,
    path_params: BTreeMap<String, String>,
    query_params: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    body: Option<Payload>,
    content_type: Option<String>,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(client: &'a PinataClient, method: Method, path: impl Into<String>) -> Self {
        Self {
            client,
            method,
            path: path.into(),
            path_params: BTreeMap::new(),
            query_params: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
            content_type: None,
        }
    }

    /// Set the value substituted for `{name}` in the path template
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Set a query parameter; the value is rendered with `Display`
    /// (`true`/`false` for booleans)
    pub fn query_param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.query_params.insert(name.into(), value.to_string());
        self
    }

    /// Set a request header; a later call with the same name wins
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the body and its content type
    pub fn body(mut self, body: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        self.body = Some(Payload::Bytes(body.into()));
        self.content_type = Some(content_type.into());
        self
    }

    /// Replace the body with a multipart form
    pub fn multipart_body(mut self, form: Form) -> Self {
        self.content_type = Some(format!("multipart/form-data; boundary={}", form.boundary()));
        self.body = Some(Payload::Multipart(form));
        self
    }

    /// Serialize `value` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PinataError::Serialization`] if `value` has no JSON
    /// representation; the body is not touched in that case.
    pub fn json_body<T: Serialize + ?Sized>(self, value: &T) -> PinataResult<Self> {
        let json = serde_json::to_vec(value).map_err(PinataError::Serialization)?;
        Ok(self.body(json, APPLICATION_JSON))
    }

    /// Render the full request URL.
    ///
    /// Every `{name}` placeholder is replaced by its percent-escaped path
    /// parameter. Query parameters are appended in key order.
    ///
    /// # Errors
    ///
    /// [`PinataError::MissingPathParameter`] when a placeholder has no value,
    /// [`PinataError::InvalidUrl`] when the result does not parse.
    pub fn build_url(&self) -> PinataResult<Url> {
        let path = substitute_path(&self.path, &self.path_params)?;
        let raw = format!("{}{}", self.client.base_url().trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|e| PinataError::InvalidUrl(format!("{raw}: {e}")))?;

        if !self.query_params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in &self.query_params {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Send the request and decode the JSON response into `T`
    ///
    /// # Errors
    ///
    /// Any URL, header, transport, status, or decode failure.
    pub async fn send<T: DeserializeOwned>(self) -> PinataResult<T> {
        let body = self.execute().await?;
        serde_json::from_slice(&body).map_err(PinataError::Decode)
    }

    /// Send the request and discard a successful response body
    ///
    /// # Errors
    ///
    /// Any URL, header, transport, or status failure.
    pub async fn send_discard(self) -> PinataResult<()> {
        self.execute().await.map(drop)
    }

    /// Execute the request, returning the body of a 2xx response
    #[instrument(
        name = "pinata_request",
        skip(self),
        fields(
            http.method = %self.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            request_id = tracing::field::Empty,
        )
    )]
    async fn execute(self) -> PinataResult<Vec<u8>> {
        let url = self.build_url()?;
        Span::current().record("http.url", url.as_str());

        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let mut request = self.client.http().request(self.method.clone(), url);
        request = match self.body {
            Some(Payload::Bytes(bytes)) => request.body(bytes),
            Some(Payload::Multipart(form)) => request.multipart(form),
            None => request,
        };
        let mut request = request.build()?;

        let headers = request.headers_mut();
        for (name, value) in &self.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| PinataError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| PinataError::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(name, value);
        }
        let request_id = HeaderValue::try_from(request_id)
            .map_err(|e| PinataError::InvalidHeader(format!("{X_REQUEST_ID}: {e}")))?;
        headers.insert(HeaderName::from_static(X_REQUEST_ID), request_id);

        self.client.authenticator().stamp(headers);

        if let Some(content_type) = &self.content_type {
            let value = HeaderValue::try_from(content_type.as_str())
                .map_err(|e| PinataError::InvalidHeader(format!("{CONTENT_TYPE}: {e}")))?;
            headers.insert(CONTENT_TYPE, value);
        }

        let start = Instant::now();
        let response = self.client.http().execute(request).await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.bytes().await?;
        let elapsed = start.elapsed();

        if status.is_success() {
            debug!(elapsed_ms = elapsed.as_millis(), "Request succeeded");
            Ok(body.to_vec())
        } else {
            warn!(
                status = status.as_u16(),
                elapsed_ms = elapsed.as_millis(),
                "Request failed"
            );
            Err(self.client.error_decoder().decode(status, &body))
        }
    }
}

/// Replace each `{name}` placeholder with its escaped value.
///
/// Only placeholders that appear in `template` are checked; unused params
/// are ignored. An unterminated `{` is kept literally.
fn substitute_path(template: &str, params: &BTreeMap<String, String>) -> PinataResult<String> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + len];
        let value = params
            .get(name)
            .ok_or_else(|| PinataError::MissingPathParameter(name.to_string()))?;

        path.push_str(&rest[..open]);
        path.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &rest[open + len + 1..];
    }

    path.push_str(rest);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Authenticator;
    use crate::config::ClientConfig;
    use crate::test_util::client_for;
    use std::collections::HashMap;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body_bytes<'b>(request: &'b RequestBuilder<'_>) -> Option<&'b [u8]> {
        match &request.body {
            Some(Payload::Bytes(bytes)) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    #[test]
    fn test_path_param_overwrites() {
        let client = client_for("https://api.pinata.cloud");
        let request = client
            .new_request(Method::GET, "/groups/{id}")
            .path_param("id", "first")
            .path_param("id", "second");

        assert_eq!(request.path_params.len(), 1);
        assert_eq!(request.path_params["id"], "second");
    }

    #[test]
    fn test_query_param_renders_values() {
        let client = client_for("https://api.pinata.cloud");
        let request = client
            .new_request(Method::GET, "/data/pinList")
            .query_param("cid", "Qm123")
            .query_param("pageLimit", 42)
            .query_param("includeCount", true)
            .query_param("revoked", false);

        assert_eq!(request.query_params["cid"], "Qm123");
        assert_eq!(request.query_params["pageLimit"], "42");
        assert_eq!(request.query_params["includeCount"], "true");
        assert_eq!(request.query_params["revoked"], "false");
    }

    #[test]
    fn test_header_last_write_wins() {
        let client = client_for("https://api.pinata.cloud");
        let request = client
            .new_request(Method::GET, "/")
            .header("X", "a")
            .header("X", "b");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers["X"], "b");
    }

    #[test]
    fn test_body_replaces_previous() {
        let client = client_for("https://api.pinata.cloud");
        let request = client
            .new_request(Method::POST, "/")
            .body("old", "text/plain")
            .body(vec![1u8, 2, 3], "application/octet-stream");

        assert_eq!(body_bytes(&request), Some(&[1u8, 2, 3][..]));
        assert_eq!(request.content_type.as_deref(), Some("application/octet-stream"));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let client = client_for("https://api.pinata.cloud");
        let request = client
            .new_request(Method::POST, "/groups")
            .json_body(&serde_json::json!({"name": "test"}))
            .unwrap();

        assert_eq!(body_bytes(&request), Some(&br#"{"name":"test"}"#[..]));
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_json_body_rejects_unserializable_value() {
        let client = client_for("https://api.pinata.cloud");
        let mut value = HashMap::new();
        value.insert((1, 2), "tuple keys have no JSON form");

        let result = client.new_request(Method::POST, "/").json_body(&value);
        assert!(matches!(result, Err(PinataError::Serialization(_))));
    }

    #[test]
    fn test_build_url_escapes_path_params() {
        let client = client_for("https://api.pinata.cloud");
        let url = client
            .new_request(Method::GET, "/groups/{id}")
            .path_param("id", "group 1")
            .build_url()
            .unwrap();

        assert_eq!(url.as_str(), "https://api.pinata.cloud/groups/group%201");
    }

    #[test]
    fn test_build_url_escapes_slash_in_path_param() {
        let client = client_for("https://api.pinata.cloud");
        let url = client
            .new_request(Method::DELETE, "/pinning/unpin/{cid}")
            .path_param("cid", "a/b")
            .build_url()
            .unwrap();

        assert_eq!(url.path(), "/pinning/unpin/a%2Fb");
    }

    #[test]
    fn test_build_url_missing_path_param() {
        let client = client_for("https://api.pinata.cloud");
        let err = client
            .new_request(Method::GET, "/groups/{id}")
            .path_param("other", "value")
            .build_url()
            .unwrap_err();

        assert!(matches!(err, PinataError::MissingPathParameter(ref name) if name == "id"));
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn test_build_url_ignores_unused_path_params() {
        let client = client_for("https://api.pinata.cloud");
        let url = client
            .new_request(Method::GET, "/groups")
            .path_param("id", "unused")
            .build_url()
            .unwrap();

        assert_eq!(url.as_str(), "https://api.pinata.cloud/groups");
    }

    #[test]
    fn test_build_url_repeated_placeholder() {
        let client = client_for("https://api.pinata.cloud");
        let url = client
            .new_request(Method::GET, "/{id}/copy/{id}")
            .path_param("id", "x")
            .build_url()
            .unwrap();

        assert_eq!(url.path(), "/x/copy/x");
    }

    #[test]
    fn test_build_url_query_sorted_and_escaped() {
        let client = client_for("https://api.pinata.cloud/");
        let url = client
            .new_request(Method::GET, "/data/pinList")
            .query_param("status", "pinned")
            .query_param("includeCount", true)
            .query_param("metadata", r#"{"a":"b c"}"#)
            .build_url()
            .unwrap();

        assert_eq!(
            url.query(),
            Some("includeCount=true&metadata=%7B%22a%22%3A%22b+c%22%7D&status=pinned")
        );
    }

    #[test]
    fn test_build_url_unterminated_brace_is_literal() {
        let client = client_for("https://api.pinata.cloud");
        let url = client.new_request(Method::GET, "/b{").build_url().unwrap();
        assert_eq!(url.path(), "/b%7B");
    }

    #[test]
    fn test_build_url_empty_placeholder_needs_value() {
        let client = client_for("https://api.pinata.cloud");
        let err = client.new_request(Method::GET, "/a/{}").build_url().unwrap_err();

        assert!(matches!(err, PinataError::MissingPathParameter(ref name) if name.is_empty()));
        assert_eq!(err.to_string(), "path parameter  not found");
    }

    #[test]
    fn test_build_url_without_query_has_no_question_mark() {
        let client = client_for("https://api.pinata.cloud");
        let url = client.new_request(Method::GET, "/groups").build_url().unwrap();
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_send_decodes_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("authorization", "Bearer valid_jwt_token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"key":"value"}"#))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result: HashMap<String, String> =
            client.new_request(Method::GET, "/test").send().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result["key"], "value");
    }

    #[tokio::test]
    async fn test_send_surfaces_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(r#"{"error":"Internal server error"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client
            .new_request(Method::GET, "/test")
            .send::<serde_json::Value>()
            .await
            .unwrap_err();

        assert!(matches!(err, PinataError::Api { status: 500, .. }));
        assert!(err.to_string().contains("Internal server error"));
    }

    #[tokio::test]
    async fn test_send_non_json_error_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client
            .new_request(Method::GET, "/test")
            .send_discard()
            .await
            .unwrap_err();

        assert!(matches!(err, PinataError::Decode(_)));
    }

    #[tokio::test]
    async fn test_send_invalid_success_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client
            .new_request(Method::GET, "/test")
            .send::<serde_json::Value>()
            .await
            .unwrap_err();

        assert!(matches!(err, PinataError::Decode(_)));
    }

    #[tokio::test]
    async fn test_send_discard_ignores_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/pinning/unpin/Qm123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        client
            .new_request(Method::DELETE, "/pinning/unpin/{cid}")
            .path_param("cid", "Qm123")
            .send_discard()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_applies_headers_query_and_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/groups/abc"))
            .and(query_param("verbose", "true"))
            .and(header("x-custom", "b"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"abc"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result: serde_json::Value = client
            .new_request(Method::PUT, "/groups/{id}")
            .path_param("id", "abc")
            .query_param("verbose", true)
            .header("X-Custom", "a")
            .header("X-Custom", "b")
            .header("Content-Type", "text/plain")
            .json_body(&serde_json::json!({"name": "renamed"}))
            .unwrap()
            .send()
            .await
            .unwrap();

        assert_eq!(result["id"], "abc");
    }

    #[tokio::test]
    async fn test_send_stamps_key_pair_and_request_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("pinata_api_key", "key"))
            .and(header("pinata_secret_api_key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PinataClient::with_config(
            Authenticator::from_api_key("key", "secret"),
            ClientConfig::default().with_base_url(mock_server.uri()),
        )
        .unwrap();
        client
            .new_request(Method::GET, "/data/testAuthentication")
            .send_discard()
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
        assert!(requests[0].headers.get("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_send_missing_path_param_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client
            .new_request(Method::GET, "/groups/{id}")
            .send_discard()
            .await
            .unwrap_err();

        assert!(matches!(err, PinataError::MissingPathParameter(_)));
    }

    #[tokio::test]
    async fn test_send_network_error() {
        // Nothing listens on port 9 of localhost
        let client = client_for("http://127.0.0.1:9");
        let err = client
            .new_request(Method::GET, "/test")
            .send_discard()
            .await
            .unwrap_err();

        assert!(matches!(err, PinataError::Network(_)));
    }

    #[tokio::test]
    async fn test_send_invalid_header_name() {
        let client = client_for("http://127.0.0.1:9");
        let err = client
            .new_request(Method::GET, "/test")
            .header("bad header", "value")
            .send_discard()
            .await
            .unwrap_err();

        assert!(matches!(err, PinataError::InvalidHeader(_)));
    }
}
