//! Shared helpers for unit tests

use crate::auth::Authenticator;
use crate::client::PinataClient;
use crate::config::ClientConfig;
use wiremock::Request;

/// Client authenticated with a fixed JWT and pointed at `base_url`
pub fn client_for(base_url: &str) -> PinataClient {
    PinataClient::with_config(
        Authenticator::from_bearer_token("valid_jwt_token"),
        ClientConfig::default().with_base_url(base_url),
    )
    .unwrap()
}

/// One decoded multipart field
#[derive(Debug)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content: Vec<u8>,
}

impl FormPart {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.content).unwrap()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.content).unwrap()
    }
}

/// Split a received `multipart/form-data` request into its fields
pub fn multipart_parts(request: &Request) -> Vec<FormPart> {
    let content_type = request
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .unwrap()
        .trim_matches('"');
    let delimiter = format!("--{boundary}").into_bytes();

    split(&request.body, &delimiter)
        .into_iter()
        .skip(1)
        .filter(|chunk| !chunk.starts_with(b"--"))
        .map(parse_part)
        .collect()
}

fn split<'a>(body: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + delimiter.len() <= body.len() {
        if &body[i..i + delimiter.len()] == delimiter {
            chunks.push(&body[start..i]);
            i += delimiter.len();
            start = i;
        } else {
            i += 1;
        }
    }
    chunks.push(&body[start..]);
    chunks
}

fn parse_part(chunk: &[u8]) -> FormPart {
    let chunk = chunk.strip_prefix(b"\r\n").unwrap_or(chunk);
    let header_end = chunk
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .unwrap();
    let headers = std::str::from_utf8(&chunk[..header_end]).unwrap();
    let content = &chunk[header_end + 4..];
    let content = content.strip_suffix(b"\r\n").unwrap_or(content);

    let disposition = headers
        .lines()
        .find(|line| line.to_ascii_lowercase().starts_with("content-disposition"))
        .unwrap();

    FormPart {
        name: quoted_attr(disposition, "name").unwrap(),
        file_name: quoted_attr(disposition, "filename"),
        content: content.to_vec(),
    }
}

fn quoted_attr(header: &str, attr: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let value = pair.strip_prefix(attr)?.strip_prefix('=')?;
        Some(value.trim_matches('"').to_string())
    })
}
