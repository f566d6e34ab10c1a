//! Typed async client for the Pinata IPFS pinning service
//!
//! This crate wraps Pinata's REST API so callers never hand-roll HTTP
//! requests, multipart bodies, or query strings.
//!
//! # Features
//!
//! - **Fluent request builder**: `{name}` path placeholders, escaped query
//!   parameters, headers, JSON or multipart bodies
//! - **Two auth schemes**: JWT bearer token or API key/secret pair
//! - **Batch uploads and unpins**: at most five requests in flight
//! - **Request correlation**: every request carries an `X-Request-ID`
//! - **Environment-based configuration**: `PINATA_JWT`, `PINATA_API_KEY`,
//!   `PINATA_API_SECRET`, `PINATA_API_URL`, `PINATA_TIMEOUT_SECS`
//!
//! # Example
//!
//! ```rust,no_run
//! use pinata_sdk::{Authenticator, PinataClient};
//! use pinata_sdk::endpoints::pinning::{ListFilesOptions, PinOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PinataClient::with_auth(Authenticator::from_bearer_token("<jwt>"))?;
//!
//!     let auth = client.test_authentication().await?;
//!     println!("{}", auth.message);
//!
//!     let pinned = client
//!         .pinning()
//!         .pin_file("report.pdf", Some(&PinOptions::new().with_name("report")))
//!         .await?;
//!     println!("Pinned as {}", pinned.ipfs_hash);
//!
//!     let files = client
//!         .pinning()
//!         .list_files(Some(&ListFilesOptions::new().with_status("pinned")))
//!         .await?;
//!     println!("{} pins", files.rows.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod pool;
pub mod request;

#[cfg(test)]
mod test_util;

pub use auth::Authenticator;
pub use client::{AuthTestResponse, PinataClient};
pub use config::ClientConfig;
pub use error::{ErrorDecoder, LooseErrorDecoder, PinataError, PinataResult};
pub use request::RequestBuilder;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::auth::Authenticator;
    pub use crate::client::PinataClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{GroupsApi, KeysApi, PinningApi, SignaturesApi, SwapsApi};
    pub use crate::error::{PinataError, PinataResult};
}
