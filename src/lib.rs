//! Forge API client library.
//!
//! A Rust library of thin clients for the Autodesk Forge / BIM360 REST
//! API: hubs, projects, folders, companies, business units, users,
//! versions, folder permissions and model derivatives, each a small
//! wrapper over one shared HTTP transport.
//!
//! # Quick Start
//!
//! ```no_run
//! use forgeapi::{auth, Credential, FolderTree, ForgeClient};
//!
//! #[tokio::main]
//! async fn main() -> forgeapi::Result<()> {
//!     // Exchange app credentials for a bearer token (two-legged flow)
//!     let credential = Credential::new(
//!         "client-id",
//!         "client-secret",
//!         vec!["data:read".to_string(), "account:read".to_string()],
//!     );
//!     let token = auth::get_token(&credential).await?;
//!
//!     let client = ForgeClient::with_token(
//!         &token.value,
//!         "https://developer.api.autodesk.com/",
//!     )?;
//!
//!     // List hubs, then walk a project's folder tree
//!     let hubs = client.hubs().get_hubs().await?;
//!     println!("{} hubs", hubs.len());
//!
//!     let root = client.folders().get_folder("project-uuid", "root-folder-urn").await?;
//!     let mut tree = FolderTree::new(root);
//!     tree.populate(&client, "project-uuid").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ForgeClient`] owns the connection pool, the bearer token and the
//!   retry/poll policies; resource clients borrow it via accessors like
//!   [`ForgeClient::folders`].
//! - Responses are passed through opaquely as [`ResourceObject`]s or raw
//!   JSON; only the JSON:API envelope (`data`, `included`, `links`) is
//!   taken apart.
//! - List endpoints accumulate all pages before returning, following
//!   either the `links.next` cursor or the limit/offset convention of the
//!   admin APIs.
//! - Tokens are never renewed automatically: a 401 surfaces as
//!   [`ForgeError::TokenExpired`] and the caller re-authenticates.

pub mod api;
pub mod auth;
mod client;
mod endpoint;
mod error;
mod models;
mod pagination;
mod tree;

// Re-export core types
pub use auth::{Credential, Token, DEFAULT_AUTH_URL};
pub use client::{ForgeClient, ForgeClientBuilder, PollPolicy, RetryPolicy};
pub use error::{ForgeError, Result};
pub use models::{JsonApiPage, JsonApiSingle, PageLink, PageLinks, ResourceObject};
pub use tree::{FolderTree, NodeId};

// Re-export API parameter types
pub use api::{
    AcceptEncoding, ListParams, PermissionSubject, SubjectType, UserListParams,
    DEFAULT_PAGE_LIMIT,
};
