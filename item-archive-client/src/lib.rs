//! Client for the item archive store.
//!
//! The archive is reached through two layers:
//!
//! - [`Archive`] is the contract callers program against: read, create,
//!   move and delete entries addressed by [`ArchivePath`].
//! - [`ArchiveService`] is the store boundary: one RPC per operation,
//!   speaking the store's request/response messages and reporting faults as
//!   a [`Status`].
//!
//! [`RemoteArchive`] adapts any `ArchiveService` to `Archive`, and
//! [`ConnectClient`] is the `ArchiveService` that talks to a store over
//! HTTP using the Connect protocol's unary JSON encoding.
//!
//! # Example
//!
//! ```no_run
//! use item_archive_client::{Archive, ConnectConfig, RemoteArchive};
//! use item_archive_types::{assemble, ArchivePath};
//!
//! # async fn run() -> item_archive_client::ArchiveResult<()> {
//! let archive = RemoteArchive::connect(ConnectConfig {
//!     base_url: "http://archive.local:8330".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let root = archive.read(&ArchivePath::root()).await?;
//! for row in assemble(root.children.as_ref()) {
//!     println!("{} {}", if row.is_item { "item" } else { "dir " }, row.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client keeps no cache and never retries. Use
//! [`ArchiveError::is_retryable`] to tell transport hiccups from
//! definitive outcomes.
//!
//! [`ArchivePath`]: item_archive_types::ArchivePath

mod archive;
mod connect;
mod error;
pub mod messages;
mod service;
mod status;

pub use archive::{Archive, ReadOutcome, RemoteArchive};
pub use connect::{ConnectClient, ConnectConfig, CONNECT_PROTOCOL_VERSION, DEFAULT_SERVICE};
pub use error::{ArchiveError, ArchiveResult};
pub use service::ArchiveService;
pub use status::{ErrorCode, Status};
