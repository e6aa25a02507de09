//! Addressing and entry model for the item archive.
//!
//! The archive is a tree of named entries. Each entry is either an atomic
//! item or a container holding further entries. This crate defines the
//! client-side vocabulary for that tree:
//! - Segment names (`<id>(.<tag>)*.<kind>`) and their codec
//! - Paths from the archive root down to an entry
//! - Entry metadata as exchanged with the store
//! - The listing assembler that merges a container's children into one view
//!
//! Nothing here talks to the store; see `item-archive-client` for that.

mod listing;
mod metadata;
mod name;
mod path;
mod sink;

pub use listing::{assemble, ChildrenView, EntryListRow};
pub use metadata::{EntryMetadata, ImageFormat};
pub use name::{
    format_name, parse_name, parse_name_or_notify, EntryKind, NameError, ParsedName, SEPARATOR,
};
pub use path::ArchivePath;
pub use sink::{NotificationSink, TracingSink};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}
