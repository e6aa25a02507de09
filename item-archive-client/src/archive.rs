//! The archive contract and its remote adapter.

use crate::connect::{ConnectClient, ConnectConfig};
use crate::error::{ArchiveError, ArchiveResult};
use crate::messages::{CreateRequest, DeleteRequest, MoveRequest, ReadRequest};
use crate::service::ArchiveService;
use async_trait::async_trait;
use item_archive_types::{assemble, ArchivePath, ChildrenView, EntryListRow, EntryMetadata};
use tracing::{debug, info};

/// What a read returns: the entry's metadata and, for containers, its
/// direct children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub metadata: EntryMetadata,
    pub children: Option<ChildrenView>,
}

impl ReadOutcome {
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// The children as display rows, items first.
    #[must_use]
    pub fn entries(&self) -> Vec<EntryListRow> {
        assemble(self.children.as_ref())
    }
}

/// Operations on a path-addressed archive.
///
/// Errors are reported as [`ArchiveError::NotFound`],
/// [`ArchiveError::AlreadyExists`] or [`ArchiveError::Transport`]; stores may
/// also surface other faults as [`ArchiveError::Remote`].
#[async_trait]
pub trait Archive: Send + Sync {
    /// Reads the entry at `path`. Children are present iff it is a
    /// container.
    async fn read(&self, path: &ArchivePath) -> ArchiveResult<ReadOutcome>;

    /// Creates a new entry at `path`. Fails with `AlreadyExists` if the path
    /// is taken and `NotFound` if an ancestor container is missing.
    async fn create(
        &self,
        metadata: EntryMetadata,
        path: &ArchivePath,
        create_container: bool,
    ) -> ArchiveResult<()>;

    /// Moves the subtree at `src` to `dst`, renaming it if the terminal
    /// segments differ. The store performs the move atomically.
    async fn move_entry(&self, src: &ArchivePath, dst: &ArchivePath) -> ArchiveResult<()>;

    /// Deletes the entry at `path` together with everything below it.
    async fn delete(&self, path: &ArchivePath) -> ArchiveResult<()>;
}

/// [`Archive`] backed by a remote store.
///
/// Each operation is exactly one store call. Nothing is cached and nothing
/// is retried; store faults are translated into [`ArchiveError`] and
/// returned as-is.
#[derive(Debug, Clone)]
pub struct RemoteArchive<S> {
    service: S,
}

impl<S: ArchiveService> RemoteArchive<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn into_inner(self) -> S {
        self.service
    }
}

impl RemoteArchive<ConnectClient> {
    /// Connects to a store over the Connect protocol.
    pub fn connect(config: ConnectConfig) -> ArchiveResult<Self> {
        Ok(Self::new(ConnectClient::new(config)?))
    }
}

#[async_trait]
impl<S: ArchiveService> Archive for RemoteArchive<S> {
    async fn read(&self, path: &ArchivePath) -> ArchiveResult<ReadOutcome> {
        debug!(%path, "Reading entry");

        let response = self
            .service
            .read(ReadRequest { path: path.clone() })
            .await?;

        let metadata = response.metadata.ok_or_else(|| {
            ArchiveError::Protocol(format!("read {path}: response carried no metadata"))
        })?;

        Ok(ReadOutcome {
            metadata,
            children: response.children,
        })
    }

    async fn create(
        &self,
        metadata: EntryMetadata,
        path: &ArchivePath,
        create_container: bool,
    ) -> ArchiveResult<()> {
        debug!(%path, create_container, "Creating entry");

        self.service
            .create(CreateRequest {
                metadata,
                path: path.clone(),
                create_container,
            })
            .await?;

        info!(%path, "Created entry");
        Ok(())
    }

    async fn move_entry(&self, src: &ArchivePath, dst: &ArchivePath) -> ArchiveResult<()> {
        debug!(%src, %dst, "Moving entry");

        self.service
            .move_entry(MoveRequest {
                src: src.clone(),
                dest: dst.clone(),
            })
            .await?;

        info!(%src, %dst, "Moved entry");
        Ok(())
    }

    async fn delete(&self, path: &ArchivePath) -> ArchiveResult<()> {
        debug!(%path, "Deleting entry");

        self.service
            .delete(DeleteRequest { path: path.clone() })
            .await?;

        info!(%path, "Deleted entry");
        Ok(())
    }
}
