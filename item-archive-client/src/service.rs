//! The store boundary.

use crate::messages::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, MoveRequest, MoveResponse,
    ReadRequest, ReadResponse,
};
use crate::status::Status;
use async_trait::async_trait;
use std::sync::Arc;

/// One method per RPC the store exposes.
///
/// Implementations must map their own transport failures to a [`Status`]
/// (typically `unavailable`) rather than panicking.
#[async_trait]
pub trait ArchiveService: Send + Sync {
    async fn read(&self, request: ReadRequest) -> Result<ReadResponse, Status>;

    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, Status>;

    /// The store's `Move` RPC.
    async fn move_entry(&self, request: MoveRequest) -> Result<MoveResponse, Status>;

    async fn delete(&self, request: DeleteRequest) -> Result<DeleteResponse, Status>;
}

#[async_trait]
impl<S: ArchiveService + ?Sized> ArchiveService for Arc<S> {
    async fn read(&self, request: ReadRequest) -> Result<ReadResponse, Status> {
        (**self).read(request).await
    }

    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, Status> {
        (**self).create(request).await
    }

    async fn move_entry(&self, request: MoveRequest) -> Result<MoveResponse, Status> {
        (**self).move_entry(request).await
    }

    async fn delete(&self, request: DeleteRequest) -> Result<DeleteResponse, Status> {
        (**self).delete(request).await
    }
}
