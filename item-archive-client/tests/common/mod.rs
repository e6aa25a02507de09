//! In-memory store used to exercise the archive contract end to end.

#![allow(dead_code)]

use async_trait::async_trait;
use item_archive_client::messages::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, MoveRequest, MoveResponse,
    ReadRequest, ReadResponse,
};
use item_archive_client::{ArchiveService, ErrorCode, Status};
use item_archive_types::{ChildrenView, EntryKind, EntryMetadata};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct Node {
    metadata: EntryMetadata,
    kind: EntryKind,
}

/// Tree kept as a map from full path to node. The root (empty path) always
/// exists and is a container.
#[derive(Debug)]
pub struct MemoryStore {
    nodes: Mutex<BTreeMap<Vec<String>, Node>>,
    calls: Mutex<Vec<&'static str>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            Vec::new(),
            Node {
                metadata: EntryMetadata::new("root"),
                kind: EntryKind::Container,
            },
        );
        Self {
            nodes: Mutex::new(nodes),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// RPC names in the order they were received.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

fn is_under(path: &[String], ancestor: &[String]) -> bool {
    path.len() >= ancestor.len() && path[..ancestor.len()] == *ancestor
}

fn render(path: &[String]) -> String {
    format!("/{}", path.join("/"))
}

fn parent_is_container(
    nodes: &BTreeMap<Vec<String>, Node>,
    path: &[String],
) -> Result<(), Status> {
    let parent = &path[..path.len() - 1];
    match nodes.get(parent) {
        Some(node) if node.kind == EntryKind::Container => Ok(()),
        Some(_) => Err(Status::new(
            ErrorCode::FailedPrecondition,
            format!("{} is not a container", render(parent)),
        )),
        None => Err(Status::not_found(render(parent))),
    }
}

#[async_trait]
impl ArchiveService for MemoryStore {
    async fn read(&self, request: ReadRequest) -> Result<ReadResponse, Status> {
        self.record("Read");
        let nodes = self.nodes.lock().unwrap();
        let path = request.path.segments();
        let node = nodes
            .get(path)
            .ok_or_else(|| Status::not_found(render(path)))?;

        let children = (node.kind == EntryKind::Container).then(|| {
            let mut view = ChildrenView::default();
            for (child_path, child) in nodes.iter() {
                if child_path.len() != path.len() + 1 || !is_under(child_path, path) {
                    continue;
                }
                let name = child_path[path.len()].clone();
                match child.kind {
                    EntryKind::Item => view.item_names.push(name),
                    EntryKind::Container => view.container_names.push(name),
                }
            }
            view
        });

        Ok(ReadResponse {
            metadata: Some(node.metadata.clone()),
            children,
        })
    }

    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, Status> {
        self.record("Create");
        let mut nodes = self.nodes.lock().unwrap();
        let path = request.path.into_segments();
        if nodes.contains_key(&path) {
            return Err(Status::already_exists(render(&path)));
        }
        parent_is_container(&nodes, &path)?;

        let kind = if request.create_container {
            EntryKind::Container
        } else {
            EntryKind::Item
        };
        nodes.insert(
            path,
            Node {
                metadata: request.metadata,
                kind,
            },
        );
        Ok(CreateResponse {})
    }

    async fn move_entry(&self, request: MoveRequest) -> Result<MoveResponse, Status> {
        self.record("Move");
        let mut nodes = self.nodes.lock().unwrap();
        let src = request.src.into_segments();
        let dest = request.dest.into_segments();

        if src.is_empty() {
            return Err(Status::new(ErrorCode::InvalidArgument, "cannot move the root"));
        }
        if !nodes.contains_key(&src) {
            return Err(Status::not_found(render(&src)));
        }
        if nodes.contains_key(&dest) {
            return Err(Status::already_exists(render(&dest)));
        }
        if is_under(&dest, &src) {
            return Err(Status::new(
                ErrorCode::InvalidArgument,
                "cannot move an entry below itself",
            ));
        }
        parent_is_container(&nodes, &dest)?;

        let moved: Vec<Vec<String>> = nodes
            .keys()
            .filter(|p| is_under(p, &src))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let mut new = dest.clone();
                new.extend_from_slice(&old[src.len()..]);
                nodes.insert(new, node);
            }
        }
        Ok(MoveResponse {})
    }

    async fn delete(&self, request: DeleteRequest) -> Result<DeleteResponse, Status> {
        self.record("Delete");
        let mut nodes = self.nodes.lock().unwrap();
        let path = request.path.into_segments();
        if path.is_empty() {
            return Err(Status::new(ErrorCode::InvalidArgument, "cannot delete the root"));
        }
        if !nodes.contains_key(&path) {
            return Err(Status::not_found(render(&path)));
        }
        nodes.retain(|p, _| !is_under(p, &path));
        Ok(DeleteResponse {})
    }
}

/// Store that answers every call with the same fault.
pub struct FailingStore(pub Status);

#[async_trait]
impl ArchiveService for FailingStore {
    async fn read(&self, _request: ReadRequest) -> Result<ReadResponse, Status> {
        Err(self.0.clone())
    }

    async fn create(&self, _request: CreateRequest) -> Result<CreateResponse, Status> {
        Err(self.0.clone())
    }

    async fn move_entry(&self, _request: MoveRequest) -> Result<MoveResponse, Status> {
        Err(self.0.clone())
    }

    async fn delete(&self, _request: DeleteRequest) -> Result<DeleteResponse, Status> {
        Err(self.0.clone())
    }
}

/// Store that answers reads without metadata.
pub struct HollowStore;

#[async_trait]
impl ArchiveService for HollowStore {
    async fn read(&self, _request: ReadRequest) -> Result<ReadResponse, Status> {
        Ok(ReadResponse::default())
    }

    async fn create(&self, _request: CreateRequest) -> Result<CreateResponse, Status> {
        Ok(CreateResponse {})
    }

    async fn move_entry(&self, _request: MoveRequest) -> Result<MoveResponse, Status> {
        Ok(MoveResponse {})
    }

    async fn delete(&self, _request: DeleteRequest) -> Result<DeleteResponse, Status> {
        Ok(DeleteResponse {})
    }
}
