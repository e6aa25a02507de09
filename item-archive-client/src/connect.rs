//! `ArchiveService` over HTTP using the Connect protocol.
//!
//! Every RPC is a unary call: `POST {base_url}/{service}/{Method}` with a
//! JSON body. Success is any 2xx with the response message as JSON; failures
//! carry a Connect error body (`{"code": "...", "message": "..."}`).

use crate::error::{ArchiveError, ArchiveResult};
use crate::messages::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, MoveRequest, MoveResponse,
    ReadRequest, ReadResponse,
};
use crate::service::ArchiveService;
use crate::status::{ErrorCode, Status};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Fully-qualified service name of the archive store.
pub const DEFAULT_SERVICE: &str = "v1.ArchiveService";

/// Value sent in the `Connect-Protocol-Version` header.
pub const CONNECT_PROTOCOL_VERSION: &str = "1";

/// Connection settings for a [`ConnectClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
    /// Base URL of the store, e.g. `http://localhost:8330`.
    pub base_url: String,
    /// Fully-qualified service name used in the RPC route.
    pub service: String,
    /// Per-request timeout in seconds. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8330".to_string(),
            service: DEFAULT_SERVICE.to_string(),
            request_timeout_secs: None,
            user_agent: concat!("item-archive/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Connect-protocol client for the archive store.
#[derive(Debug, Clone)]
pub struct ConnectClient {
    config: ConnectConfig,
    client: Client,
    base_url: Url,
}

impl ConnectClient {
    /// Creates a client, validating the base URL.
    pub fn new(config: ConnectConfig) -> ArchiveResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ArchiveError::Config(format!("failed to create HTTP client: {e}")))?;

        Self::with_client(config, client)
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(config: ConnectConfig, client: Client) -> ArchiveResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ArchiveError::Config(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ArchiveError::Config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }
        if config.service.is_empty() {
            return Err(ArchiveError::Config("service name is empty".to_string()));
        }

        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    pub fn config(&self) -> &ConnectConfig {
        &self.config
    }

    /// The URL an RPC is posted to.
    pub fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.config.service,
            method
        )
    }

    async fn unary<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, Status>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(method);
        debug!(%url, "Connect unary call");

        let response = self
            .client
            .post(&url)
            .header("Connect-Protocol-Version", CONNECT_PROTOCOL_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| Status::unavailable(format!("{method} request failed: {e}")))?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let status = Status::from_http(http_status.as_u16(), &body);
            debug!(method, code = %status.code, "Connect call failed");
            return Err(status);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Status::unavailable(format!("failed to read {method} response: {e}")))?;
        // Empty messages may arrive as an empty body.
        let body: &[u8] = if body.is_empty() { b"{}" } else { &body };

        serde_json::from_slice(body).map_err(|e| {
            Status::new(
                ErrorCode::Internal,
                format!("failed to parse {method} response: {e}"),
            )
        })
    }
}

#[async_trait]
impl ArchiveService for ConnectClient {
    async fn read(&self, request: ReadRequest) -> Result<ReadResponse, Status> {
        self.unary("Read", &request).await
    }

    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, Status> {
        self.unary("Create", &request).await
    }

    async fn move_entry(&self, request: MoveRequest) -> Result<MoveResponse, Status> {
        self.unary("Move", &request).await
    }

    async fn delete(&self, request: DeleteRequest) -> Result<DeleteResponse, Status> {
        self.unary("Delete", &request).await
    }
}
