//! RPC endpoint access.
//!
//! A trait-based interface for submitting SQL text to the remote endpoint,
//! so the runner can be driven by the HTTP client or by a mock in tests.

mod client;
mod mock;

pub use client::RpcClient;
pub use mock::{MockExecutor, MockReply};

use crate::error::Result;
use async_trait::async_trait;

/// The raw HTTP answer to one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text (may be empty).
    pub body: String,
}

impl RpcResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Submits one SQL statement to the endpoint.
///
/// `Ok` means a response arrived, whatever its status. `Err` is a
/// transport-level failure (timeout, DNS, refused connection, broken body).
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<RpcResponse>;
}
