//! Mock executor for testing.
//!
//! Replays scripted replies in order and records every statement it was
//! asked to run.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{RpcResponse, SqlExecutor};
use crate::error::{RunnerError, Result};

/// A scripted reply for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with the given status and body.
    Respond(u16, String),
    /// Fail at the transport level with the given message.
    Fail(String),
}

/// An executor that returns scripted replies instead of making requests.
///
/// Once the script is exhausted every call answers `200` with an empty body.
#[derive(Debug, Default)]
pub struct MockExecutor {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<String>>,
}

impl MockExecutor {
    /// Creates a mock that answers `200` to everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.push(MockReply::Respond(status, body.into()))
    }

    /// Queues a transport failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Fail(message.into()))
    }

    fn push(self, reply: MockReply) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    /// Statements received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl SqlExecutor for MockExecutor {
    async fn execute(&self, sql: &str) -> Result<RpcResponse> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(sql.to_string());

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match reply {
            Some(MockReply::Respond(status, body)) => Ok(RpcResponse::new(status, body)),
            Some(MockReply::Fail(message)) => Err(RunnerError::transport(message)),
            None => Ok(RpcResponse::new(200, "")),
        }
    }
}
