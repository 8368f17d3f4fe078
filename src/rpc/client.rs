//! HTTP client for the `exec_sql` RPC endpoint.
//!
//! Sends `POST {base}/rest/v1/rpc/{function}` with the API key in both the
//! `apikey` and `Authorization` headers and `{"sql": ...}` as the body.
//! There are no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::EndpointConfig;
use crate::error::{RunnerError, Result};

use super::{RpcResponse, SqlExecutor};

/// Request body for the RPC call.
#[derive(Debug, Serialize)]
struct ExecSqlRequest<'a> {
    sql: &'a str,
}

/// reqwest-backed [`SqlExecutor`].
#[derive(Debug, Clone)]
pub struct RpcClient {
    endpoint: EndpointConfig,
    url: Url,
    client: Client,
}

impl RpcClient {
    /// Creates a client for the given endpoint.
    pub fn new(endpoint: EndpointConfig) -> Result<Self> {
        let url = endpoint.rpc_url()?;
        let client = Client::builder()
            .timeout(endpoint.timeout())
            .build()
            .map_err(|e| RunnerError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            url,
            client,
        })
    }

    /// The full RPC URL requests are sent to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Turns a reqwest error into a readable transport error.
    fn describe_error(&self, error: &reqwest::Error) -> RunnerError {
        if error.is_timeout() {
            RunnerError::transport(format!(
                "Request timed out after {}s",
                self.endpoint.timeout().as_secs()
            ))
        } else if error.is_connect() {
            RunnerError::transport(format!(
                "Failed to connect to {}: {}",
                self.endpoint.host(),
                error
            ))
        } else {
            RunnerError::transport(format!("Request failed: {}", error))
        }
    }
}

#[async_trait]
impl SqlExecutor for RpcClient {
    async fn execute(&self, sql: &str) -> Result<RpcResponse> {
        debug!("POST {} ({} bytes of SQL)", self.url, sql.len());

        let api_key = self.endpoint.api_key();
        let response = self
            .client
            .post(self.url.clone())
            .header("apikey", api_key)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(&ExecSqlRequest { sql })
            .send()
            .await
            .map_err(|e| self.describe_error(&e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.describe_error(&e))?;

        debug!("Endpoint answered {}", status);
        Ok(RpcResponse { status, body })
    }
}
