//! JSON-RPC 2.0 transport over HTTP

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::RPC_TIMEOUT_SECS;
use crate::error::ProviderError;

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

impl RpcEnvelope {
    fn into_result<R: DeserializeOwned>(self) -> Result<R, ProviderError> {
        if let Some(err) = self.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
                data: err.data,
            });
        }
        // `null` results are legitimate (e.g. a receipt that does not exist yet)
        Ok(serde_json::from_value(self.result.unwrap_or(Value::Null))?)
    }
}

/// A JSON-RPC endpoint, cheap to clone
#[derive(Clone, Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        RpcClient {
            http,
            url: url.into(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Call `method` and decode its result
    pub async fn call<P, R>(&self, method: &str, params: P) -> Result<R, ProviderError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(id, method, "JSON-RPC call");
        let resp = self.http.post(&self.url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        let envelope: RpcEnvelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) if !status.is_success() => {
                return Err(ProviderError::Transport(format!("HTTP {}: {}", status, e)))
            }
            Err(e) => return Err(e.into()),
        };

        let result = envelope.into_result();
        if let Err(e) = &result {
            tracing::debug!(id, method, error = %e, "JSON-RPC call failed");
        }
        result
    }
}

/// Create an HTTP client with default configuration
pub fn create_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(RPC_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
