//! HTTP client for the wallet bridge.
//!
//! The bridge is a local sidecar holding the wallet session; it exposes a
//! JSON-over-HTTP interface with an `action` discriminator per request.
//! This client wraps `reqwest::Client` with the bridge's base URL and
//! typed methods for each action.

use serde::Deserialize;
use std::time::Duration;

use vaultops_gate::{ConnectionStatus, SessionState};
use vaultops_types::{ChainId, TxHash};

use crate::call::{CallValue, ContractCall};
use crate::error::ProviderError;
use crate::provider::{Provider, Receipt};

#[derive(Clone)]
pub struct WalletBridgeClient {
    http: reqwest::Client,
    bridge_url: String,
}

impl WalletBridgeClient {
    /// Create a client targeting the given base URL (e.g. `http://127.0.0.1:7740`).
    pub fn new(bridge_url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            bridge_url: bridge_url.into(),
        })
    }

    pub fn bridge_url(&self) -> &str {
        &self.bridge_url
    }

    /// Send an `action`-tagged request and return the `result` field.
    async fn bridge_request(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| ProviderError::Http("params must be a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        let response = self
            .http
            .post(&self.bridge_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(format!(
                "bridge returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Http(format!("invalid JSON response: {e}")))?;

        if let Some(err) = json.get("error") {
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .or_else(|| err.as_str())
                .unwrap_or("unknown bridge error")
                .to_string();
            let reverted = err
                .get("reverted")
                .and_then(|r| r.as_bool())
                .unwrap_or(false);
            return Err(if reverted {
                ProviderError::Reverted(message)
            } else {
                ProviderError::Bridge(message)
            });
        }

        Ok(json.get("result").cloned().unwrap_or(json))
    }
}

#[derive(Debug, Deserialize)]
struct SessionResult {
    status: String,
    #[serde(default)]
    chain_id: Option<u64>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResult {
    tx_hash: String,
}

impl Provider for WalletBridgeClient {
    async fn session(&self) -> Result<SessionState, ProviderError> {
        let result = self
            .bridge_request("session", serde_json::json!({}))
            .await?;
        let resp: SessionResult = serde_json::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid session response: {e}")))?;

        let status = match resp.status.as_str() {
            "connected" => ConnectionStatus::Connected,
            "connecting" | "reconnecting" => ConnectionStatus::Connecting,
            _ => ConnectionStatus::Disconnected,
        };
        Ok(SessionState {
            status,
            chain_id: resp.chain_id.map(ChainId::new),
            address: resp.address,
        })
    }

    async fn call(&self, call: &ContractCall) -> Result<CallValue, ProviderError> {
        let result = self.bridge_request("call", call.to_json()).await?;
        Ok(CallValue(result))
    }

    async fn send(&self, call: &ContractCall) -> Result<TxHash, ProviderError> {
        let result = self.bridge_request("send", call.to_json()).await?;
        let resp: SendResult = serde_json::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid send response: {e}")))?;
        TxHash::parse(&resp.tx_hash)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    async fn wait_for_receipt(&self, hash: &TxHash) -> Result<Receipt, ProviderError> {
        let result = self
            .bridge_request(
                "wait_receipt",
                serde_json::json!({ "tx_hash": hash.as_str() }),
            )
            .await?;
        serde_json::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid receipt response: {e}")))
    }

    async fn switch_chain(&self, chain: ChainId) -> Result<(), ProviderError> {
        self.bridge_request(
            "switch_chain",
            serde_json::json!({ "chain_id": chain.get() }),
        )
        .await
        .map_err(|e| match e {
            ProviderError::Bridge(m) => ProviderError::SwitchRejected(m),
            other => other,
        })?;
        Ok(())
    }
}
