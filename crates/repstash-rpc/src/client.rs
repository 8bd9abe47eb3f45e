//! HTTP implementation of [`NodeClient`] over the node's JSON RPC.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::RpcError;
use crate::types::{AccountHistory, AccountInfo, NodeClient, StateBlock};
use repstash_core::BlockHash;

/// How many history entries to request per read.
const HISTORY_PAGE: u32 = 200;

/// JSON RPC client for a ledger node.
#[derive(Debug, Clone)]
pub struct HttpNodeClient {
    url: String,
    client: reqwest::Client,
}

impl HttpNodeClient {
    /// Create a client for the node at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// POST one action object and decode the reply.
    ///
    /// The node signals failure in-band with an `error` field and HTTP
    /// 200, so that is checked before shape-decoding the rest.
    async fn call<T: DeserializeOwned>(&self, body: serde_json::Value) -> Result<T, RpcError> {
        debug!(url = %self.url, action = %body["action"], "rpc call");
        let response = self.client.post(&self.url).json(&body).send().await?;
        let value: serde_json::Value = response.json().await?;

        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Err(RpcError::Node(message.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Deserialize)]
struct WorkResponse {
    work: String,
}

#[derive(Deserialize)]
struct ProcessResponse {
    hash: String,
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn account_info(&self, account: &str) -> Result<AccountInfo, RpcError> {
        self.call(json!({
            "action": "account_info",
            "account": account,
        }))
        .await
    }

    async fn work_generate(&self, hash: &BlockHash) -> Result<String, RpcError> {
        let response: WorkResponse = self
            .call(json!({
                "action": "work_generate",
                "hash": hash.to_hex(),
            }))
            .await?;
        Ok(response.work)
    }

    async fn process_change(&self, block: &StateBlock) -> Result<BlockHash, RpcError> {
        let response: ProcessResponse = self
            .call(json!({
                "action": "process",
                "json_block": "true",
                "subtype": "change",
                "block": block,
            }))
            .await?;
        BlockHash::from_hex(&response.hash)
            .map_err(|_| RpcError::Malformed(format!("process hash {:?}", response.hash)))
    }

    async fn representative_history(&self, account: &str) -> Result<Vec<String>, RpcError> {
        let response: AccountHistory = self
            .call(json!({
                "action": "account_history",
                "account": account,
                "count": HISTORY_PAGE,
                "raw": true,
            }))
            .await?;

        // The node returns newest-first; the channel wants oldest-first.
        let mut representatives: Vec<String> = response
            .history
            .into_iter()
            .filter(|entry| entry.is_representative_change())
            .map(|entry| entry.representative)
            .collect();
        representatives.reverse();
        Ok(representatives)
    }
}
