//! Wire types for the node's JSON RPC, and the [`NodeClient`] seam.
//!
//! The node transports every numeric field as a decimal or hex string;
//! these structs keep them as strings and leave interpretation to the
//! orchestration layer.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RpcError;
use repstash_core::BlockHash;

/// Subset of `account_info` the channel needs.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// The account's most recent block hash, hex.
    pub frontier: String,
    /// Current balance in raw units, decimal.
    pub balance: String,
    /// Number of blocks in the account chain, decimal.
    #[serde(default)]
    pub block_count: String,
}

/// One entry of a raw `account_history` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub representative: String,
}

impl HistoryEntry {
    /// Whether this entry changed the account's representative: a legacy
    /// `change` block or a state block with the `change` subtype.
    pub fn is_representative_change(&self) -> bool {
        self.entry_type == "change" || (self.entry_type == "state" && self.subtype == "change")
    }
}

/// Raw `account_history` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountHistory {
    #[serde(default, deserialize_with = "entries_or_empty_string")]
    pub history: Vec<HistoryEntry>,
}

/// The node reports an empty history as `"history": ""` rather than an
/// empty array.
fn entries_or_empty_string<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Entries(Vec<HistoryEntry>),
        Empty(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Entries(entries) => Ok(entries),
        Raw::Empty(_) => Ok(Vec::new()),
    }
}

/// A fully-formed state block, as submitted to `process`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub account: String,
    pub previous: String,
    pub representative: String,
    pub balance: String,
    pub link: String,
    pub signature: String,
    pub work: String,
}

/// The seam between the orchestration layer and a ledger node.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Current frontier and balance for an account.
    async fn account_info(&self, account: &str) -> Result<AccountInfo, RpcError>;

    /// Request a proof-of-work token for the given frontier hash.
    async fn work_generate(&self, hash: &BlockHash) -> Result<String, RpcError>;

    /// Submit a signed representative-change block; returns its hash.
    async fn process_change(&self, block: &StateBlock) -> Result<BlockHash, RpcError>;

    /// Representative addresses from the account's change history,
    /// oldest-first.
    async fn representative_history(&self, account: &str) -> Result<Vec<String>, RpcError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_entries_recognized() {
        let legacy = HistoryEntry {
            entry_type: "change".into(),
            subtype: String::new(),
            representative: "nano_x".into(),
        };
        let state = HistoryEntry {
            entry_type: "state".into(),
            subtype: "change".into(),
            representative: "nano_y".into(),
        };
        let send = HistoryEntry {
            entry_type: "state".into(),
            subtype: "send".into(),
            representative: "nano_z".into(),
        };
        assert!(legacy.is_representative_change());
        assert!(state.is_representative_change());
        assert!(!send.is_representative_change());
    }

    #[test]
    fn test_history_empty_string() {
        let parsed: AccountHistory = serde_json::from_str(r#"{"history": ""}"#).unwrap();
        assert!(parsed.history.is_empty());
    }

    #[test]
    fn test_history_entries() {
        let parsed: AccountHistory = serde_json::from_str(
            r#"{"history": [
                {"type": "state", "subtype": "change", "representative": "nano_abc"},
                {"type": "receive", "account": "nano_def", "amount": "1"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(parsed.history.len(), 2);
        assert!(parsed.history[0].is_representative_change());
        assert!(!parsed.history[1].is_representative_change());
    }

    #[test]
    fn test_state_block_serializes_type_field() {
        let block = StateBlock {
            block_type: "state".into(),
            account: "nano_a".into(),
            previous: "00".into(),
            representative: "nano_b".into(),
            balance: "1".into(),
            link: "00".into(),
            signature: "ff".into(),
            work: "aa".into(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "state");
        assert_eq!(json["balance"], "1");
    }
}
