//! An in-memory ledger node for orchestration tests.
//!
//! The mock validates submitted blocks the way a real node would: the
//! `previous` must match the current frontier, the balance must be
//! unchanged, and the signature must verify against the account key
//! under the recomputed block hash. Clones share state, so a test can
//! hand one clone to a channel and keep another for inspection.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use repstash_core::{change_block_hash, decode_address, Balance, BlockHash, PublicKey, Signature};
use repstash_rpc::{AccountInfo, NodeClient, RpcError, StateBlock};

#[derive(Debug)]
struct MockState {
    frontier: BlockHash,
    balance: u128,
    /// Representative addresses, oldest-first.
    history: Vec<String>,
    /// Blocks accepted so far.
    processed: usize,
    /// Reject block number `n` (zero-based) and everything after.
    fail_at: Option<usize>,
}

/// In-memory [`NodeClient`] implementation.
#[derive(Debug, Clone)]
pub struct MockNode {
    state: Arc<Mutex<MockState>>,
}

impl MockNode {
    /// A node holding one open account with the given balance.
    pub fn new(balance: u128) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                frontier: BlockHash([0x11; 32]),
                balance,
                history: Vec::new(),
                processed: 0,
                fail_at: None,
            })),
        }
    }

    /// Make block submission number `n` (zero-based) fail.
    pub fn fail_at(&self, n: usize) {
        self.state.lock().unwrap().fail_at = Some(n);
    }

    /// Append an arbitrary entry to the representative history, bypassing
    /// validation. Lets tests inject foreign or garbage addresses.
    pub fn push_history(&self, representative: impl Into<String>) {
        self.state.lock().unwrap().history.push(representative.into());
    }

    /// Number of blocks accepted so far.
    pub fn accepted(&self) -> usize {
        self.state.lock().unwrap().processed
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn account_info(&self, _account: &str) -> Result<AccountInfo, RpcError> {
        let state = self.state.lock().unwrap();
        Ok(AccountInfo {
            frontier: state.frontier.to_hex(),
            balance: state.balance.to_string(),
            block_count: state.history.len().to_string(),
        })
    }

    async fn work_generate(&self, hash: &BlockHash) -> Result<String, RpcError> {
        Ok(format!("work-{}", &hash.to_hex()[..8]))
    }

    async fn process_change(&self, block: &StateBlock) -> Result<BlockHash, RpcError> {
        let mut state = self.state.lock().unwrap();

        if let Some(n) = state.fail_at {
            if state.processed >= n {
                return Err(RpcError::Node("insufficient work".to_string()));
            }
        }

        let account = decode_address(&block.account)
            .map_err(|_| RpcError::Node("bad account".to_string()))?;
        let representative = decode_address(&block.representative)
            .map_err(|_| RpcError::Node("bad representative".to_string()))?;
        let previous = BlockHash::from_hex(&block.previous)
            .map_err(|_| RpcError::Node("bad previous".to_string()))?;
        let balance: Balance = block
            .balance
            .parse()
            .map_err(|_| RpcError::Node("bad balance".to_string()))?;

        if previous != state.frontier {
            return Err(RpcError::Node("gap previous".to_string()));
        }
        if balance.0 != state.balance {
            return Err(RpcError::Node("balance mismatch".to_string()));
        }

        let account_key = PublicKey::from_bytes(account);
        let hash = change_block_hash(
            &account_key,
            &previous,
            &PublicKey::from_bytes(representative),
            balance,
        );

        let signature_bytes = hex::decode(&block.signature)
            .ok()
            .and_then(|bytes| Signature::try_from(bytes.as_slice()).ok())
            .ok_or_else(|| RpcError::Node("bad signature encoding".to_string()))?;
        if !account_key.verify(hash.as_bytes(), &signature_bytes) {
            return Err(RpcError::Node("bad signature".to_string()));
        }

        state.frontier = hash;
        state.history.push(block.representative.clone());
        state.processed += 1;
        Ok(hash)
    }

    async fn representative_history(&self, _account: &str) -> Result<Vec<String>, RpcError> {
        Ok(self.state.lock().unwrap().history.clone())
    }
}
