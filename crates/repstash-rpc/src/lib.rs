//! # Repstash RPC
//!
//! The network half of repstash: a thin JSON RPC client for a ledger node
//! and the orchestration that walks "one block per chunk" on write and
//! "history to chunks" on read.
//!
//! The node is reached through the [`NodeClient`] trait so the
//! orchestration can be driven by an in-memory mock in tests;
//! [`HttpNodeClient`] is the production implementation over `reqwest`.
//!
//! Everything here is sequential glue: each written block depends on the
//! previous frontier, so writes cannot be parallelized, and the loop
//! aborts on the first failure rather than retrying.

pub mod channel;
pub mod client;
pub mod error;
pub mod types;

pub use channel::{read_payloads, CovertChannel};
pub use client::HttpNodeClient;
pub use error::{ChannelError, RpcError};
pub use types::{AccountInfo, HistoryEntry, NodeClient, StateBlock};
