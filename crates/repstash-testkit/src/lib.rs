//! # Repstash Testkit
//!
//! Testing utilities for repstash.
//!
//! - **Golden vectors**: recorded key and address values from the
//!   reference ledger implementation, for cross-implementation checks
//! - **Generators**: proptest strategies over seeds, keys, and payloads
//! - **Mock node**: an in-memory [`repstash_rpc::NodeClient`] that
//!   validates submitted blocks the way a real node would

pub mod generators;
pub mod mock_node;
pub mod vectors;

pub use mock_node::MockNode;
pub use vectors::{address_vectors, AddressVector, ZERO_SEED_PUBLIC_KEY};
