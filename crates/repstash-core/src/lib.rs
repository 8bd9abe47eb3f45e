//! # Repstash Core
//!
//! Pure primitives for storing covert data in a proof-of-stake ledger's
//! account-representative field.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over bytes, and every public operation is safe to call
//! concurrently: inputs are owned, outputs are fresh values.
//!
//! ## Key Types
//!
//! - [`Keypair`] - Blake2b-flavoured Ed25519 signing key derived from a seed
//! - [`PublicKey`] - Canonical 32-byte Edwards point encoding
//! - [`Chunk`] - The 32-byte unit carried by one representative field
//! - [`Balance`] - 128-bit ledger balance with its 16-byte wire encoding
//!
//! ## Subsystems
//!
//! - [`crypto`] - Ed25519 with Blake2b-512 substituted for SHA-512
//! - [`address`] - Checksummed base32 ledger address codec
//! - [`frame`] - Marker-delimited payload framing over 32-byte chunks
//! - [`block`] - Byte layout and hash of a representative-change block
//!
//! All three hash call sites that differ from standard Ed25519 (seed
//! expansion, nonce, challenge) live in [`crypto`]; the curve arithmetic
//! itself is `curve25519-dalek` and is never re-derived here.

pub mod address;
pub mod block;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod types;

pub use address::{decode_address, encode_address};
pub use block::{change_block_hash, Balance};
pub use crypto::{Keypair, MontgomeryKey, PublicKey, Signature};
pub use error::{CryptoError, DecodingError, FormatError};
pub use frame::{build_frames, extract_payloads, Payloads, BEGIN_MARKER, END_MARKER};
pub use types::{BlockHash, Chunk};
