//! Proptest generators for property-based testing.

use proptest::prelude::*;

use repstash_core::{Chunk, Keypair, PublicKey};

/// Generate a random 32-byte seed.
pub fn seed() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    seed().prop_map(|bytes| Keypair::from_seed(&bytes).expect("seed is 32 bytes"))
}

/// Generate a valid public key (an actual curve point).
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate arbitrary 32-byte key material, point or not.
pub fn key_bytes() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

/// Generate a random chunk.
pub fn chunk() -> impl Strategy<Value = Chunk> {
    any::<[u8; 32]>().prop_map(Chunk::from_bytes)
}

/// Generate payload bytes up to the given length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}
