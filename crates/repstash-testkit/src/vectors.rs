//! Golden vectors recorded from the reference ledger implementation.
//!
//! These values are pinned, not computed here: an implementation that
//! disagrees with any of them writes data no other implementation can
//! read back.

use repstash_core::{decode_address, encode_address, Keypair};

/// Public key of the all-zero 32-byte private scalar seed, as produced by
/// the ledger's ed25519-blake2b.
pub const ZERO_SEED_PUBLIC_KEY: &str =
    "19d3d919475deed4696b5d13018151d1af88b2bd3bcff048b45031c1f36d1858";

/// A recorded key/address pair.
#[derive(Debug, Clone)]
pub struct AddressVector {
    pub name: &'static str,
    /// 32-byte key, hex.
    pub key: &'static str,
    /// Full textual address.
    pub address: &'static str,
}

/// Key/address pairs published by the ledger itself.
pub fn address_vectors() -> Vec<AddressVector> {
    vec![
        AddressVector {
            name: "burn address (all-zero key)",
            key: "0000000000000000000000000000000000000000000000000000000000000000",
            address: "nano_1111111111111111111111111111111111111111111111111111hifc8npp",
        },
        AddressVector {
            name: "genesis account",
            key: "e89208dd038fbb269987689621d52292ae9c35941a7484756ecced92a65093ba",
            address: "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3",
        },
    ]
}

fn key_from_hex(hex_key: &str) -> [u8; 32] {
    let bytes = hex::decode(hex_key).expect("vector key is valid hex");
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    key
}

/// Check every address vector in both directions. Returns the failures.
pub fn verify_address_vectors() -> Vec<&'static str> {
    address_vectors()
        .iter()
        .filter(|vector| {
            let key = key_from_hex(vector.key);
            encode_address(&key) != vector.address
                || decode_address(vector.address).ok() != Some(key)
        })
        .map(|vector| vector.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_vectors_hold() {
        let failures = verify_address_vectors();
        assert!(failures.is_empty(), "vectors failed: {:?}", failures);
    }

    #[test]
    fn test_zero_seed_public_key() {
        let keypair = Keypair::from_seed(&[0u8; 32]).unwrap();
        assert_eq!(keypair.public_key().to_hex(), ZERO_SEED_PUBLIC_KEY);
    }

    #[test]
    fn test_zero_seed_is_stable_across_calls() {
        let kp1 = Keypair::from_seed(&[0u8; 32]).unwrap();
        let kp2 = Keypair::from_seed(&[0u8; 32]).unwrap();
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.sign(b"vector"), kp2.sign(b"vector"));
    }
}
