//! Byte layout and hash of a representative-change state block.
//!
//! The ledger hashes a fixed concatenation with Blake2b-256:
//!
//! ```text
//! preamble (32) || account (32) || previous (32) ||
//! representative (32) || balance (16, big-endian) || link (32)
//! ```
//!
//! The preamble's last byte is the state-block type tag; the link is all
//! zeroes for a representative change. The resulting hash is the message
//! the account's keypair signs.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use std::fmt;
use std::str::FromStr;

use crate::crypto::PublicKey;
use crate::error::FormatError;
use crate::types::BlockHash;

type Blake2b256 = Blake2b<U32>;

/// State block preamble: 31 zero bytes then the type tag 0x06.
const STATE_PREAMBLE: [u8; 32] = {
    let mut bytes = [0u8; 32];
    bytes[31] = 0x06;
    bytes
};

/// An account balance in raw ledger units.
///
/// The ledger transports balances as decimal strings and hashes them as
/// 16-byte big-endian integers; both forms round-trip through this type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Balance(pub u128);

impl Balance {
    /// The 16-byte big-endian wire encoding used in block hashing.
    pub const fn to_be_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl FromStr for Balance {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u128 = s
            .parse()
            .map_err(|_| FormatError::InvalidBalanceFormat(s.to_string()))?;
        Ok(Self(value))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Balance({})", self.0)
    }
}

/// Hash the representative-change block for `account` that replaces its
/// representative while keeping the balance unchanged.
///
/// `previous` is the account's frontier. The link field is always zero
/// for this block type.
pub fn change_block_hash(
    account: &PublicKey,
    previous: &BlockHash,
    representative: &PublicKey,
    balance: Balance,
) -> BlockHash {
    let mut hasher = Blake2b256::new();
    hasher.update(STATE_PREAMBLE);
    hasher.update(account.as_bytes());
    hasher.update(previous.as_bytes());
    hasher.update(representative.as_bytes());
    hasher.update(balance.to_be_bytes());
    hasher.update(BlockHash::ZERO.as_bytes());
    BlockHash(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_parse() {
        assert_eq!("0".parse::<Balance>().unwrap(), Balance(0));
        // One above u128::MAX overflows the 16-byte wire encoding.
        assert_eq!(
            "340282366920938463463374607431768211456".parse::<Balance>(),
            Err(FormatError::InvalidBalanceFormat(
                "340282366920938463463374607431768211456".to_string()
            ))
        );
        assert_eq!(
            "340282366920938463463374607431768211455".parse::<Balance>(),
            Ok(Balance(u128::MAX))
        );
    }

    #[test]
    fn test_balance_rejects_garbage() {
        for bad in ["", "12a", "-5", "1.5", "0x10"] {
            assert!(
                bad.parse::<Balance>().is_err(),
                "accepted {:?} as a balance",
                bad
            );
        }
    }

    #[test]
    fn test_balance_wire_encoding() {
        assert_eq!(Balance(0).to_be_bytes(), [0u8; 16]);
        let bytes = Balance(0x0102).to_be_bytes();
        assert_eq!(bytes[14], 0x01);
        assert_eq!(bytes[15], 0x02);
        assert_eq!(&bytes[..14], &[0u8; 14]);
    }

    #[test]
    fn test_hash_is_deterministic_and_input_sensitive() {
        let account = PublicKey([0x11; 32]);
        let previous = BlockHash([0x22; 32]);
        let rep_a = PublicKey([0x33; 32]);
        let rep_b = PublicKey([0x34; 32]);
        let balance = Balance(1_000_000);

        let h1 = change_block_hash(&account, &previous, &rep_a, balance);
        let h2 = change_block_hash(&account, &previous, &rep_a, balance);
        assert_eq!(h1, h2);

        assert_ne!(h1, change_block_hash(&account, &previous, &rep_b, balance));
        assert_ne!(
            h1,
            change_block_hash(&account, &previous, &rep_a, Balance(1_000_001))
        );
        assert_ne!(
            h1,
            change_block_hash(&account, &BlockHash([0x23; 32]), &rep_a, balance)
        );
    }

    #[test]
    fn test_signed_block_hash_verifies() {
        let keypair = crate::Keypair::from_seed(&[0x09; 32]).unwrap();
        let hash = change_block_hash(
            &keypair.public_key(),
            &BlockHash([0x01; 32]),
            &PublicKey([0x02; 32]),
            Balance(42),
        );
        let signature = keypair.sign(hash.as_bytes());
        assert!(keypair.public_key().verify(hash.as_bytes(), &signature));
    }
}
