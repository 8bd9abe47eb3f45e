//! Strong type definitions shared across the repstash core.
//!
//! All fixed-size byte values are newtypes to prevent misuse at compile time.

use std::fmt;

/// A 32-byte ledger block hash.
///
/// Appears as an account's frontier ("previous" when building the next
/// block) and as the output of [`crate::change_block_hash`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero hash (sentinel, and the link field of a change block).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 32-byte chunk, the atomic unit exchanged between the address codec
/// and the message framer.
///
/// One chunk is carried by exactly one representative-change block.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Chunk(pub [u8; 32]);

impl Chunk {
    /// Byte width of a chunk, fixed by the ledger's key size.
    pub const SIZE: usize = 32;

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({})", &hex::encode(self.0)[..16])
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Chunk {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Chunk {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into()?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_hash_hex_roundtrip() {
        let hash = BlockHash::from_bytes([0x42; 32]);
        let hex = hash.to_hex();
        let recovered = BlockHash::from_hex(&hex).unwrap();
        assert_eq!(hash, recovered);
    }

    #[test]
    fn test_block_hash_rejects_short_hex() {
        assert!(BlockHash::from_hex("abcd").is_err());
    }

    #[test]
    fn test_chunk_from_slice() {
        let bytes = [7u8; 32];
        let chunk = Chunk::try_from(&bytes[..]).unwrap();
        assert_eq!(chunk.as_bytes(), &bytes);

        assert!(Chunk::try_from(&bytes[..31]).is_err());
    }
}
