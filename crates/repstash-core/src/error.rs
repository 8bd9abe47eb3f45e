//! Error types for the repstash core.

use thiserror::Error;

/// Errors from key derivation and point handling.
///
/// Signature verification never produces these: a malformed signature or
/// key simply does not verify.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("seed must be exactly 32 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("public key must be exactly 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("signature must be exactly 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("bytes do not encode a point on the curve")]
    InvalidPoint,
}

/// Errors from parsing a textual ledger address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodingError {
    #[error("address prefix is neither nano_ nor xrb_")]
    InvalidPrefix,

    #[error("address body must be exactly 60 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid character in address: {0:?}")]
    InvalidCharacter(char),

    #[error("top 4 bits of the address body are non-zero")]
    InvalidLeadingBits,

    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// Errors from parsing ledger value fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("balance is not a decimal 128-bit integer: {0:?}")]
    InvalidBalanceFormat(String),
}
