//! Checksummed base32 codec for ledger addresses.
//!
//! An address is `nano_` (or the legacy `xrb_`) followed by 52 digits
//! encoding the 32-byte public key as a 260-bit value (top 4 bits zero),
//! then 8 digits encoding a 40-bit checksum. The digit alphabet is the
//! ledger's own, not RFC 4648: it omits `0`, `2`, `l`, `v` and a digit's
//! value is its index in the alphabet string.
//!
//! The checksum is the 5-byte Blake2b hash of the raw key, byte-reversed
//! before encoding.
//!
//! Since 32 = 2^5, the "big integer" digit arithmetic reduces to exact
//! 5-bit windowing over the byte string; no precision is lost on the
//! 260-bit body or the 40-bit checksum.

use blake2::digest::consts::U5;
use blake2::{Blake2b, Digest};

use crate::error::DecodingError;

/// The ledger's base32 alphabet. Digit value = index.
pub const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Canonical address prefix.
pub const PREFIX: &str = "nano_";

/// Legacy address prefix, accepted on decode only.
pub const LEGACY_PREFIX: &str = "xrb_";

const BODY_LEN: usize = 52;
const CHECKSUM_LEN: usize = 8;

type Blake2b40 = Blake2b<U5>;

/// Reverse lookup table, digit byte -> value, -1 for non-digits.
/// Built once at compile time; shared freely across threads.
static DIGIT_VALUES: [i8; 256] = digit_values();

const fn digit_values() -> [i8; 256] {
    let mut table = [-1i8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Emit `bytes` as base32 digits, MSB first, with `pad_bits` zero bits
/// prepended so the total bit count is a multiple of 5.
fn push_digits(out: &mut String, bytes: &[u8], pad_bits: usize) {
    let mut acc: u32 = 0;
    let mut bits = pad_bits;
    for &byte in bytes {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
    }
}

/// The 8-digit checksum for a raw 32-byte key.
fn checksum_digits(key: &[u8; 32]) -> String {
    let digest = Blake2b40::digest(key);
    let mut reversed = [0u8; 5];
    for (i, byte) in digest.iter().rev().enumerate() {
        reversed[i] = *byte;
    }
    let mut out = String::with_capacity(CHECKSUM_LEN);
    push_digits(&mut out, &reversed, 0);
    out
}

/// Encode a 32-byte public key as a ledger address.
pub fn encode_address(key: &[u8; 32]) -> String {
    let mut out = String::with_capacity(PREFIX.len() + BODY_LEN + CHECKSUM_LEN);
    out.push_str(PREFIX);
    // 4 leading zero bits extend the 256-bit key to 260 bits.
    push_digits(&mut out, key, 4);
    out.push_str(&checksum_digits(key));
    out
}

/// Decode a ledger address back to its 32-byte public key.
///
/// Accepts both known prefixes. Rejects a body whose top 4 bits are
/// non-zero rather than silently reducing modulo 2^256, and rejects any
/// checksum mismatch. No other structure is checked; in particular the
/// key is not required to be a curve point.
pub fn decode_address(address: &str) -> Result<[u8; 32], DecodingError> {
    let body = address
        .strip_prefix(PREFIX)
        .or_else(|| address.strip_prefix(LEGACY_PREFIX))
        .ok_or(DecodingError::InvalidPrefix)?;

    if body.len() != BODY_LEN + CHECKSUM_LEN {
        return Err(DecodingError::InvalidLength(body.len()));
    }

    let mut digits = [0u8; BODY_LEN + CHECKSUM_LEN];
    for (i, ch) in body.chars().enumerate() {
        let value = if ch.is_ascii() {
            DIGIT_VALUES[ch as usize]
        } else {
            -1
        };
        if value < 0 {
            return Err(DecodingError::InvalidCharacter(ch));
        }
        digits[i] = value as u8;
    }

    // The first digit carries the 4 pad bits plus the key's top bit, so
    // anything above 1 means the 260-bit value overflows 256 bits.
    if digits[0] > 1 {
        return Err(DecodingError::InvalidLeadingBits);
    }

    let mut key = [0u8; 32];
    let mut acc: u32 = u32::from(digits[0]);
    let mut bits = 1usize;
    let mut idx = 0usize;
    for &digit in &digits[1..BODY_LEN] {
        acc = (acc << 5) | u32::from(digit);
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            key[idx] = ((acc >> bits) & 0xff) as u8;
            idx += 1;
        }
    }

    if checksum_digits(&key) != body[BODY_LEN..] {
        return Err(DecodingError::ChecksumMismatch);
    }

    Ok(key)
}
