//! Ed25519 signing with Blake2b-512 in place of SHA-512.
//!
//! The target ledger replaces SHA-512 with Blake2b-512 at the three hash
//! call sites of Ed25519: seed expansion, per-signature nonce, and the
//! challenge. The scalar algebra is unchanged, so signatures interoperate
//! exactly with verifiers built on the same substitution, and not at all
//! with the standard scheme.
//!
//! Curve arithmetic is `curve25519-dalek`; nothing in this module touches
//! field elements directly.

use blake2::{Blake2b512, Digest};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::{clamp_integer, Scalar};
use std::fmt;

use crate::error::CryptoError;

/// Blake2b-512 over a sequence of byte slices.
fn blake2b512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// A canonically-encoded 32-byte Edwards public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create from raw bytes. The bytes are not checked for point validity
    /// here; operations that need a point fail on non-points.
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

    /// Map the Edwards point to its Montgomery-form x coordinate.
    ///
    /// Uses the birational map only; no private material is involved.
    pub fn to_montgomery(&self) -> Result<MontgomeryKey, CryptoError> {
        let point = CompressedEdwardsY(self.0)
            .decompress()
            .ok_or(CryptoError::InvalidPoint)?;
        Ok(MontgomeryKey(point.to_montgomery().to_bytes()))
    }

    /// Verify a signature over a message.
    ///
    /// Returns `false` for any malformed point or non-canonical scalar
    /// encountered along the way; a signature's validity and its
    /// well-formedness are the same observable property. Never panics,
    /// never errors.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let a = match CompressedEdwardsY(self.0).decompress() {
            Some(point) => point,
            None => return false,
        };

        let mut r_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&signature.0[..32]);
        let mut s_bytes = [0u8; 32];
        s_bytes.copy_from_slice(&signature.0[32..]);

        // S outside the canonical scalar range is rejected before any
        // curve arithmetic.
        let s = match Option::<Scalar>::from(Scalar::from_canonical_bytes(s_bytes)) {
            Some(scalar) => scalar,
            None => return false,
        };

        let r = match CompressedEdwardsY(r_bytes).decompress() {
            Some(point) => point,
            None => return false,
        };

        let h = Scalar::from_bytes_mod_order_wide(&blake2b512(&[&r_bytes, &self.0, message]));

        // Point equality, not byte comparison of intermediate scalars.
        EdwardsPoint::mul_base(&s) == r + h * a
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = CryptoError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength(slice.len()))?;
        Ok(Self(arr))
    }
}

/// The Montgomery-form (X25519) encoding of a public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MontgomeryKey(pub [u8; 32]);

impl MontgomeryKey {
    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for MontgomeryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MontgomeryKey({})", &self.to_hex()[..16])
    }
}

/// A 64-byte signature, structurally `R || S`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = CryptoError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 64] = slice
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength(slice.len()))?;
        Ok(Self(arr))
    }
}

/// A signing keypair derived from a 32-byte seed.
///
/// The seed is the sole secret; everything here is recomputed from it and
/// never persisted separately.
#[derive(Clone)]
pub struct Keypair {
    /// Clamped lower half of Blake2b-512(seed), as a reduced scalar.
    scalar: Scalar,
    /// Raw clamped lower half, kept for the Diffie-Hellman conversion.
    clamped: [u8; 32],
    /// Upper half of Blake2b-512(seed), the deterministic nonce prefix.
    nonce_prefix: [u8; 32],
    public: PublicKey,
}

impl Keypair {
    /// Derive a keypair from a 32-byte seed.
    ///
    /// The seed is expanded with Blake2b-512; the lower 32 bytes are
    /// clamped into the private scalar, the upper 32 become the nonce
    /// prefix.
    pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
        if seed.len() != 32 {
            return Err(CryptoError::InvalidSeedLength(seed.len()));
        }

        let expanded = blake2b512(&[seed]);
        let mut lower = [0u8; 32];
        lower.copy_from_slice(&expanded[..32]);
        let mut nonce_prefix = [0u8; 32];
        nonce_prefix.copy_from_slice(&expanded[32..]);

        let clamped = clamp_integer(lower);
        let scalar = Scalar::from_bytes_mod_order(clamped);
        let public = PublicKey(EdwardsPoint::mul_base(&scalar).compress().to_bytes());

        Ok(Self {
            scalar,
            clamped,
            nonce_prefix,
            public,
        })
    }

    /// Get the public key.
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// The clamped private scalar bytes in the form the companion
    /// Diffie-Hellman curve expects as a secret key.
    pub fn montgomery_secret(&self) -> [u8; 32] {
        self.clamped
    }

    /// Sign a message.
    ///
    /// Deterministic: the nonce is Blake2b-512(nonce_prefix || message)
    /// wide-reduced, so identical inputs always produce identical
    /// signatures.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let r = Scalar::from_bytes_mod_order_wide(&blake2b512(&[&self.nonce_prefix, message]));
        let big_r = EdwardsPoint::mul_base(&r).compress();

        let h = Scalar::from_bytes_mod_order_wide(&blake2b512(&[
            big_r.as_bytes(),
            &self.public.0,
            message,
        ]));
        let s = r + h * self.scalar;

        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(big_r.as_bytes());
        bytes[32..].copy_from_slice(&s.to_bytes());
        Signature(bytes)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public)
    }
}
