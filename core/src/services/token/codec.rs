//! Token codec
//!
//! A verification secret is `secret_bytes` of OS randomness rendered as
//! URL-safe base64 without padding, so it can sit in a path segment as-is.
//! Storage only ever sees its fingerprint: the lowercase hex SHA-256 of the
//! secret's UTF-8 bytes.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::fmt;

/// Lower bound on secret entropy (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Upper bound on secret size; encodes to exactly [`MAX_SECRET_LENGTH`] chars
pub const MAX_SECRET_BYTES: usize = 384;

/// Length of a hex SHA-256 fingerprint
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Longest secret accepted for redemption; anything longer is rejected
/// before hashing
pub const MAX_SECRET_LENGTH: usize = 512;

/// A freshly generated secret together with its fingerprint
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedToken {
    /// Raw secret, only ever placed in the verification link
    pub secret: String,
    /// Hex SHA-256 of `secret`
    pub fingerprint: String,
}

impl fmt::Debug for GeneratedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedToken")
            .field("secret", &"[REDACTED]")
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// Generates secrets and derives their fingerprints
#[derive(Debug, Clone, Copy)]
pub struct TokenCodec {
    secret_bytes: usize,
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self {
            secret_bytes: MIN_SECRET_BYTES,
        }
    }
}

impl TokenCodec {
    /// Create a codec; sizes are clamped to
    /// [`MIN_SECRET_BYTES`]..=[`MAX_SECRET_BYTES`] so every secret it issues
    /// can be redeemed
    pub fn new(secret_bytes: usize) -> Self {
        Self {
            secret_bytes: secret_bytes.clamp(MIN_SECRET_BYTES, MAX_SECRET_BYTES),
        }
    }

    /// Length of the encoded secrets this codec issues
    pub fn secret_len(&self) -> usize {
        // Unpadded base64: 4 chars per 3 bytes, rounded up
        (self.secret_bytes * 4 + 2) / 3
    }

    /// Number of random bytes behind each secret
    pub fn secret_bytes(&self) -> usize {
        self.secret_bytes
    }

    /// Draw a new secret from the OS CSPRNG
    pub fn generate(&self) -> GeneratedToken {
        let mut bytes = vec![0u8; self.secret_bytes];
        OsRng.fill_bytes(&mut bytes);

        let secret = URL_SAFE_NO_PAD.encode(&bytes);
        let fingerprint = Self::fingerprint_of(&secret);

        GeneratedToken {
            secret,
            fingerprint,
        }
    }

    /// Deterministic one-way fingerprint of a secret
    pub fn fingerprint_of(secret: &str) -> String {
        hex::encode(Sha256::digest(secret.as_bytes()))
    }

    /// Constant-time check that `secret` hashes to `fingerprint`
    pub fn matches(secret: &str, fingerprint: &str) -> bool {
        let computed = Self::fingerprint_of(secret);
        constant_time_eq(computed.as_bytes(), fingerprint.as_bytes())
    }
}
