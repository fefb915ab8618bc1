//! One-time secret generation and fingerprinting

mod codec;

pub use codec::{
    GeneratedToken, TokenCodec, FINGERPRINT_HEX_LEN, MAX_SECRET_BYTES, MAX_SECRET_LENGTH,
    MIN_SECRET_BYTES,
};
