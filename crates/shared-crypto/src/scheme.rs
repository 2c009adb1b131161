//! # Signature Scheme Selection
//!
//! The bridge verifies oracle payloads with exactly one scheme, chosen at
//! configuration time.

use crate::ecdsa::verify_secp256k1;
use crate::signatures::verify_ed25519;
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asymmetric signature scheme used by the oracle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    /// Ed25519 over the raw message.
    #[default]
    Ed25519,
    /// ECDSA over secp256k1 with a SHA-256 digest.
    Secp256k1,
}

impl SignatureScheme {
    /// Expected public key length for this scheme.
    pub fn public_key_len(&self) -> usize {
        match self {
            Self::Ed25519 => crate::signatures::ED25519_PUBLIC_KEY_LEN,
            Self::Secp256k1 => crate::ecdsa::SECP256K1_PUBLIC_KEY_LEN,
        }
    }

    /// Verify `signature` over `message` under `public_key`.
    ///
    /// Returns `false` for any malformed input.
    pub fn verify(&self, signature: &[u8], public_key: &[u8], message: &[u8]) -> bool {
        match self {
            Self::Ed25519 => verify_ed25519(signature, public_key, message),
            Self::Secp256k1 => verify_secp256k1(signature, public_key, message),
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => f.write_str("ed25519"),
            Self::Secp256k1 => f.write_str("secp256k1"),
        }
    }
}

impl FromStr for SignatureScheme {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "secp256k1" | "ecdsa" => Ok(Self::Secp256k1),
            other => Err(CryptoError::UnknownScheme(other.to_string())),
        }
    }
}
