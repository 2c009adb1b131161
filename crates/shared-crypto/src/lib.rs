//! # Shared Crypto - Oracle Signature Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Default oracle signatures, DID verification methods |
//! | `ecdsa` | secp256k1 | Oracles holding Ethereum-style keys |
//! | `scheme` | - | Configuration-time scheme selection |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, strict verification
//! - **secp256k1**: RFC 6979 deterministic, low-S only (EIP-2)
//! - Raw-byte entry points fail closed on malformed keys or signatures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod scheme;
pub mod signatures;

// Re-exports
pub use ecdsa::{verify_secp256k1, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use scheme::SignatureScheme;
pub use signatures::{verify_ed25519, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
