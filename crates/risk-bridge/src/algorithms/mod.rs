//! # Algorithms
//!
//! Pure transformation stages of the relay path.
//!
//! - `codec`: fixed-layout frame decode/encode and address derivation
//! - `verifier`: ordered signature verification pipeline

pub mod codec;
pub mod verifier;

pub use codec::{address_from_halves, decode, derive_address, encode};
pub use verifier::{verify, IdentityStep, OracleSignatureStep, VerifierPipeline, VerifierStep};
