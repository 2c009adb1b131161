//! # Payload Codec
//!
//! Fixed-layout risk frame:
//!
//! ```text
//! offset  0..32   address representation (two big-endian u128 halves)
//! offset 32       risk score (u8)
//! offset 33..41   timestamp (big-endian u64)
//! ```
//!
//! Bytes past offset 41 are ignored. Range validation of the score is not the
//! codec's job; it runs afterwards in the applier.

use crate::domain::{
    invariant_frame_length, Address, AddressDerivation, BridgeError, RiskScoreMessage,
    ADDRESS_LEN, FRAME_LEN,
};
use primitive_types::U256;
use sha3::{Digest, Sha3_256};

/// Offset of the risk score byte.
pub const SCORE_OFFSET: usize = 32;

/// Offset of the big-endian timestamp.
pub const TIMESTAMP_OFFSET: usize = 33;

const HALF_LEN: usize = ADDRESS_LEN / 2;

/// Decode a frame into a risk-score message.
///
/// # Errors
/// * `BridgeError::Decode` - buffer shorter than [`FRAME_LEN`]
pub fn decode(bytes: &[u8], derivation: AddressDerivation) -> Result<RiskScoreMessage, BridgeError> {
    invariant_frame_length(bytes.len())?;

    let mut raw_address = [0u8; ADDRESS_LEN];
    raw_address.copy_from_slice(&bytes[..ADDRESS_LEN]);

    let mut timestamp = [0u8; 8];
    timestamp.copy_from_slice(&bytes[TIMESTAMP_OFFSET..FRAME_LEN]);

    Ok(RiskScoreMessage {
        user_address: derive_address(&raw_address, derivation),
        risk_score: bytes[SCORE_OFFSET],
        timestamp: u64::from_be_bytes(timestamp),
    })
}

/// Encode a message into a frame.
///
/// The address is written as its two big-endian halves, so decoding with
/// [`AddressDerivation::Direct`] reproduces the original tuple.
pub fn encode(message: &RiskScoreMessage) -> [u8; FRAME_LEN] {
    let (hi, lo) = split_address(&message.user_address);

    let mut frame = [0u8; FRAME_LEN];
    frame[..HALF_LEN].copy_from_slice(&hi.to_be_bytes());
    frame[HALF_LEN..ADDRESS_LEN].copy_from_slice(&lo.to_be_bytes());
    frame[SCORE_OFFSET] = message.risk_score;
    frame[TIMESTAMP_OFFSET..].copy_from_slice(&message.timestamp.to_be_bytes());
    frame
}

/// Turn the 32 raw address bytes of a frame into a native address.
pub fn derive_address(raw: &[u8; ADDRESS_LEN], derivation: AddressDerivation) -> Address {
    match derivation {
        AddressDerivation::Direct => {
            let (hi, lo) = read_halves(raw);
            address_from_halves(hi, lo)
        }
        AddressDerivation::Hashed => {
            let digest: [u8; ADDRESS_LEN] = Sha3_256::digest(raw).into();
            Address::new(digest)
        }
    }
}

/// Combine two u128 halves into an address via U256 (`hi << 128 | lo`).
pub fn address_from_halves(hi: u128, lo: u128) -> Address {
    // U256 limbs are little-endian u64 words.
    let value = U256([lo as u64, (lo >> 64) as u64, hi as u64, (hi >> 64) as u64]);
    Address::from_u256(value)
}

fn read_halves(raw: &[u8; ADDRESS_LEN]) -> (u128, u128) {
    let mut hi = [0u8; HALF_LEN];
    let mut lo = [0u8; HALF_LEN];
    hi.copy_from_slice(&raw[..HALF_LEN]);
    lo.copy_from_slice(&raw[HALF_LEN..]);
    (u128::from_be_bytes(hi), u128::from_be_bytes(lo))
}

fn split_address(address: &Address) -> (u128, u128) {
    read_halves(address.as_bytes())
}
