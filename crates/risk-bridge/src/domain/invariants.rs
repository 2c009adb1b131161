//! # Domain Invariants
//!
//! Checks that run before any state mutation.

use super::errors::BridgeError;
use super::value_objects::MAX_RISK_SCORE;

/// Minimum wire frame length: 32 address bytes, 1 score byte, 8 timestamp bytes.
pub const FRAME_LEN: usize = 41;

/// Invariant: payload is at least one full frame.
pub fn invariant_frame_length(len: usize) -> Result<(), BridgeError> {
    if len < FRAME_LEN {
        return Err(BridgeError::Decode {
            expected: FRAME_LEN,
            actual: len,
        });
    }
    Ok(())
}

/// Invariant: risk score lies in `[0, 100]`.
///
/// Runs after decode and before the lending pool is touched.
pub fn invariant_risk_score_in_range(score: u8) -> Result<(), BridgeError> {
    if score > MAX_RISK_SCORE {
        return Err(BridgeError::RiskScoreOutOfRange { score });
    }
    Ok(())
}
