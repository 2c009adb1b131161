//! Fuzz target for frame decoding.
//!
//! ## Running
//!
//! ```bash
//! cd crates/risk-bridge
//! cargo +nightly fuzz run fuzz_decode_frame
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use risk_bridge::{decode, encode, AddressDerivation, BridgeError, FRAME_LEN};

fuzz_target!(|data: &[u8]| {
    for derivation in [AddressDerivation::Direct, AddressDerivation::Hashed] {
        match decode(data, derivation) {
            Ok(msg) => {
                assert!(data.len() >= FRAME_LEN);
                if derivation == AddressDerivation::Direct {
                    // Re-encoding reproduces the first frame exactly.
                    assert_eq!(&encode(&msg)[..], &data[..FRAME_LEN]);
                }
            }
            Err(BridgeError::Decode { expected, actual }) => {
                assert_eq!(expected, FRAME_LEN);
                assert_eq!(actual, data.len());
            }
            Err(e) => panic!("unexpected decode error: {e}"),
        }
    }
});
