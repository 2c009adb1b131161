//! Fuzz target for the relay path.
//!
//! Arbitrary payloads and signatures must never panic, and nothing may reach
//! the lending pool unless the payload was actually signed by the oracle.

#![no_main]

use libfuzzer_sys::fuzz_target;
use risk_bridge::{
    Address, BridgeConfig, BridgeState, EventLog, InMemoryLendingPool, MessageSource,
    RiskBridgeApi, RiskBridgeService,
};
use shared_crypto::Ed25519KeyPair;
use std::sync::Arc;

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    payload: Vec<u8>,
    signature: Vec<u8>,
    /// Sign the payload with the oracle key instead of using `signature`.
    sign: bool,
}

fuzz_target!(|input: FuzzInput| {
    let (mut state, cap) = BridgeState::initialize(Address::ZERO);
    let pool = Arc::new(InMemoryLendingPool::new(state.admin_cap_id()));
    let events = Arc::new(EventLog::new());
    let service = RiskBridgeService::new(BridgeConfig::default(), pool.clone(), events.clone());
    let oracle = Ed25519KeyPair::from_seed([7u8; 32]);
    service
        .set_oracle_public_key(&mut state, &cap, oracle.public_key().as_bytes().to_vec())
        .unwrap();

    let signature = if input.sign {
        oracle.sign(&input.payload).as_bytes().to_vec()
    } else {
        input.signature
    };

    let result = service.process_risk_message(
        &mut state,
        &cap,
        MessageSource::Direct(input.payload),
        &signature,
    );

    match result {
        Ok(msg) => {
            assert!(msg.risk_score <= 100);
            assert_eq!(events.len(), 1);
            assert_eq!(pool.update_calls(), 1);
        }
        Err(_) => {
            assert!(events.is_empty());
            assert_eq!(pool.update_calls(), 0);
        }
    }
});
