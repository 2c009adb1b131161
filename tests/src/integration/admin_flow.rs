//! # Admin Flow
//!
//! Capability handling, the admin bypass path and oracle key management.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{frame, Bridge, DEPLOYER};
    use risk_bridge::{
        AccountId, Address, BridgeConfig, BridgeError, BridgeState, ErrorKind, EventSource,
        LendingPool, MessageSource, OracleStatus, RiskBridgeApi,
    };
    use shared_crypto::Ed25519KeyPair;

    #[test]
    fn test_admin_bypass_for_every_valid_score_without_oracle() {
        let mut b = Bridge::deploy(BridgeConfig::default());
        assert_eq!(b.state.oracle_status(), OracleStatus::Unconfigured);
        let user = Address::new([0x11; 32]);

        for score in 0..=100u8 {
            b.service
                .submit_risk_update(&mut b.state, &b.cap, user, score, score as u64)
                .unwrap();
            assert_eq!(b.pool.risk_score(&user), Some(score));
        }

        assert_eq!(b.events.events_from(EventSource::Iota).len(), 101);
        assert!(b.events.events_from(EventSource::L2).is_empty());
    }

    #[test]
    fn test_admin_bypass_rejects_out_of_range() {
        let mut b = Bridge::deploy(BridgeConfig::default());
        for score in [101u8, 150, 255] {
            let err = b
                .service
                .submit_risk_update(&mut b.state, &b.cap, Address::ZERO, score, 1)
                .unwrap_err();
            assert_eq!(err, BridgeError::RiskScoreOutOfRange { score });
        }
        assert_eq!(b.pool.update_calls(), 0);
    }

    #[test]
    fn test_foreign_capability_is_authorization_error() {
        let mut b = Bridge::configured();
        let (_other_state, foreign) = BridgeState::initialize(DEPLOYER);

        let err = b
            .service
            .submit_risk_update(&mut b.state, &foreign, Address::ZERO, 1, 1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let payload = frame(Address::ZERO, 1, 1);
        let sig = b.sign(&payload);
        let err = b
            .service
            .process_risk_message(&mut b.state, &foreign, MessageSource::Direct(payload), &sig)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        assert_eq!(b.pool.update_calls(), 0);
        assert!(b.events.is_empty());
    }

    #[test]
    fn test_transferred_capability_keeps_authority() {
        let Bridge {
            mut state,
            cap,
            pool,
            service,
            ..
        } = Bridge::configured();
        let new_holder = Address::new([0x77; 32]);

        let cap = cap.transfer(new_holder);

        assert_eq!(cap.holder(), &new_holder);
        service
            .submit_risk_update(&mut state, &cap, Address::ZERO, 5, 5)
            .unwrap();
        assert_eq!(pool.risk_score(&Address::ZERO), Some(5));
        assert_eq!(state.admin(), &DEPLOYER);
    }

    #[test]
    fn test_oracle_rotation_invalidates_old_key() {
        let mut b = Bridge::configured();
        let payload = frame(Address::ZERO, 33, 3);
        let old_sig = b.sign(&payload);

        let new_oracle = Ed25519KeyPair::from_seed([0x99; 32]);
        b.service
            .set_oracle_public_key(
                &mut b.state,
                &b.cap,
                new_oracle.public_key().as_bytes().to_vec(),
            )
            .unwrap();

        let err = b
            .service
            .process_risk_message(
                &mut b.state,
                &b.cap,
                MessageSource::Direct(payload.clone()),
                &old_sig,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signature);

        let new_sig = new_oracle.sign(&payload);
        b.service
            .process_risk_message(
                &mut b.state,
                &b.cap,
                MessageSource::Direct(payload),
                new_sig.as_bytes(),
            )
            .unwrap();
        assert_eq!(b.pool.risk_score(&Address::ZERO), Some(33));
    }

    #[test]
    fn test_empty_oracle_key_is_configuration_error() {
        let mut b = Bridge::deploy(BridgeConfig::default());
        let err = b
            .service
            .set_oracle_public_key(&mut b.state, &b.cap, Vec::new())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(b.state.oracle_status(), OracleStatus::Unconfigured);
    }

    #[test]
    fn test_account_path_resolves_owner() {
        let mut b = Bridge::configured();
        let owner = Address::new([0xA1; 32]);
        b.pool.open_account(AccountId(42), owner);

        let resolved = b
            .service
            .submit_risk_update_for_account(&mut b.state, &b.cap, AccountId(42), 70, 1)
            .unwrap();
        assert_eq!(resolved, owner);
        assert_eq!(b.pool.risk_score(&owner), Some(70));

        let err = b
            .service
            .submit_risk_update_for_account(&mut b.state, &b.cap, AccountId(43), 70, 1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert_eq!(b.events.len(), 1);
    }

    #[test]
    fn test_pool_outage_is_atomic() {
        let mut b = Bridge::configured();
        b.service
            .submit_risk_update(&mut b.state, &b.cap, Address::ZERO, 10, 10)
            .unwrap();
        b.pool.set_unavailable(true);

        let err = b
            .service
            .submit_risk_update(&mut b.state, &b.cap, Address::ZERO, 20, 20)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert_eq!(b.pool.risk_score(&Address::ZERO), Some(10));
        assert_eq!(b.state.last_update(), 10);
        assert_eq!(b.events.len(), 1);
    }
}
