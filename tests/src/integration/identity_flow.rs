//! # Identity Flow
//!
//! Secondary DID verification on top of the oracle signature.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{frame, Bridge, TestService, DEPLOYER};
    use risk_bridge::{
        Address, AdminCapability, BridgeConfig, BridgeError, BridgeState, EventLog,
        IdentityDescriptor, IdentityRegistry, IdentityStatus, InMemoryLendingPool, LendingPool,
        MessageSource, RiskBridgeApi, RiskBridgeService, SignatureScheme, VerificationMethod,
    };
    use shared_crypto::Ed25519KeyPair;
    use std::sync::Arc;

    fn oracle_method(b: &Bridge) -> VerificationMethod {
        VerificationMethod::new(
            "#oracle-key-1",
            SignatureScheme::Ed25519,
            b.oracle.public_key().as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_initialize_identity() {
        let mut b = Bridge::configured();
        assert_eq!(b.state.identity_status(), IdentityStatus::NoIdentity);

        let method = oracle_method(&b);
        let descriptor = b
            .service
            .initialize_identity(&mut b.state, &b.cap, DEPLOYER, vec![method])
            .unwrap();

        assert_eq!(b.state.identity_status(), IdentityStatus::IdentityReady);
        assert_eq!(b.state.identity(), Some(&descriptor));
        assert_eq!(
            b.service.verifier(&b.state).step_names(),
            vec!["oracle-signature", "identity"]
        );
    }

    #[test]
    fn test_both_steps_must_pass() {
        let mut b = Bridge::configured();
        // DID bound to a different key than the oracle.
        let other = Ed25519KeyPair::from_seed([0x42; 32]);
        let method = VerificationMethod::new(
            "#other",
            SignatureScheme::Ed25519,
            other.public_key().as_bytes().to_vec(),
        );
        b.service
            .initialize_identity(&mut b.state, &b.cap, DEPLOYER, vec![method])
            .unwrap();
        let payload = frame(Address::ZERO, 8, 8);
        let sig = b.sign(&payload);

        let err = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Direct(payload), &sig)
            .unwrap_err();

        assert!(matches!(err, BridgeError::Signature { step: "identity", .. }));
        assert_eq!(b.pool.update_calls(), 0);
    }

    #[test]
    fn test_matching_did_allows_relay() {
        let mut b = Bridge::configured();
        let method = oracle_method(&b);
        b.service
            .initialize_identity(&mut b.state, &b.cap, DEPLOYER, vec![method])
            .unwrap();
        let payload = frame(Address::ZERO, 77, 7);
        let sig = b.sign(&payload);

        b.service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Direct(payload), &sig)
            .unwrap();

        assert_eq!(b.pool.risk_score(&Address::ZERO), Some(77));
    }

    #[test]
    fn test_deactivated_did_blocks_relay() {
        let mut b = Bridge::configured();
        let method = oracle_method(&b);
        let descriptor = b
            .service
            .initialize_identity(&mut b.state, &b.cap, DEPLOYER, vec![method])
            .unwrap();
        b.dids.deactivate(&descriptor.did).unwrap();
        let payload = frame(Address::ZERO, 1, 1);
        let sig = b.sign(&payload);

        let err = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Direct(payload), &sig)
            .unwrap_err();

        assert!(matches!(err, BridgeError::Signature { step: "identity", .. }));
    }

    /// Bridge deployed with its identity fixed at initialization. The DID
    /// lists `did_key`; the oracle is the fixture oracle.
    struct InitialIdentity {
        state: BridgeState,
        cap: AdminCapability,
        pool: Arc<InMemoryLendingPool>,
        events: Arc<EventLog>,
        service: TestService,
    }

    fn deploy_with_identity(
        b: &Bridge,
        did_key: &Ed25519KeyPair,
        registry: bool,
    ) -> InitialIdentity {
        let method = VerificationMethod::new(
            "#initial",
            SignatureScheme::Ed25519,
            did_key.public_key().as_bytes().to_vec(),
        );
        let descriptor: IdentityDescriptor = b.dids.create_did(&DEPLOYER, vec![method]).unwrap();

        let (mut state, cap) = BridgeState::initialize_with_identity(DEPLOYER, descriptor);
        let pool = Arc::new(InMemoryLendingPool::new(state.admin_cap_id()));
        let events = Arc::new(EventLog::new());
        let mut service =
            RiskBridgeService::new(BridgeConfig::default(), pool.clone(), events.clone());
        if registry {
            service = service.with_identity_registry(b.dids.clone());
        }
        service
            .set_oracle_public_key(&mut state, &cap, b.oracle.public_key().as_bytes().to_vec())
            .unwrap();

        InitialIdentity {
            state,
            cap,
            pool,
            events,
            service,
        }
    }

    #[test]
    fn test_identity_at_initialization_enforced() {
        let b = Bridge::configured();
        let mut d = deploy_with_identity(&b, &b.oracle, true);
        assert_eq!(d.state.identity_status(), IdentityStatus::IdentityReady);

        let payload = frame(Address::ZERO, 57, 1_700_000_000);
        let sig = b.sign(&payload);
        d.service
            .process_risk_message(&mut d.state, &d.cap, MessageSource::Direct(payload), &sig)
            .unwrap();

        assert_eq!(d.pool.risk_score(&Address::ZERO), Some(57));
        assert_eq!(d.events.len(), 1);
    }

    #[test]
    fn test_identity_at_initialization_rejects_unlisted_key() {
        let b = Bridge::configured();
        let other = Ed25519KeyPair::from_seed([0x43; 32]);
        let mut d = deploy_with_identity(&b, &other, true);

        let payload = frame(Address::ZERO, 57, 1_700_000_000);
        let sig = b.sign(&payload);
        let err = d
            .service
            .process_risk_message(&mut d.state, &d.cap, MessageSource::Direct(payload), &sig)
            .unwrap_err();

        assert!(matches!(err, BridgeError::Signature { step: "identity", .. }));
        assert_eq!(d.pool.risk_score(&Address::ZERO), None);
        assert!(d.events.is_empty());
    }

    #[test]
    fn test_identity_at_initialization_without_registry_rejects() {
        let b = Bridge::configured();
        let mut d = deploy_with_identity(&b, &b.oracle, false);
        assert_eq!(
            d.service.verifier(&d.state).step_names(),
            vec!["oracle-signature", "identity"]
        );

        let payload = frame(Address::ZERO, 57, 1_700_000_000);
        let sig = b.sign(&payload);
        let err = d
            .service
            .process_risk_message(&mut d.state, &d.cap, MessageSource::Direct(payload), &sig)
            .unwrap_err();

        assert!(matches!(err, BridgeError::Signature { step: "identity", .. }));
        assert_eq!(d.pool.update_calls(), 0);
        assert!(d.events.is_empty());
        assert_eq!(d.state.last_update(), 0);
    }

    #[test]
    fn test_identity_requires_methods() {
        let mut b = Bridge::configured();
        let err = b
            .service
            .initialize_identity(&mut b.state, &b.cap, DEPLOYER, vec![])
            .unwrap_err();

        assert!(matches!(err, BridgeError::Identity(_)));
        assert_eq!(b.state.identity_status(), IdentityStatus::NoIdentity);
    }
}
