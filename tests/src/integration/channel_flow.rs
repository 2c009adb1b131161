//! # Channel Flow
//!
//! Relayed messages fetched from the streams channel, with confirmations.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{frame, Bridge};
    use risk_bridge::{
        decode, Address, AddressDerivation, BridgeConfig, BridgeError, ChannelStatus, ErrorKind,
        LendingPool, MessageId, MessageSource, RiskBridgeApi, TransportChannel,
    };

    #[test]
    fn test_initialize_channel_sets_status() {
        let mut b = Bridge::configured();
        assert_eq!(b.state.channel_status(), ChannelStatus::NoChannel);

        let channel = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"oracle-seed")
            .unwrap();

        assert_eq!(b.state.channel_status(), ChannelStatus::ChannelReady);
        assert_eq!(b.state.channel(), Some(&channel));
        assert_eq!(b.streams.get_channel_address(&channel), channel.address);
    }

    #[test]
    fn test_reinitialize_overwrites_channel() {
        let mut b = Bridge::configured();
        let first = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed-1")
            .unwrap();
        let second = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed-2")
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(b.state.channel(), Some(&second));
    }

    #[test]
    fn test_empty_seed_rejected() {
        let mut b = Bridge::configured();
        let err = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert_eq!(b.state.channel_status(), ChannelStatus::NoChannel);
    }

    #[test]
    fn test_channel_relay_applies_and_confirms() {
        let mut b = Bridge::configured();
        let channel = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed")
            .unwrap();
        let user = Address::new([0x2B; 32]);
        let payload = frame(user, 61, 1_700_000_100);
        let sig = b.sign(&payload);
        let id = b.streams.send_message(&channel, &payload).unwrap();

        let msg = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Channel(id), &sig)
            .unwrap();

        assert_eq!(msg.user_address, user);
        assert_eq!(b.pool.risk_score(&user), Some(61));

        let published = b.streams.messages(&channel);
        assert_eq!(published.len(), 2);
        let confirmation = decode(&published[1].payload, AddressDerivation::Direct).unwrap();
        assert_eq!(confirmation, msg);
    }

    #[test]
    fn test_channel_and_direct_paths_agree() {
        let mut b = Bridge::configured();
        let channel = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed")
            .unwrap();
        let payload = frame(Address::new([0x3C; 32]), 18, 99);
        let sig = b.sign(&payload);
        let id = b.streams.send_message(&channel, &payload).unwrap();

        let via_channel = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Channel(id), &sig)
            .unwrap();
        let direct = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Direct(payload), &sig)
            .unwrap();

        assert_eq!(via_channel, direct);
    }

    #[test]
    fn test_short_channel_payload_is_decode_error() {
        let mut b = Bridge::configured();
        let channel = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed")
            .unwrap();
        let payload = vec![0x01; 20];
        let sig = b.sign(&payload);
        let id = b.streams.send_message(&channel, &payload).unwrap();

        let err = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Channel(id), &sig)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(b.pool.update_calls(), 0);
    }

    #[test]
    fn test_missing_channel_and_message_are_lookup_errors() {
        let mut b = Bridge::configured();
        let id = MessageId([0x44; 32]);

        let err = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Channel(id), &[0u8; 64])
            .unwrap_err();
        assert_eq!(err, BridgeError::ChannelNotInitialized);

        b.service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed")
            .unwrap();
        let err = b
            .service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Channel(id), &[0u8; 64])
            .unwrap_err();
        assert_eq!(err, BridgeError::MessageNotFound(id));
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_confirmation_failure_does_not_undo_update() {
        let mut b = Bridge::configured();
        let channel = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed")
            .unwrap();
        let payload = frame(Address::ZERO, 45, 45);
        let sig = b.sign(&payload);
        let id = b.streams.send_message(&channel, &payload).unwrap();
        b.streams.set_fail_sends(true);

        b.service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Channel(id), &sig)
            .unwrap();

        assert_eq!(b.pool.risk_score(&Address::ZERO), Some(45));
        assert_eq!(b.events.len(), 1);
        assert_eq!(b.streams.messages(&channel).len(), 1);
    }

    #[test]
    fn test_confirmations_can_be_disabled() {
        let mut b = Bridge::deploy(BridgeConfig::default().with_send_confirmations(false));
        let key = b.oracle.public_key().as_bytes().to_vec();
        b.service
            .set_oracle_public_key(&mut b.state, &b.cap, key)
            .unwrap();
        let channel = b
            .service
            .initialize_streams_channel(&mut b.state, &b.cap, b"seed")
            .unwrap();
        let payload = frame(Address::ZERO, 2, 2);
        let sig = b.sign(&payload);

        b.service
            .process_risk_message(&mut b.state, &b.cap, MessageSource::Direct(payload), &sig)
            .unwrap();

        assert!(b.streams.messages(&channel).is_empty());
    }
}
