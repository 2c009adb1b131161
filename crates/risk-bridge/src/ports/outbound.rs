//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the bridge calls but does not own. All calls are
//! synchronous: a bridge operation runs to completion inside one ledger
//! transaction.

use crate::domain::{
    AccountId, AddressDerivation, AdminCapability, Address, ChannelError, ChannelMessage,
    ChannelRef, IdentityDescriptor, IdentityError, MessageId, PoolError, ProcessedEvent,
    RiskScoreMessage, VerificationMethod,
};
use std::sync::Arc;

/// Asymmetric signature check over raw bytes.
pub trait SignaturePrimitive: Send + Sync {
    /// `true` iff `signature` is valid for `message` under `public_key`.
    fn verify_signature(&self, signature: &[u8], public_key: &[u8], message: &[u8]) -> bool;
}

/// Lending pool that owns user risk scores.
pub trait LendingPool: Send + Sync {
    /// Set the risk score of `user`.
    ///
    /// # Errors
    /// * `PoolError::Unauthorized` - capability not accepted by the pool
    /// * `PoolError::Unavailable` - pool could not process the call
    fn update_risk_score(
        &self,
        cap: &AdminCapability,
        user: &Address,
        score: u8,
    ) -> Result<(), PoolError>;

    /// Owner address of a pool account.
    fn get_user_address(&self, account: &AccountId) -> Option<Address>;

    /// Current score of `user`, if one was ever set.
    fn risk_score(&self, user: &Address) -> Option<u8>;
}

/// Decentralized identity registry used for the secondary check.
pub trait IdentityRegistry: Send + Sync {
    /// Register a DID controlled by `controller`.
    fn create_did(
        &self,
        controller: &Address,
        methods: Vec<VerificationMethod>,
    ) -> Result<IdentityDescriptor, IdentityError>;

    /// `true` iff `signature` over `payload` verifies under one of `methods`
    /// of the live DID document `did`.
    fn verify_signature(
        &self,
        did: &str,
        methods: &[VerificationMethod],
        payload: &[u8],
        signature: &[u8],
    ) -> bool;
}

/// Streams-style transport channel between the layers.
pub trait TransportChannel: Send + Sync {
    /// Create (or reset) a channel derived from `seed`.
    fn create_channel(&self, seed: &[u8]) -> Result<ChannelRef, ChannelError>;

    /// Fetch a published message.
    fn fetch_message(
        &self,
        channel: &ChannelRef,
        id: &MessageId,
    ) -> Result<ChannelMessage, ChannelError>;

    /// Unwrap a message to its raw payload bytes.
    fn get_message_payload(&self, message: &ChannelMessage) -> Vec<u8> {
        message.payload.clone()
    }

    /// Decode a message through the channel's field accessors.
    ///
    /// Must agree with the frame codec for every payload.
    fn decode_message(
        &self,
        message: &ChannelMessage,
        derivation: AddressDerivation,
    ) -> Result<RiskScoreMessage, ChannelError>;

    /// Publish `payload` on `channel`.
    fn send_message(&self, channel: &ChannelRef, payload: &[u8])
        -> Result<MessageId, ChannelError>;

    /// Public address of the channel.
    fn get_channel_address(&self, channel: &ChannelRef) -> String {
        channel.address.clone()
    }
}

/// Consumer of processed-update audit events.
pub trait EventSink: Send + Sync {
    /// Record one event.
    fn emit(&self, event: ProcessedEvent);
}

impl<T: SignaturePrimitive + ?Sized> SignaturePrimitive for Arc<T> {
    fn verify_signature(&self, signature: &[u8], public_key: &[u8], message: &[u8]) -> bool {
        (**self).verify_signature(signature, public_key, message)
    }
}

impl<T: LendingPool + ?Sized> LendingPool for Arc<T> {
    fn update_risk_score(
        &self,
        cap: &AdminCapability,
        user: &Address,
        score: u8,
    ) -> Result<(), PoolError> {
        (**self).update_risk_score(cap, user, score)
    }

    fn get_user_address(&self, account: &AccountId) -> Option<Address> {
        (**self).get_user_address(account)
    }

    fn risk_score(&self, user: &Address) -> Option<u8> {
        (**self).risk_score(user)
    }
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: ProcessedEvent) {
        (**self).emit(event)
    }
}
