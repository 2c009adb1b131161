//! # Domain Entities
//!
//! Bridge state, the transient risk-score message and the audit event.

use super::capability::{AdminCapability, CapabilityId};
use super::errors::BridgeError;
use super::value_objects::{
    Address, ChannelStatus, EventSource, IdentityStatus, MessageId, OracleStatus,
};
use serde::{Deserialize, Serialize};
use shared_crypto::SignatureScheme;

/// A decoded risk-score update. Built fresh for every call, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScoreMessage {
    /// Account whose score changes.
    pub user_address: Address,
    /// Score attested by the oracle.
    pub risk_score: u8,
    /// Oracle timestamp (seconds).
    pub timestamp: u64,
}

impl RiskScoreMessage {
    /// Create a new message.
    pub fn new(user_address: Address, risk_score: u8, timestamp: u64) -> Self {
        Self {
            user_address,
            risk_score,
            timestamp,
        }
    }
}

/// Audit record of one committed update (`RiskScoreMessageProcessed`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedEvent {
    /// Account whose score changed.
    pub user_address: Address,
    /// Applied score.
    pub risk_score: u8,
    /// Timestamp carried by the update.
    pub timestamp: u64,
    /// Which entry path committed the update.
    pub source: EventSource,
}

impl ProcessedEvent {
    /// Event name seen by indexers.
    pub const NAME: &'static str = "RiskScoreMessageProcessed";

    /// Build the event for a committed message.
    pub fn from_message(message: &RiskScoreMessage, source: EventSource) -> Self {
        Self {
            user_address: message.user_address,
            risk_score: message.risk_score,
            timestamp: message.timestamp,
            source,
        }
    }
}

/// Reference to a transport channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef {
    /// Channel announcement address.
    pub address: String,
}

/// A message as stored by the transport channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelMessage {
    /// Identifier assigned by the channel.
    pub id: MessageId,
    /// Channel the message was published on.
    pub channel: ChannelRef,
    /// Position within the channel.
    pub sequence: u64,
    /// Raw payload bytes (the signed frame).
    pub payload: Vec<u8>,
}

/// One verification method of a DID document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// Fragment identifier, e.g. `#oracle-key-1`.
    pub id: String,
    /// Scheme the key belongs to.
    pub scheme: SignatureScheme,
    /// Raw public key bytes.
    pub public_key: Vec<u8>,
}

impl VerificationMethod {
    /// Create a new verification method.
    pub fn new(id: impl Into<String>, scheme: SignatureScheme, public_key: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            scheme,
            public_key,
        }
    }
}

/// Identity descriptor held by the bridge once a DID is established.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDescriptor {
    /// Decentralized identifier.
    pub did: String,
    /// DID controller.
    pub controller: Address,
    /// Methods the secondary check may use.
    pub methods: Vec<VerificationMethod>,
}

/// Where a relayed payload comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageSource {
    /// Payload passed inline.
    Direct(Vec<u8>),
    /// Payload fetched from the configured transport channel.
    Channel(MessageId),
}

/// Long-lived bridge configuration.
///
/// Created once by [`BridgeState::initialize`]. Every mutation needs the admin
/// capability minted alongside it. The state cannot be forked:
///
/// ```compile_fail
/// let (state, _cap) = risk_bridge::BridgeState::initialize(risk_bridge::Address::ZERO);
/// let _fork = state.clone();
/// ```
#[derive(Debug)]
pub struct BridgeState {
    admin_cap: CapabilityId,
    admin: Address,
    oracle_public_key: Vec<u8>,
    last_update: u64,
    channel: Option<ChannelRef>,
    identity: Option<IdentityDescriptor>,
}

impl BridgeState {
    /// Deploy a bridge and mint its admin capability.
    pub fn initialize(admin: Address) -> (Self, AdminCapability) {
        let cap = AdminCapability::mint(admin);
        let state = Self {
            admin_cap: cap.id(),
            admin,
            oracle_public_key: Vec::new(),
            last_update: 0,
            channel: None,
            identity: None,
        };
        (state, cap)
    }

    /// Deploy a bridge with an identity descriptor established up front.
    pub fn initialize_with_identity(
        admin: Address,
        identity: IdentityDescriptor,
    ) -> (Self, AdminCapability) {
        let (mut state, cap) = Self::initialize(admin);
        state.identity = Some(identity);
        (state, cap)
    }

    /// Reject capabilities not minted for this bridge.
    pub fn authorize(&self, cap: &AdminCapability) -> Result<(), BridgeError> {
        if cap.id() != self.admin_cap {
            return Err(BridgeError::Unauthorized {
                presented: cap.id(),
            });
        }
        Ok(())
    }

    /// Set or rotate the oracle key.
    pub fn set_oracle_public_key(
        &mut self,
        cap: &AdminCapability,
        key: Vec<u8>,
    ) -> Result<(), BridgeError> {
        self.authorize(cap)?;
        if key.is_empty() {
            return Err(BridgeError::InvalidOracleKey);
        }
        self.oracle_public_key = key;
        Ok(())
    }

    /// Store a channel reference, replacing any previous one.
    pub fn set_channel(
        &mut self,
        cap: &AdminCapability,
        channel: ChannelRef,
    ) -> Result<(), BridgeError> {
        self.authorize(cap)?;
        self.channel = Some(channel);
        Ok(())
    }

    /// Store an identity descriptor, replacing any previous one.
    pub fn set_identity(
        &mut self,
        cap: &AdminCapability,
        identity: IdentityDescriptor,
    ) -> Result<(), BridgeError> {
        self.authorize(cap)?;
        self.identity = Some(identity);
        Ok(())
    }

    pub(crate) fn record_update(&mut self, timestamp: u64) {
        self.last_update = timestamp;
    }

    /// Deployer address.
    pub fn admin(&self) -> &Address {
        &self.admin
    }

    /// Identifier of the capability this bridge accepts.
    pub fn admin_cap_id(&self) -> CapabilityId {
        self.admin_cap
    }

    /// Oracle key bytes; empty until configured.
    pub fn oracle_public_key(&self) -> &[u8] {
        &self.oracle_public_key
    }

    /// Timestamp of the last committed update (0 before the first).
    pub fn last_update(&self) -> u64 {
        self.last_update
    }

    /// Configured transport channel.
    pub fn channel(&self) -> Option<&ChannelRef> {
        self.channel.as_ref()
    }

    /// Configured identity descriptor.
    pub fn identity(&self) -> Option<&IdentityDescriptor> {
        self.identity.as_ref()
    }

    /// Oracle axis.
    pub fn oracle_status(&self) -> OracleStatus {
        if self.oracle_public_key.is_empty() {
            OracleStatus::Unconfigured
        } else {
            OracleStatus::Configured
        }
    }

    /// Channel axis.
    pub fn channel_status(&self) -> ChannelStatus {
        match self.channel {
            Some(_) => ChannelStatus::ChannelReady,
            None => ChannelStatus::NoChannel,
        }
    }

    /// Identity axis.
    pub fn identity_status(&self) -> IdentityStatus {
        match self.identity {
            Some(_) => IdentityStatus::IdentityReady,
            None => IdentityStatus::NoIdentity,
        }
    }
}
