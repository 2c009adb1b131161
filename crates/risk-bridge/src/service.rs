//! # Risk Bridge Service
//!
//! Application service implementing [`RiskBridgeApi`].
//!
//! ## Relay path
//!
//! ```text
//! obtain payload -> verifier pipeline -> decode -> range check -> pool
//!     -> (confirmation over channel) -> "L2" event
//! ```
//!
//! Every failure before the pool call leaves state untouched. A pool failure
//! leaves state untouched and emits nothing. A confirmation failure is only
//! logged: the update is already committed.

use crate::algorithms::codec;
use crate::algorithms::verifier::VerifierPipeline;
use crate::adapters::SchemePrimitive;
use crate::config::BridgeConfig;
use crate::domain::{
    invariant_risk_score_in_range, AccountId, Address, AdminCapability, BridgeError,
    BridgeState, ChannelMessage, ChannelRef, EventSource, IdentityDescriptor, MessageSource,
    ProcessedEvent, RiskScoreMessage, VerificationMethod,
};
use crate::ports::inbound::RiskBridgeApi;
use crate::ports::outbound::{
    EventSink, IdentityRegistry, LendingPool, SignaturePrimitive, TransportChannel,
};
use bridge_telemetry::{bridge_span, log_bridge_event, log_risk_update};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Payload as obtained from its source.
enum Obtained {
    Direct(Vec<u8>),
    Channel {
        message: ChannelMessage,
        payload: Vec<u8>,
    },
}

impl Obtained {
    /// Raw bytes the signature covers.
    fn payload(&self) -> &[u8] {
        match self {
            Obtained::Direct(bytes) => bytes,
            Obtained::Channel { payload, .. } => payload,
        }
    }
}

/// Risk bridge service.
///
/// Holds configuration and collaborators. Bridge state is passed to every
/// call explicitly.
pub struct RiskBridgeService<L: LendingPool, E: EventSink> {
    config: BridgeConfig,
    primitive: Box<dyn SignaturePrimitive>,
    pool: L,
    events: E,
    channel: Option<Arc<dyn TransportChannel>>,
    identity: Option<Arc<dyn IdentityRegistry>>,
}

impl<L: LendingPool, E: EventSink> RiskBridgeService<L, E> {
    /// Create a service. The signature primitive follows
    /// `config.signature_scheme`.
    pub fn new(config: BridgeConfig, pool: L, events: E) -> Self {
        Self {
            config,
            primitive: Box::new(SchemePrimitive::new(config.signature_scheme)),
            pool,
            events,
            channel: None,
            identity: None,
        }
    }

    /// Attach a transport channel collaborator.
    pub fn with_channel(mut self, channel: Arc<dyn TransportChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Attach an identity registry collaborator.
    pub fn with_identity_registry(mut self, registry: Arc<dyn IdentityRegistry>) -> Self {
        self.identity = Some(registry);
        self
    }

    /// Replace the signature primitive.
    pub fn with_primitive(mut self, primitive: impl SignaturePrimitive + 'static) -> Self {
        self.primitive = Box::new(primitive);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Lending pool collaborator.
    pub fn pool(&self) -> &L {
        &self.pool
    }

    /// Event sink collaborator.
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Verifier pipeline for the current state.
    pub fn verifier<'a>(&'a self, state: &'a BridgeState) -> VerifierPipeline<'a> {
        VerifierPipeline::for_state(state, &*self.primitive, self.identity.as_deref())
    }

    /// Apply a decoded update: range check, pool call, `last_update`.
    ///
    /// Emits nothing; callers emit after a successful apply.
    pub fn apply_update(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        message: &RiskScoreMessage,
    ) -> Result<(), BridgeError> {
        state.authorize(cap)?;
        invariant_risk_score_in_range(message.risk_score)?;

        self.pool
            .update_risk_score(cap, &message.user_address, message.risk_score)?;
        state.record_update(message.timestamp);
        Ok(())
    }

    fn channel_adapter(&self) -> Result<&dyn TransportChannel, BridgeError> {
        self.channel
            .as_deref()
            .ok_or(BridgeError::MissingCollaborator("transport channel"))
    }

    fn obtain(&self, state: &BridgeState, source: MessageSource) -> Result<Obtained, BridgeError> {
        match source {
            MessageSource::Direct(bytes) => Ok(Obtained::Direct(bytes)),
            MessageSource::Channel(id) => {
                let channel = state.channel().ok_or(BridgeError::ChannelNotInitialized)?;
                let adapter = self.channel_adapter()?;
                let message = adapter.fetch_message(channel, &id)?;
                let payload = adapter.get_message_payload(&message);
                Ok(Obtained::Channel { message, payload })
            }
        }
    }

    fn decode_obtained(&self, obtained: &Obtained) -> Result<RiskScoreMessage, BridgeError> {
        match obtained {
            Obtained::Direct(bytes) => codec::decode(bytes, self.config.address_derivation),
            Obtained::Channel { message, .. } => Ok(self
                .channel_adapter()?
                .decode_message(message, self.config.address_derivation)?),
        }
    }

    fn send_confirmation(&self, state: &BridgeState, message: &RiskScoreMessage) {
        if !self.config.send_confirmations {
            return;
        }
        let (Some(channel), Some(adapter)) = (state.channel(), self.channel.as_deref()) else {
            return;
        };

        match adapter.send_message(channel, &codec::encode(message)) {
            Ok(id) => debug!(message = %id, "confirmation sent"),
            Err(e) => log_bridge_event!(warn, "confirmation not sent", error = %e),
        }
    }

    fn relay(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        source: MessageSource,
        signature: &[u8],
    ) -> Result<RiskScoreMessage, BridgeError> {
        state.authorize(cap)?;

        let obtained = self.obtain(state, source)?;

        self.verifier(state).verify(obtained.payload(), signature)?;
        let message = self.decode_obtained(&obtained)?;

        self.apply_update(state, cap, &message)?;
        self.send_confirmation(state, &message);
        self.events
            .emit(ProcessedEvent::from_message(&message, EventSource::L2));

        Ok(message)
    }
}

impl<L: LendingPool, E: EventSink> RiskBridgeApi for RiskBridgeService<L, E> {
    fn process_risk_message(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        source: MessageSource,
        signature: &[u8],
    ) -> Result<RiskScoreMessage, BridgeError> {
        let via = match &source {
            MessageSource::Direct(_) => "direct",
            MessageSource::Channel(_) => "channel",
        };
        let _span = bridge_span!("relay_risk_message", source = via).entered();

        match self.relay(state, cap, source, signature) {
            Ok(message) => {
                log_risk_update!(
                    info,
                    "relayed risk update applied",
                    message.user_address,
                    message.risk_score,
                    EventSource::L2,
                    timestamp = message.timestamp
                );
                Ok(message)
            }
            Err(e) => {
                log_bridge_event!(warn, "relayed message rejected", error = %e, kind = ?e.kind());
                Err(e)
            }
        }
    }

    fn submit_risk_update(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        user: Address,
        risk_score: u8,
        timestamp: u64,
    ) -> Result<(), BridgeError> {
        let message = RiskScoreMessage::new(user, risk_score, timestamp);

        self.apply_update(state, cap, &message)?;
        self.events
            .emit(ProcessedEvent::from_message(&message, EventSource::Iota));

        log_risk_update!(
            info,
            "admin risk update applied",
            user,
            risk_score,
            EventSource::Iota,
            timestamp = timestamp
        );
        Ok(())
    }

    fn submit_risk_update_for_account(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        account: AccountId,
        risk_score: u8,
        timestamp: u64,
    ) -> Result<Address, BridgeError> {
        state.authorize(cap)?;
        let user = self
            .pool
            .get_user_address(&account)
            .ok_or(BridgeError::AccountNotFound(account))?;

        debug!(account = %account, user = %user, "pool account resolved");
        self.submit_risk_update(state, cap, user, risk_score, timestamp)?;
        Ok(user)
    }

    fn set_oracle_public_key(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        key: Vec<u8>,
    ) -> Result<(), BridgeError> {
        let expected = self.config.signature_scheme.public_key_len();
        if !key.is_empty() && key.len() != expected {
            // Accepted as-is; verification will simply fail.
            warn!(
                len = key.len(),
                expected,
                scheme = %self.config.signature_scheme,
                "oracle key length does not match configured scheme"
            );
        }
        state.set_oracle_public_key(cap, key)?;
        log_bridge_event!(info, "oracle public key set");
        Ok(())
    }

    fn initialize_streams_channel(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        seed: &[u8],
    ) -> Result<ChannelRef, BridgeError> {
        state.authorize(cap)?;
        let channel = self.channel_adapter()?.create_channel(seed)?;
        state.set_channel(cap, channel.clone())?;

        log_bridge_event!(info, "streams channel initialized", address = %channel.address);
        Ok(channel)
    }

    fn initialize_identity(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        controller: Address,
        methods: Vec<VerificationMethod>,
    ) -> Result<IdentityDescriptor, BridgeError> {
        state.authorize(cap)?;
        let registry = self
            .identity
            .as_deref()
            .ok_or(BridgeError::MissingCollaborator("identity registry"))?;

        let descriptor = registry.create_did(&controller, methods)?;
        state.set_identity(cap, descriptor.clone())?;

        info!(did = %descriptor.did, "bridge identity initialized");
        Ok(descriptor)
    }

    fn verify_payload(
        &self,
        state: &BridgeState,
        payload: &[u8],
        signature: &[u8],
    ) -> Result<(), BridgeError> {
        self.verifier(state).verify(payload, signature)
    }

    fn decode_payload(&self, payload: &[u8]) -> Result<RiskScoreMessage, BridgeError> {
        codec::decode(payload, self.config.address_derivation)
    }
}
