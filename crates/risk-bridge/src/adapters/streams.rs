//! Transport Channel Adapter
//!
//! In-memory Streams-style channel. Channel addresses are derived from the
//! seed; message ids commit to channel, sequence and payload.

use crate::algorithms::codec::{derive_address, SCORE_OFFSET, TIMESTAMP_OFFSET};
use crate::domain::{
    AddressDerivation, ChannelError, ChannelMessage, ChannelRef, MessageId, RiskScoreMessage,
    ADDRESS_LEN, FRAME_LEN,
};
use crate::ports::outbound::TransportChannel;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

const CHANNEL_DOMAIN: &[u8] = b"risk-bridge/streams-channel/v1";

/// In-memory transport channel.
#[derive(Default)]
pub struct InMemoryStreamsChannel {
    /// Channel address -> messages in publication order.
    channels: RwLock<HashMap<String, Vec<ChannelMessage>>>,
    /// When set, every send fails.
    fail_sends: AtomicBool,
}

impl InMemoryStreamsChannel {
    /// Create an empty channel registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with `SendFailed`.
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// All messages currently published on `channel`.
    pub fn messages(&self, channel: &ChannelRef) -> Vec<ChannelMessage> {
        self.channels
            .read()
            .get(&channel.address)
            .cloned()
            .unwrap_or_default()
    }
}

fn channel_address(seed: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(CHANNEL_DOMAIN);
    hasher.update(seed);
    hex::encode(hasher.finalize())
}

fn message_id(channel: &ChannelRef, sequence: u64, payload: &[u8]) -> MessageId {
    let mut hasher = Sha256::new();
    hasher.update(channel.address.as_bytes());
    hasher.update(sequence.to_be_bytes());
    hasher.update(payload);
    MessageId(hasher.finalize().into())
}

// Field accessors over a stored payload.

fn read_address_field(payload: &[u8]) -> Option<[u8; ADDRESS_LEN]> {
    payload.get(..ADDRESS_LEN)?.try_into().ok()
}

fn read_score_field(payload: &[u8]) -> Option<u8> {
    payload.get(SCORE_OFFSET).copied()
}

fn read_timestamp_field(payload: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = payload.get(TIMESTAMP_OFFSET..FRAME_LEN)?.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

impl TransportChannel for InMemoryStreamsChannel {
    fn create_channel(&self, seed: &[u8]) -> Result<ChannelRef, ChannelError> {
        if seed.is_empty() {
            return Err(ChannelError::EmptySeed);
        }
        let channel = ChannelRef {
            address: channel_address(seed),
        };
        // Re-announcing a channel starts it empty.
        self.channels
            .write()
            .insert(channel.address.clone(), Vec::new());

        info!(address = %channel.address, "streams channel created");
        Ok(channel)
    }

    fn fetch_message(
        &self,
        channel: &ChannelRef,
        id: &MessageId,
    ) -> Result<ChannelMessage, ChannelError> {
        let channels = self.channels.read();
        let messages = channels
            .get(&channel.address)
            .ok_or_else(|| ChannelError::UnknownChannel(channel.address.clone()))?;
        messages
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or(ChannelError::MessageNotFound(*id))
    }

    fn decode_message(
        &self,
        message: &ChannelMessage,
        derivation: AddressDerivation,
    ) -> Result<RiskScoreMessage, ChannelError> {
        let payload = &message.payload;
        let malformed = || ChannelError::Malformed {
            expected: FRAME_LEN,
            actual: payload.len(),
        };

        let raw_address = read_address_field(payload).ok_or_else(malformed)?;
        let risk_score = read_score_field(payload).ok_or_else(malformed)?;
        let timestamp = read_timestamp_field(payload).ok_or_else(malformed)?;

        Ok(RiskScoreMessage {
            user_address: derive_address(&raw_address, derivation),
            risk_score,
            timestamp,
        })
    }

    fn send_message(
        &self,
        channel: &ChannelRef,
        payload: &[u8],
    ) -> Result<MessageId, ChannelError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ChannelError::SendFailed("channel offline".into()));
        }

        let mut channels = self.channels.write();
        let messages = channels
            .get_mut(&channel.address)
            .ok_or_else(|| ChannelError::UnknownChannel(channel.address.clone()))?;

        let sequence = messages.len() as u64;
        let id = message_id(channel, sequence, payload);
        messages.push(ChannelMessage {
            id,
            channel: channel.clone(),
            sequence,
            payload: payload.to_vec(),
        });

        debug!(message = %id, sequence, len = payload.len(), "streams message published");
        Ok(id)
    }
}
