//! # Bridge Errors
//!
//! Every failure aborts the current call before any state change (or, for
//! collaborator failures, before the event is emitted). None of them leave
//! the bridge unusable.

use super::capability::CapabilityId;
use super::value_objects::{AccountId, MessageId};
use thiserror::Error;

/// Coarse classification of bridge failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or foreign capability.
    Authorization,
    /// A verifier step rejected the payload.
    Signature,
    /// Undersized or malformed payload.
    Decode,
    /// Risk score outside `[0, 100]`.
    Range,
    /// Unresolvable channel, message or account.
    Lookup,
    /// An external collaborator failed.
    Collaborator,
    /// Invalid bridge configuration input.
    Configuration,
}

/// Errors returned by bridge operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The presented capability is not bound to this bridge.
    #[error("Unauthorized: capability {presented} is not the bridge admin capability")]
    Unauthorized {
        /// Identifier of the capability that was presented
        presented: CapabilityId,
    },

    /// A verifier step failed.
    #[error("Signature verification failed at step '{step}': {reason}")]
    Signature {
        /// Name of the failing verifier step
        step: &'static str,
        /// Human-readable cause
        reason: String,
    },

    /// Payload shorter than the fixed frame.
    #[error("Malformed payload: expected at least {expected} bytes, got {actual}")]
    Decode {
        /// Minimum frame length
        expected: usize,
        /// Received length
        actual: usize,
    },

    /// Decoded risk score exceeds the allowed maximum.
    #[error("Risk score {score} out of range [0, 100]")]
    RiskScoreOutOfRange {
        /// Offending score
        score: u8,
    },

    /// A channel-sourced message was requested but no channel is configured.
    #[error("Transport channel not initialized")]
    ChannelNotInitialized,

    /// The channel holds no message with this identifier.
    #[error("Message not found in channel: {0}")]
    MessageNotFound(MessageId),

    /// The lending pool does not know this account.
    #[error("Lending pool account not found: {0}")]
    AccountNotFound(AccountId),

    /// Oracle key rotation with an empty key.
    #[error("Oracle public key must not be empty")]
    InvalidOracleKey,

    /// The service was built without a collaborator this call needs.
    #[error("No {0} configured for this bridge service")]
    MissingCollaborator(&'static str),

    /// The lending pool rejected or failed the update.
    #[error("Lending pool error: {0}")]
    LendingPool(#[from] PoolError),

    /// The transport channel failed.
    #[error("Transport channel error: {0}")]
    Channel(ChannelError),

    /// The identity registry failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),
}

impl BridgeError {
    /// Map to the coarse error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::Signature { .. } => ErrorKind::Signature,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::RiskScoreOutOfRange { .. } => ErrorKind::Range,
            Self::ChannelNotInitialized | Self::MessageNotFound(_) | Self::AccountNotFound(_) => {
                ErrorKind::Lookup
            }
            Self::Channel(ChannelError::UnknownChannel(_)) => ErrorKind::Lookup,
            Self::LendingPool(PoolError::Unauthorized) => ErrorKind::Authorization,
            Self::LendingPool(_) | Self::Channel(_) | Self::Identity(_) => ErrorKind::Collaborator,
            Self::InvalidOracleKey | Self::MissingCollaborator(_) => ErrorKind::Configuration,
        }
    }
}

impl From<ChannelError> for BridgeError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::MessageNotFound(id) => Self::MessageNotFound(id),
            ChannelError::Malformed { expected, actual } => Self::Decode { expected, actual },
            other => Self::Channel(other),
        }
    }
}

/// Errors from the lending-pool collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// The pool does not accept this capability.
    #[error("Capability not accepted by lending pool")]
    Unauthorized,

    /// Score rejected by the pool's own bounds check.
    #[error("Invalid risk score: {0}")]
    InvalidScore(u8),

    /// The pool could not process the call.
    #[error("Lending pool unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the transport-channel collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// Channel creation requires a non-empty seed.
    #[error("Channel seed must not be empty")]
    EmptySeed,

    /// No channel at this address.
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// No message with this identifier.
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    /// Message payload too short for the accessor-based decode.
    #[error("Malformed message: expected at least {expected} bytes, got {actual}")]
    Malformed {
        /// Minimum frame length
        expected: usize,
        /// Received length
        actual: usize,
    },

    /// Sending failed.
    #[error("Send failed: {0}")]
    SendFailed(String),
}

/// Errors from the identity collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// A DID needs at least one verification method.
    #[error("DID requires at least one verification method")]
    NoVerificationMethods,

    /// The DID is not registered.
    #[error("Unknown DID: {0}")]
    UnknownDid(String),
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Configuration key
        key: &'static str,
        /// Raw value
        value: String,
    },
}
