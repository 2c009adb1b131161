//! # Risk Bridge
//!
//! Relays oracle-attested risk-score updates from the execution layer into
//! the settlement layer's lending pool.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Authenticate oracle updates (Ed25519 or secp256k1, optional DID check)
//! - Decode the fixed 41-byte risk frame
//! - Apply validated scores through the lending pool, once per call
//! - Emit `RiskScoreMessageProcessed` audit events tagged `"L2"` or `"IOTA"`
//!
//! ## Security Properties
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | Admin-only mutation | Non-`Clone` `AdminCapability` checked by id |
//! | Fail-closed verification | Empty oracle key never verifies |
//! | Verify before decode | Pipeline runs over raw bytes first |
//! | Range before apply | Scores above 100 never reach the pool |
//!
//! ## Module Structure
//!
//! ```text
//! risk-bridge/
//! ├── domain/          # BridgeState, AdminCapability, messages, errors
//! ├── algorithms/      # Frame codec, verifier pipeline
//! ├── ports/           # RiskBridgeApi, LendingPool, TransportChannel, ...
//! ├── adapters/        # In-memory collaborators
//! ├── config.rs        # BridgeConfig (env)
//! └── service.rs       # RiskBridgeService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    EventLog, InMemoryDidRegistry, InMemoryLendingPool, InMemoryStreamsChannel, SchemePrimitive,
};
pub use algorithms::{decode, encode, verify, VerifierPipeline, VerifierStep};
pub use config::BridgeConfig;
pub use domain::{
    AccountId, Address, AddressDerivation, AdminCapability, BridgeError, BridgeState,
    CapabilityId, ChannelRef, ChannelStatus, ErrorKind, EventSource, IdentityDescriptor,
    IdentityStatus, MessageId, MessageSource, OracleStatus, ProcessedEvent, RiskScoreMessage,
    VerificationMethod, FRAME_LEN, MAX_RISK_SCORE,
};
pub use ports::{
    EventSink, IdentityRegistry, LendingPool, RiskBridgeApi, SignaturePrimitive, TransportChannel,
};
pub use service::RiskBridgeService;
pub use shared_crypto::SignatureScheme;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
