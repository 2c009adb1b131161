//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: `RiskBridgeApi`
//! - **Outbound (Driven)**: lending pool, identity registry, transport
//!   channel, signature primitive, event sink

pub mod inbound;
pub mod outbound;

pub use inbound::RiskBridgeApi;
pub use outbound::{EventSink, IdentityRegistry, LendingPool, SignaturePrimitive, TransportChannel};
