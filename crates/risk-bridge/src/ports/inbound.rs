//! # Inbound Port - RiskBridgeApi
//!
//! Driving port exposing the bridge operations.
//!
//! ## Authorization
//!
//! | Method | Capability required |
//! |--------|---------------------|
//! | `process_risk_message` | yes |
//! | `submit_risk_update` | yes |
//! | `submit_risk_update_for_account` | yes |
//! | `set_oracle_public_key` | yes |
//! | `initialize_streams_channel` | yes |
//! | `initialize_identity` | yes |
//! | `verify_payload` / `decode_payload` | no (read-only) |

use crate::domain::{
    AccountId, Address, AdminCapability, BridgeError, BridgeState, ChannelRef,
    IdentityDescriptor, MessageSource, RiskScoreMessage, VerificationMethod,
};

/// Primary API of the risk bridge.
///
/// State is passed explicitly as `&mut BridgeState`; the service itself only
/// holds collaborators and configuration.
///
/// # Example
///
/// ```rust,ignore
/// use risk_bridge::ports::RiskBridgeApi;
///
/// fn relay(bridge: &impl RiskBridgeApi, state: &mut BridgeState, cap: &AdminCapability,
///          frame: Vec<u8>, sig: &[u8]) {
///     let msg = bridge
///         .process_risk_message(state, cap, MessageSource::Direct(frame), sig)
///         .unwrap();
///     println!("score {} applied", msg.risk_score);
/// }
/// ```
pub trait RiskBridgeApi {
    /// Relay an oracle-signed payload: verify, decode, range-check, apply,
    /// optionally confirm, emit `"L2"`.
    ///
    /// # Errors
    /// - `Unauthorized`: foreign capability
    /// - `ChannelNotInitialized` / `MessageNotFound`: payload cannot be obtained
    /// - `Signature`: a verifier step rejected the payload
    /// - `Decode`: payload shorter than one frame
    /// - `RiskScoreOutOfRange`: score above 100
    /// - `LendingPool`: pool rejected the update
    fn process_risk_message(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        source: MessageSource,
        signature: &[u8],
    ) -> Result<RiskScoreMessage, BridgeError>;

    /// Admin bypass: apply an update without signature verification and emit
    /// `"IOTA"`.
    fn submit_risk_update(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        user: Address,
        risk_score: u8,
        timestamp: u64,
    ) -> Result<(), BridgeError>;

    /// Admin bypass addressed by pool account. Returns the resolved address.
    ///
    /// # Errors
    /// - `AccountNotFound`: the pool does not know `account`
    fn submit_risk_update_for_account(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        account: AccountId,
        risk_score: u8,
        timestamp: u64,
    ) -> Result<Address, BridgeError>;

    /// Set or rotate the oracle key.
    fn set_oracle_public_key(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        key: Vec<u8>,
    ) -> Result<(), BridgeError>;

    /// Create a transport channel from `seed` and store its reference.
    fn initialize_streams_channel(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        seed: &[u8],
    ) -> Result<ChannelRef, BridgeError>;

    /// Register a DID and store its descriptor.
    fn initialize_identity(
        &self,
        state: &mut BridgeState,
        cap: &AdminCapability,
        controller: Address,
        methods: Vec<VerificationMethod>,
    ) -> Result<IdentityDescriptor, BridgeError>;

    /// Run the verifier pipeline without touching state.
    fn verify_payload(
        &self,
        state: &BridgeState,
        payload: &[u8],
        signature: &[u8],
    ) -> Result<(), BridgeError>;

    /// Decode with the configured address derivation.
    fn decode_payload(&self, payload: &[u8]) -> Result<RiskScoreMessage, BridgeError>;
}
