//! Shared bridge harness for integration flows.

use risk_bridge::{
    encode, Address, AdminCapability, BridgeConfig, BridgeState, EventLog, InMemoryDidRegistry,
    InMemoryLendingPool, InMemoryStreamsChannel, RiskBridgeApi, RiskBridgeService,
    RiskScoreMessage,
};
use bridge_telemetry::{init_telemetry, TelemetryConfig};
use shared_crypto::Ed25519KeyPair;
use std::sync::{Arc, Once};

static LOGGING: Once = Once::new();

/// Install the bridge subscriber once per test binary.
///
/// Silent unless `RB_LOG_LEVEL` is set.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let mut config = TelemetryConfig::from_env();
        if std::env::var("RB_LOG_LEVEL").is_err() {
            config = config.with_log_level("off");
        }
        // Another test harness may already own the global subscriber.
        let _ = init_telemetry(&config);
    });
}

/// Service type used by every flow.
pub type TestService = RiskBridgeService<Arc<InMemoryLendingPool>, Arc<EventLog>>;

/// Deployed bridge with in-memory collaborators.
pub struct Bridge {
    pub state: BridgeState,
    pub cap: AdminCapability,
    pub oracle: Ed25519KeyPair,
    pub pool: Arc<InMemoryLendingPool>,
    pub events: Arc<EventLog>,
    pub streams: Arc<InMemoryStreamsChannel>,
    pub dids: Arc<InMemoryDidRegistry>,
    pub service: TestService,
}

/// Deployer address used by the fixtures.
pub const DEPLOYER: Address = Address::new([0xDE; 32]);

impl Bridge {
    /// Deploy without configuring the oracle.
    pub fn deploy(config: BridgeConfig) -> Self {
        init_test_logging();
        let (state, cap) = BridgeState::initialize(DEPLOYER);
        let pool = Arc::new(InMemoryLendingPool::new(state.admin_cap_id()));
        let events = Arc::new(EventLog::new());
        let streams = Arc::new(InMemoryStreamsChannel::new());
        let dids = Arc::new(InMemoryDidRegistry::new());
        let service = RiskBridgeService::new(config, pool.clone(), events.clone())
            .with_channel(streams.clone())
            .with_identity_registry(dids.clone());

        Self {
            state,
            cap,
            oracle: Ed25519KeyPair::from_seed([0x0C; 32]),
            pool,
            events,
            streams,
            dids,
            service,
        }
    }

    /// Deploy with the default config and the fixture oracle configured.
    pub fn configured() -> Self {
        let mut bridge = Self::deploy(BridgeConfig::default());
        let key = bridge.oracle.public_key().as_bytes().to_vec();
        bridge
            .service
            .set_oracle_public_key(&mut bridge.state, &bridge.cap, key)
            .expect("oracle key");
        bridge
    }

    /// Oracle signature over `payload`.
    pub fn sign(&self, payload: &[u8]) -> Vec<u8> {
        self.oracle.sign(payload).as_bytes().to_vec()
    }
}

/// 41-byte frame for `(address, score, timestamp)`.
pub fn frame(address: Address, score: u8, timestamp: u64) -> Vec<u8> {
    encode(&RiskScoreMessage::new(address, score, timestamp)).to_vec()
}
