//! Lending Pool Adapter
//!
//! In-memory `LendingPool` holding per-user risk scores and an account
//! directory. Accepts exactly one capability id, the bridge's.

use crate::domain::{AccountId, Address, AdminCapability, CapabilityId, PoolError, MAX_RISK_SCORE};
use crate::ports::outbound::LendingPool;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, warn};

/// In-memory lending pool for tests and local runs.
pub struct InMemoryLendingPool {
    /// Capability id the pool trusts.
    admin_cap: CapabilityId,
    scores: RwLock<HashMap<Address, u8>>,
    accounts: RwLock<HashMap<AccountId, Address>>,
    update_calls: AtomicUsize,
    /// When set, every update fails with `Unavailable`.
    unavailable: AtomicBool,
}

impl InMemoryLendingPool {
    /// Create a pool that accepts capability `admin_cap`.
    pub fn new(admin_cap: CapabilityId) -> Self {
        Self {
            admin_cap,
            scores: RwLock::new(HashMap::new()),
            accounts: RwLock::new(HashMap::new()),
            update_calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Register a pool account owned by `owner`.
    pub fn open_account(&self, account: AccountId, owner: Address) {
        self.accounts.write().insert(account, owner);
    }

    /// Number of `update_risk_score` calls that reached the pool.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent updates fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of all scores.
    pub fn scores(&self) -> HashMap<Address, u8> {
        self.scores.read().clone()
    }
}

impl LendingPool for InMemoryLendingPool {
    fn update_risk_score(
        &self,
        cap: &AdminCapability,
        user: &Address,
        score: u8,
    ) -> Result<(), PoolError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if cap.id() != self.admin_cap {
            warn!(presented = %cap.id(), "lending pool rejected capability");
            return Err(PoolError::Unauthorized);
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PoolError::Unavailable("pool paused".into()));
        }
        if score > MAX_RISK_SCORE {
            return Err(PoolError::InvalidScore(score));
        }

        debug!(user = %user, score, "lending pool score updated");
        self.scores.write().insert(*user, score);
        Ok(())
    }

    fn get_user_address(&self, account: &AccountId) -> Option<Address> {
        self.accounts.read().get(account).copied()
    }

    fn risk_score(&self, user: &Address) -> Option<u8> {
        self.scores.read().get(user).copied()
    }
}
