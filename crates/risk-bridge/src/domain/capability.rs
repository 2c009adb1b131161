//! # Admin Capability
//!
//! Unforgeable permission token. It is minted exactly once, together with the
//! bridge state it governs, and must be presented by reference to every
//! privileged operation.
//!
//! The type is neither `Clone` nor `Copy` and has no public constructor, so
//! holding one is proof of having received it from `BridgeState::initialize`
//! or from a previous holder via [`AdminCapability::transfer`].

use super::value_objects::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a minted capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityId(Uuid);

impl CapabilityId {
    /// Identifier that no minted capability carries.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Admin capability bound to one holder.
#[derive(Debug, PartialEq, Eq)]
pub struct AdminCapability {
    id: CapabilityId,
    holder: Address,
}

impl AdminCapability {
    pub(crate) fn mint(holder: Address) -> Self {
        Self {
            id: CapabilityId(Uuid::new_v4()),
            holder,
        }
    }

    /// Identifier shared by every transfer of this capability.
    pub fn id(&self) -> CapabilityId {
        self.id
    }

    /// Current holder.
    pub fn holder(&self) -> &Address {
        &self.holder
    }

    /// Hand the capability to a new holder. The id is preserved, so the
    /// bridge keeps accepting it.
    pub fn transfer(self, new_holder: Address) -> Self {
        Self {
            id: self.id,
            holder: new_holder,
        }
    }
}
