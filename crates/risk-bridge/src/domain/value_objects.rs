//! # Domain Value Objects
//!
//! Immutable value types shared by the bridge, its codec and adapters.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ConfigError;

/// Length of a native ledger address in bytes.
pub const ADDRESS_LEN: usize = 32;

/// Highest risk score the lending pool accepts.
pub const MAX_RISK_SCORE: u8 = 100;

/// Native settlement-layer address (32 bytes).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Convert a 256-bit unsigned integer into an address (big-endian).
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }

    /// Interpret the address as a 256-bit unsigned integer (big-endian).
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

// Indexers read addresses as `0x`-prefixed hex strings.
impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(digits).map_err(serde::de::Error::custom)?;
        let array: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("invalid address length"))?;
        Ok(Self(array))
    }
}

/// How the 32 address bytes of a frame become a native address.
///
/// Chosen once in configuration; the codec never switches strategy at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressDerivation {
    /// Two big-endian u128 halves combined into a U256 and converted to an
    /// address. Invertible.
    #[default]
    Direct,
    /// SHA3-256 of the raw 32 bytes. One-way.
    Hashed,
}

impl AddressDerivation {
    /// Whether `encode` followed by `decode` reproduces the address.
    pub fn is_invertible(&self) -> bool {
        matches!(self, Self::Direct)
    }
}

impl fmt::Display for AddressDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Hashed => f.write_str("hashed"),
        }
    }
}

impl FromStr for AddressDerivation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "u256" => Ok(Self::Direct),
            "hashed" | "hash" => Ok(Self::Hashed),
            other => Err(ConfigError::InvalidValue {
                key: "address_derivation",
                value: other.to_string(),
            }),
        }
    }
}

/// Origin tag carried by every processed event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    /// Oracle-signed message relayed from the execution layer.
    #[serde(rename = "L2")]
    L2,
    /// Direct admin submission on the settlement layer.
    #[serde(rename = "IOTA")]
    Iota,
}

impl EventSource {
    /// Wire/indexer representation of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L2 => "L2",
            Self::Iota => "IOTA",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Oracle configuration axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleStatus {
    /// No key set; every signature check fails.
    Unconfigured,
    /// A key is set (possibly rotated).
    Configured,
}

/// Transport channel axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelStatus {
    /// No channel reference held.
    NoChannel,
    /// A channel reference is held.
    ChannelReady,
}

/// Identity axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityStatus {
    /// No identity descriptor; only the oracle signature is checked.
    NoIdentity,
    /// Identity descriptor present; the identity check is mandatory.
    IdentityReady,
}

/// Lending-pool account handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account#{}", self.0)
    }
}

/// Transport-channel message identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub [u8; 32]);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", hex::encode(&self.0[..8]))
    }
}
