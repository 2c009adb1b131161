//! Bridge configuration.
//!
//! Read from environment variables:
//!
//! | Variable | Default | Values |
//! |----------|---------|--------|
//! | `RB_ADDRESS_DERIVATION` | `direct` | `direct`, `hashed` |
//! | `RB_SIGNATURE_SCHEME` | `ed25519` | `ed25519`, `secp256k1` |
//! | `RB_SEND_CONFIRMATIONS` | `true` | boolean flag |

use crate::domain::{AddressDerivation, ConfigError};
use serde::{Deserialize, Serialize};
use shared_crypto::SignatureScheme;
use std::env;

/// Address derivation strategy.
pub const ENV_ADDRESS_DERIVATION: &str = "RB_ADDRESS_DERIVATION";
/// Oracle signature scheme.
pub const ENV_SIGNATURE_SCHEME: &str = "RB_SIGNATURE_SCHEME";
/// Send confirmations over the channel after a relayed update.
pub const ENV_SEND_CONFIRMATIONS: &str = "RB_SEND_CONFIRMATIONS";

/// Configuration fixed when the bridge service is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// How the 32 frame address bytes become a native address.
    pub address_derivation: AddressDerivation,

    /// Scheme of the oracle key.
    pub signature_scheme: SignatureScheme,

    /// Whether relayed updates are confirmed back over the channel.
    pub send_confirmations: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            address_derivation: AddressDerivation::Direct,
            signature_scheme: SignatureScheme::Ed25519,
            send_confirmations: true,
        }
    }
}

impl BridgeConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` for any unparseable variable.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`BridgeConfig::try_from_env`], falling back to defaults on error.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid bridge configuration, using defaults");
            Self::default()
        })
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let address_derivation = match lookup(ENV_ADDRESS_DERIVATION) {
            Some(v) => v.parse()?,
            None => defaults.address_derivation,
        };

        let signature_scheme = match lookup(ENV_SIGNATURE_SCHEME) {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "signature_scheme",
                value: v,
            })?,
            None => defaults.signature_scheme,
        };

        let send_confirmations = match lookup(ENV_SEND_CONFIRMATIONS) {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue {
                key: "send_confirmations",
                value: v,
            })?,
            None => defaults.send_confirmations,
        };

        Ok(Self {
            address_derivation,
            signature_scheme,
            send_confirmations,
        })
    }

    /// Set the address derivation.
    pub fn with_address_derivation(mut self, derivation: AddressDerivation) -> Self {
        self.address_derivation = derivation;
        self
    }

    /// Set the signature scheme.
    pub fn with_signature_scheme(mut self, scheme: SignatureScheme) -> Self {
        self.signature_scheme = scheme;
        self
    }

    /// Enable or disable confirmations.
    pub fn with_send_confirmations(mut self, send: bool) -> Self {
        self.send_confirmations = send;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
