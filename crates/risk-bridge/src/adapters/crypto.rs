//! Signature Primitive Adapter
//!
//! Implements `SignaturePrimitive` over `shared-crypto` for one configured
//! scheme.

use crate::ports::outbound::SignaturePrimitive;
use shared_crypto::SignatureScheme;

/// Signature primitive bound to a single scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchemePrimitive {
    scheme: SignatureScheme,
}

impl SchemePrimitive {
    /// Create a primitive for `scheme`.
    pub fn new(scheme: SignatureScheme) -> Self {
        Self { scheme }
    }

    /// Configured scheme.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }
}

impl SignaturePrimitive for SchemePrimitive {
    fn verify_signature(&self, signature: &[u8], public_key: &[u8], message: &[u8]) -> bool {
        self.scheme.verify(signature, public_key, message)
    }
}
