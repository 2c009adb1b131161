//! # Verifier Pipeline
//!
//! An ordered list of verification steps with conjunction semantics: the
//! first failing step rejects the payload and later steps never run.
//!
//! The oracle-signature step is always present. The identity step is added
//! when the bridge holds an identity descriptor, and rejects every payload if
//! no identity registry is available to check it.

use crate::domain::{BridgeError, BridgeState, IdentityDescriptor};
use crate::ports::outbound::{IdentityRegistry, SignaturePrimitive};
use shared_crypto::SignatureScheme;
use tracing::debug;

/// One verification step.
pub trait VerifierStep {
    /// Stable step name, reported in [`BridgeError::Signature`].
    fn name(&self) -> &'static str;

    /// Accept or reject `(payload, signature)`.
    fn verify(&self, payload: &[u8], signature: &[u8]) -> Result<(), BridgeError>;
}

/// Checks the oracle signature under the configured key.
pub struct OracleSignatureStep<'a> {
    primitive: &'a dyn SignaturePrimitive,
    public_key: &'a [u8],
}

impl<'a> OracleSignatureStep<'a> {
    /// Step name.
    pub const NAME: &'static str = "oracle-signature";

    /// Create the step over `public_key`.
    pub fn new(primitive: &'a dyn SignaturePrimitive, public_key: &'a [u8]) -> Self {
        Self {
            primitive,
            public_key,
        }
    }
}

impl VerifierStep for OracleSignatureStep<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> Result<(), BridgeError> {
        // An unconfigured key never verifies.
        if self.public_key.is_empty() {
            return Err(BridgeError::Signature {
                step: Self::NAME,
                reason: "oracle public key not configured".into(),
            });
        }
        if !self
            .primitive
            .verify_signature(signature, self.public_key, payload)
        {
            return Err(BridgeError::Signature {
                step: Self::NAME,
                reason: "signature does not match oracle key".into(),
            });
        }
        Ok(())
    }
}

/// Checks the signature against the bridge's DID verification methods.
pub struct IdentityStep<'a> {
    registry: Option<&'a dyn IdentityRegistry>,
    descriptor: &'a IdentityDescriptor,
}

impl<'a> IdentityStep<'a> {
    /// Step name.
    pub const NAME: &'static str = "identity";

    /// Create the step for `descriptor`.
    pub fn new(registry: &'a dyn IdentityRegistry, descriptor: &'a IdentityDescriptor) -> Self {
        Self {
            registry: Some(registry),
            descriptor,
        }
    }

    /// Step for a descriptor with no registry to resolve it. Rejects everything.
    pub fn unavailable(descriptor: &'a IdentityDescriptor) -> Self {
        Self {
            registry: None,
            descriptor,
        }
    }
}

impl VerifierStep for IdentityStep<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> Result<(), BridgeError> {
        let Some(registry) = self.registry else {
            return Err(BridgeError::Signature {
                step: Self::NAME,
                reason: format!("no identity registry to resolve {}", self.descriptor.did),
            });
        };
        let ok = registry.verify_signature(
            &self.descriptor.did,
            &self.descriptor.methods,
            payload,
            signature,
        );
        if !ok {
            return Err(BridgeError::Signature {
                step: Self::NAME,
                reason: format!("no verification method of {} accepted", self.descriptor.did),
            });
        }
        Ok(())
    }
}

/// Ordered verification steps.
#[derive(Default)]
pub struct VerifierPipeline<'a> {
    steps: Vec<Box<dyn VerifierStep + 'a>>,
}

impl<'a> VerifierPipeline<'a> {
    /// Empty pipeline. Accepts everything until a step is added.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub fn with_step(mut self, step: impl VerifierStep + 'a) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Pipeline for the current bridge configuration.
    ///
    /// A descriptor without a registry still gets an identity step, one that
    /// rejects every payload.
    pub fn for_state(
        state: &'a BridgeState,
        primitive: &'a dyn SignaturePrimitive,
        registry: Option<&'a dyn IdentityRegistry>,
    ) -> Self {
        let pipeline =
            Self::new().with_step(OracleSignatureStep::new(primitive, state.oracle_public_key()));
        match (state.identity(), registry) {
            (Some(descriptor), Some(registry)) => {
                pipeline.with_step(IdentityStep::new(registry, descriptor))
            }
            (Some(descriptor), None) => pipeline.with_step(IdentityStep::unavailable(descriptor)),
            (None, _) => pipeline,
        }
    }

    /// Run every step in order.
    ///
    /// # Errors
    /// The first failing step's [`BridgeError::Signature`].
    pub fn verify(&self, payload: &[u8], signature: &[u8]) -> Result<(), BridgeError> {
        for step in &self.steps {
            match step.verify(payload, signature) {
                Ok(()) => debug!(step = step.name(), "verifier step passed"),
                Err(e) => {
                    debug!(step = step.name(), error = %e, "verifier step rejected payload");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Names of the configured steps, in order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if no step is configured.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Stand-alone signature check: `signature` over `payload` under `key`.
///
/// Pure function of its inputs. An empty key is never accepted.
pub fn verify(payload: &[u8], signature: &[u8], key: &[u8], scheme: SignatureScheme) -> bool {
    !key.is_empty() && scheme.verify(signature, key, payload)
}
