//! Identity Registry Adapter
//!
//! In-memory DID registry. Documents can be deactivated; a deactivated DID
//! never verifies.

use crate::domain::{Address, IdentityDescriptor, IdentityError, VerificationMethod};
use crate::ports::outbound::IdentityRegistry;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::{debug, info};

const DID_PREFIX: &str = "did:iota:0x";

#[derive(Clone, Debug)]
struct DidDocument {
    methods: Vec<VerificationMethod>,
    deactivated: bool,
}

/// In-memory DID registry.
#[derive(Default)]
pub struct InMemoryDidRegistry {
    documents: RwLock<HashMap<String, DidDocument>>,
}

impl InMemoryDidRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deactivate a DID.
    pub fn deactivate(&self, did: &str) -> Result<(), IdentityError> {
        let mut documents = self.documents.write();
        let document = documents
            .get_mut(did)
            .ok_or_else(|| IdentityError::UnknownDid(did.to_string()))?;
        document.deactivated = true;
        info!(did, "DID deactivated");
        Ok(())
    }

    /// Number of registered DIDs.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// `true` if no DID is registered.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

fn derive_did(controller: &Address, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(controller.as_bytes());
    hasher.update(nonce.to_be_bytes());
    format!("{DID_PREFIX}{}", hex::encode(hasher.finalize()))
}

impl IdentityRegistry for InMemoryDidRegistry {
    fn create_did(
        &self,
        controller: &Address,
        methods: Vec<VerificationMethod>,
    ) -> Result<IdentityDescriptor, IdentityError> {
        if methods.is_empty() {
            return Err(IdentityError::NoVerificationMethods);
        }

        let mut documents = self.documents.write();
        let did = derive_did(controller, documents.len() as u64);
        documents.insert(
            did.clone(),
            DidDocument {
                methods: methods.clone(),
                deactivated: false,
            },
        );

        info!(did = %did, controller = %controller, methods = methods.len(), "DID created");
        Ok(IdentityDescriptor {
            did,
            controller: *controller,
            methods,
        })
    }

    fn verify_signature(
        &self,
        did: &str,
        methods: &[VerificationMethod],
        payload: &[u8],
        signature: &[u8],
    ) -> bool {
        let documents = self.documents.read();
        let Some(document) = documents.get(did) else {
            debug!(did, "unknown DID");
            return false;
        };
        if document.deactivated {
            debug!(did, "DID deactivated");
            return false;
        }

        // Only methods that the live document still lists count.
        methods
            .iter()
            .filter(|m| document.methods.contains(m))
            .any(|m| m.scheme.verify(signature, &m.public_key, payload))
    }
}
