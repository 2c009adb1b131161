//! # Domain Module
//!
//! Core bridge types with no I/O: state, capability, messages, errors.

pub mod capability;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use capability::{AdminCapability, CapabilityId};
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
