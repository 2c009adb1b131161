//! # Risk-Bridge Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end bridge flows over in-memory collaborators
//!     ├── fixtures.rs   # Shared bridge harness
//!     ├── relay_flow.rs # Oracle-signed relay path
//!     ├── admin_flow.rs # Capability and admin bypass
//!     ├── channel_flow.rs
//!     └── identity_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rb-tests
//!
//! # By flow
//! cargo test -p rb-tests integration::relay_flow::
//!
//! # Benchmarks
//! cargo bench -p rb-tests
//! ```

#![allow(dead_code)]

pub mod integration;
