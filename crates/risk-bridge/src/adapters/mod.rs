//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of every outbound port, used by tests and
//! local runs.

mod crypto;
mod event_log;
mod identity;
mod lending_pool;
mod streams;

pub use crypto::SchemePrimitive;
pub use event_log::EventLog;
pub use identity::InMemoryDidRegistry;
pub use lending_pool::InMemoryLendingPool;
pub use streams::InMemoryStreamsChannel;
