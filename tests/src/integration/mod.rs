//! Cross-component bridge flows.

pub mod fixtures;

mod admin_flow;
mod channel_flow;
mod identity_flow;
