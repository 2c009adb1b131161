//! # Bridge Telemetry
//!
//! Structured logging for the risk bridge, built on `tracing`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RB_SERVICE_NAME` | `risk-bridge` | Service name in logs |
//! | `RB_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `RB_JSON_LOGS` | `false` | JSON output (defaults on inside containers) |
//! | `RB_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
pub mod logging;
mod subscriber;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The configuration could not be applied.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize structured logging for the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    subscriber::init_subscriber(config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(())
}

/// Convenience macro for creating a span with bridge context.
#[macro_export]
macro_rules! bridge_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, subsystem = $crate::logging::SUBSYSTEM, $($field)*)
    };
}
