//! Structured log helpers.
//!
//! Every bridge log line carries `subsystem = "risk-bridge"` so log shippers
//! can route bridge output without parsing messages.

/// Subsystem tag attached by the logging macros.
pub const SUBSYSTEM: &str = "risk-bridge";

/// Log a bridge event with the standard subsystem field.
#[macro_export]
macro_rules! log_bridge_event {
    ($level:ident, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $crate::logging::SUBSYSTEM,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a risk-score update with user, score and source fields.
#[macro_export]
macro_rules! log_risk_update {
    ($level:ident, $msg:expr, $user:expr, $score:expr, $source:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $crate::logging::SUBSYSTEM,
            user = %$user,
            risk_score = $score,
            source = %$source,
            $($($field)*,)?
            $msg
        )
    };
}
