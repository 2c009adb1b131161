//! Event Sink Adapter
//!
//! Append-only in-memory log of `RiskScoreMessageProcessed` events.

use crate::domain::{EventSource, ProcessedEvent};
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use tracing::info;

/// In-memory event log.
#[derive(Default)]
pub struct EventLog {
    events: RwLock<Vec<ProcessedEvent>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events in emission order.
    pub fn events(&self) -> Vec<ProcessedEvent> {
        self.events.read().clone()
    }

    /// Events tagged with `source`.
    pub fn events_from(&self, source: EventSource) -> Vec<ProcessedEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.source == source)
            .cloned()
            .collect()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Export as JSON lines, one `{"event": ..., ...}` object per event.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in self.events.read().iter() {
            let mut value = serde_json::to_value(event)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("event".into(), ProcessedEvent::NAME.into());
            }
            out.push_str(&serde_json::to_string(&value)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: ProcessedEvent) {
        info!(
            event = ProcessedEvent::NAME,
            user = %event.user_address,
            score = event.risk_score,
            timestamp = event.timestamp,
            source = event.source.as_str(),
            "event emitted"
        );
        self.events.write().push(event);
    }
}
