//! Listing telemetry events and sinks.
//!
//! Events describe the request lifecycle of the listing controller. Sinks
//! are local only; nothing is transmitted.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the listing controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A listing request was issued.
    ListingRequested {
        /// Generation tag of the request.
        generation: u64,
        /// Encoded query string sent to the source.
        query: String,
    },
    /// The latest request resolved successfully.
    ListingResolved {
        /// Generation tag of the request.
        generation: u64,
        /// Page actually served.
        page: u32,
        /// Items across all pages.
        total_items: u64,
    },
    /// The latest request failed.
    ListingFailed {
        /// Generation tag of the request.
        generation: u64,
        /// Display form of the error.
        message: String,
    },
    /// A response arrived for a superseded request and was dropped.
    StaleResponseDiscarded {
        /// Generation tag of the stale request.
        generation: u64,
        /// Generation of the latest issued request.
        latest: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Writes telemetry events to stderr as JSON lines.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps every event in memory, for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Returns and clears the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingTelemetrySink, TelemetryEvent, TelemetrySink};

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingTelemetrySink::default();
        sink.record(TelemetryEvent::StaleResponseDiscarded {
            generation: 1,
            latest: 2,
        });

        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::StaleResponseDiscarded {
                generation: 1,
                latest: 2,
            }]
        );
        assert!(sink.take().is_empty());
    }

    #[test]
    fn events_serialise_with_a_type_tag() {
        let event = TelemetryEvent::ListingResolved {
            generation: 3,
            page: 2,
            total_items: 10,
        };

        assert_eq!(
            serde_json::to_string(&event).expect("event should serialise"),
            r#"{"type":"listing_resolved","generation":3,"page":2,"total_items":10}"#
        );
    }
}
