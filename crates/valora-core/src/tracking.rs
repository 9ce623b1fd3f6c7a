//! Analytics subscribers for wizard events.

use log::info;

use crate::wizard::WizardEvent;

/// Receives wizard events. Recording never fails the wizard.
pub trait TrackingSink {
    fn record(&self, event: &WizardEvent);
}

/// Forward a batch of events to a sink, in order.
pub fn publish<S: TrackingSink + ?Sized>(sink: &S, events: &[WizardEvent]) {
    for event in events {
        sink.record(event);
    }
}

/// Sink that writes each event to the log as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TrackingSink for LogSink {
    fn record(&self, event: &WizardEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(target: "valora::tracking", "{payload}"),
            Err(_) => info!(target: "valora::tracking", "{}", event.name()),
        }
    }
}
