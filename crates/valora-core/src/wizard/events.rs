//! Domain events emitted by wizard operations.
//!
//! Operations return the events they produced instead of calling tracking
//! callbacks; analytics and logging subscribe to the returned list.

use serde::{Deserialize, Serialize};

use super::fields::Field;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent {
    /// A value was stored
    FieldUpdated { field: Field },
    /// A field was validated on blur
    FieldValidated { field: Field, valid: bool },
    /// The current step moved
    StepChanged { from: u8, to: u8 },
    /// Forward navigation was refused because the step does not validate
    StepBlocked { step: u8 },
    /// A calculation was accepted and is in flight
    CalculationStarted { step: u8 },
    /// The calculation finished and the result is stored
    CalculationCompleted { final_valuation: f64 },
    /// The session was reset before reaching a result
    CalculationAbandoned { step: u8 },
    /// Everything was cleared
    SessionReset,
}

impl WizardEvent {
    /// Stable event name for analytics sinks.
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::FieldUpdated { .. } => "field_updated",
            WizardEvent::FieldValidated { .. } => "field_validated",
            WizardEvent::StepChanged { .. } => "step_changed",
            WizardEvent::StepBlocked { .. } => "step_blocked",
            WizardEvent::CalculationStarted { .. } => "calculation_started",
            WizardEvent::CalculationCompleted { .. } => "calculation_completed",
            WizardEvent::CalculationAbandoned { .. } => "calculation_abandoned",
            WizardEvent::SessionReset => "session_reset",
        }
    }
}
