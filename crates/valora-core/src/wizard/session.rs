//! The wizard session: step position, field values, validation state and the
//! calculation guard.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    events::WizardEvent,
    fields::{Field, FieldValue, ValuationInputs},
    schema::{FieldSchema, WizardFlavor},
    validation::{self, FieldState},
};
use crate::{
    error::Result,
    valuation::{ValuationResult, ValuationService},
};

/// Work handed out by [`WizardSession::begin_calculation`].
#[derive(Debug, Clone)]
pub struct CalculationTicket {
    /// Snapshot of the inputs to value
    pub inputs: ValuationInputs,
    /// Events produced by accepting the calculation
    pub events: Vec<WizardEvent>,
}

/// Per-step status for a step indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub number: u8,
    pub title: &'static str,
    pub current: bool,
    pub complete: bool,
    pub reachable: bool,
}

/// One visitor's pass through the valuation wizard.
///
/// Every mutation is a method on the session and returns the events it
/// produced; a denied transition returns no events and leaves the step
/// untouched. Once a result is stored the session is read-only until
/// [`reset_calculator`](Self::reset_calculator).
///
/// Saved sessions are checked on load: the step has to lie within the
/// flavor's steps and a result is stored exactly when the session sits on the
/// terminal step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SavedSession")]
pub struct WizardSession {
    flavor: WizardFlavor,
    current_step: u8,
    fields: ValuationInputs,
    field_state: BTreeMap<Field, FieldState>,
    result: Option<ValuationResult>,
    show_validation: bool,
    #[serde(skip)]
    is_calculating: bool,
    #[serde(skip)]
    last_error: Option<String>,
}

/// Serialized form of a [`WizardSession`], checked before use.
#[derive(Deserialize)]
struct SavedSession {
    flavor: WizardFlavor,
    current_step: u8,
    fields: ValuationInputs,
    #[serde(default)]
    field_state: BTreeMap<Field, FieldState>,
    result: Option<ValuationResult>,
    #[serde(default)]
    show_validation: bool,
}

impl TryFrom<SavedSession> for WizardSession {
    type Error = String;

    fn try_from(saved: SavedSession) -> std::result::Result<Self, Self::Error> {
        let terminal = FieldSchema::for_flavor(saved.flavor).total_steps();
        if !(1..=terminal).contains(&saved.current_step) {
            return Err(format!(
                "step {} is outside 1..={terminal} for the {} wizard",
                saved.current_step, saved.flavor
            ));
        }
        let on_terminal = saved.current_step == terminal;
        if saved.result.is_some() != on_terminal {
            return Err(format!(
                "step {} does not match the stored result (results live on step {terminal})",
                saved.current_step
            ));
        }

        Ok(Self {
            flavor: saved.flavor,
            current_step: saved.current_step,
            fields: saved.fields,
            field_state: saved.field_state,
            result: saved.result,
            show_validation: saved.show_validation,
            is_calculating: false,
            last_error: None,
        })
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(WizardFlavor::default())
    }
}

impl WizardSession {
    /// Fresh session on step 1 with empty fields.
    pub fn new(flavor: WizardFlavor) -> Self {
        Self {
            flavor,
            current_step: 1,
            fields: ValuationInputs::default(),
            field_state: BTreeMap::new(),
            result: None,
            show_validation: false,
            is_calculating: false,
            last_error: None,
        }
    }

    pub fn flavor(&self) -> WizardFlavor {
        self.flavor
    }

    pub fn schema(&self) -> FieldSchema {
        FieldSchema::for_flavor(self.flavor)
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    /// Number of the terminal results step.
    pub fn terminal_step(&self) -> u8 {
        self.schema().total_steps()
    }

    /// Number of the last step that collects input.
    pub fn last_input_step(&self) -> u8 {
        self.schema().input_steps()
    }

    pub fn fields(&self) -> &ValuationInputs {
        &self.fields
    }

    pub fn result(&self) -> Option<&ValuationResult> {
        self.result.as_ref()
    }

    pub fn is_calculating(&self) -> bool {
        self.is_calculating
    }

    pub fn show_validation(&self) -> bool {
        self.show_validation
    }

    /// Retry prompt left by the last failed calculation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// A result is stored; only a reset is accepted.
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    fn is_locked(&self) -> bool {
        self.is_complete() || self.is_calculating
    }

    fn check(&self, field: Field) -> Option<std::result::Result<(), &'static str>> {
        let (_, spec) = self.schema().locate(field)?;
        Some(validation::validate(
            field.rule(),
            spec.required,
            &self.fields.get(field),
        ))
    }

    /// Store a value for a field.
    ///
    /// Does not mark the field touched. A stale error on the field is cleared
    /// when the new value passes; a new error only appears on the next blur.
    pub fn update_field(&mut self, field: Field, value: impl Into<FieldValue>) -> Vec<WizardEvent> {
        if self.is_locked() {
            return Vec::new();
        }
        if self.schema().locate(field).is_none() {
            debug!("Ignoring {field}: not collected by the {} wizard", self.flavor);
            return Vec::new();
        }

        self.fields.set(field, value.into());

        let passes = matches!(self.check(field), Some(Ok(())));
        if let Some(state) = self.field_state.get_mut(&field) {
            if !state.valid && passes {
                state.valid = true;
                state.error_message = None;
            }
        }

        vec![WizardEvent::FieldUpdated { field }]
    }

    /// Mark a field touched and run its validator.
    pub fn handle_field_blur(&mut self, field: Field) -> Vec<WizardEvent> {
        if self.is_locked() {
            return Vec::new();
        }
        let Some(outcome) = self.check(field) else {
            return Vec::new();
        };

        let state = FieldState::evaluate(outcome, true, self.show_validation);
        let valid = state.valid;
        self.field_state.insert(field, state);

        vec![WizardEvent::FieldValidated { field, valid }]
    }

    /// Current validation state; untouched fields read as the default.
    pub fn field_state(&self, field: Field) -> FieldState {
        self.field_state.get(&field).cloned().unwrap_or_default()
    }

    /// Whether every field bound to `step` passes its validator.
    ///
    /// The terminal step validates once a result is stored.
    pub fn validate_step(&self, step: u8) -> bool {
        if step == self.terminal_step() {
            return self.is_complete();
        }
        match self.schema().step(step) {
            Some(spec) => spec.fields.iter().all(|spec| {
                validation::validate(spec.field.rule(), spec.required, &self.fields.get(spec.field))
                    .is_ok()
            }),
            None => false,
        }
    }

    /// Whether navigation to input step `n` is allowed: every step before it
    /// has to validate.
    ///
    /// Used both by [`go_to_step`](Self::go_to_step) and by the step
    /// indicator, so the two never disagree.
    pub fn can_visit(&self, n: u8) -> bool {
        (1..=self.last_input_step()).contains(&n) && (1..n).all(|step| self.validate_step(step))
    }

    /// Advance one step when the current step validates.
    ///
    /// Movement is capped at the last input step: a valid call there returns
    /// no events and keeps the step, because the results step is reached only
    /// through [`calculate_valuation`](Self::calculate_valuation).
    ///
    /// On failure the step stays put and validation display is enabled so
    /// the step's errors become visible.
    pub fn next_step(&mut self) -> Vec<WizardEvent> {
        if self.is_locked() {
            return Vec::new();
        }

        let step = self.current_step;
        if !self.validate_step(step) {
            self.reveal_errors(step);
            return vec![WizardEvent::StepBlocked { step }];
        }
        if step >= self.last_input_step() {
            return Vec::new();
        }

        self.move_to(step + 1)
    }

    /// Go back one step; never validated, floored at 1.
    pub fn prev_step(&mut self) -> Vec<WizardEvent> {
        if self.is_locked() || self.current_step <= 1 {
            return Vec::new();
        }
        self.move_to(self.current_step - 1)
    }

    /// Jump to an input step when every earlier step validates.
    pub fn go_to_step(&mut self, n: u8) -> Vec<WizardEvent> {
        if self.is_locked() || n == self.current_step || !self.can_visit(n) {
            return Vec::new();
        }
        self.move_to(n)
    }

    fn move_to(&mut self, to: u8) -> Vec<WizardEvent> {
        let from = self.current_step;
        self.current_step = to;
        vec![WizardEvent::StepChanged { from, to }]
    }

    fn reveal_errors(&mut self, step: u8) {
        self.show_validation = true;
        let Some(spec) = self.schema().step(step) else {
            return;
        };
        for field_spec in spec.fields {
            let field = field_spec.field;
            let outcome = validation::validate(field.rule(), field_spec.required, &self.fields.get(field));
            let touched = self.field_state(field).touched;
            self.field_state
                .insert(field, FieldState::evaluate(outcome, touched, true));
        }
    }

    /// Accept a calculation request.
    ///
    /// Returns `None` (a no-op) unless the session sits on the last input
    /// step, every input step validates and no calculation is in flight.
    /// Accepting sets `is_calculating` until
    /// [`finish_calculation`](Self::finish_calculation) runs.
    pub fn begin_calculation(&mut self) -> Option<CalculationTicket> {
        if self.is_locked() || self.current_step != self.last_input_step() {
            return None;
        }
        if let Some(invalid) = (1..=self.last_input_step()).find(|&step| !self.validate_step(step)) {
            self.reveal_errors(invalid);
            return None;
        }

        self.is_calculating = true;
        self.last_error = None;
        Some(CalculationTicket {
            inputs: self.fields.clone(),
            events: vec![WizardEvent::CalculationStarted {
                step: self.current_step,
            }],
        })
    }

    /// Store the outcome of an accepted calculation.
    ///
    /// On success the result is stored and the session moves to the terminal
    /// step. On failure nothing is stored, the step is unchanged and the
    /// error is returned. Outcomes arriving without a calculation in flight
    /// (for example after a reset) are dropped.
    pub fn finish_calculation(
        &mut self,
        outcome: Result<ValuationResult>,
    ) -> Result<Vec<WizardEvent>> {
        if !self.is_calculating {
            debug!("Dropping valuation outcome with no calculation in flight");
            return Ok(Vec::new());
        }
        self.is_calculating = false;

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                let mut events = vec![WizardEvent::CalculationCompleted {
                    final_valuation: result.final_valuation,
                }];
                events.extend(self.move_to(self.terminal_step()));
                Ok(events)
            }
            Err(error) => {
                self.last_error = Some(error.user_message());
                Err(error)
            }
        }
    }

    /// Run the valuation through `service`.
    ///
    /// A rejected request returns `Ok` with no events. There is no
    /// cancellation: dropping the returned future leaves the session
    /// calculating until it is reset.
    pub async fn calculate_valuation<S>(&mut self, service: &S) -> Result<Vec<WizardEvent>>
    where
        S: ValuationService + ?Sized,
    {
        let Some(ticket) = self.begin_calculation() else {
            return Ok(Vec::new());
        };

        let outcome = service.compute(&ticket.inputs).await;
        let mut events = ticket.events;
        events.extend(self.finish_calculation(outcome)?);
        Ok(events)
    }

    /// Clear fields, validation state and result, and return to step 1.
    pub fn reset_calculator(&mut self) -> Vec<WizardEvent> {
        let mut events = Vec::new();
        if !self.is_complete() && (self.current_step > 1 || !self.fields.is_blank()) {
            events.push(WizardEvent::CalculationAbandoned {
                step: self.current_step,
            });
        }
        events.push(WizardEvent::SessionReset);

        *self = Self::new(self.flavor);
        events
    }

    /// Step indicator state for every step, terminal included.
    pub fn step_indicators(&self) -> Vec<StepIndicator> {
        let schema = self.schema();
        (1..=schema.total_steps())
            .map(|number| StepIndicator {
                number,
                title: schema.step_title(number).unwrap_or_default(),
                current: number == self.current_step,
                complete: self.validate_step(number),
                reachable: if number == schema.total_steps() {
                    self.is_complete()
                } else {
                    !self.is_complete() && self.can_visit(number)
                },
            })
            .collect()
    }
}
