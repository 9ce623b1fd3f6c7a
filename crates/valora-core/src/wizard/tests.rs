use async_trait::async_trait;

use super::*;
use crate::{
    error::{Result, ValoraError},
    valuation::{Multiples, ValuationRange, ValuationResult, ValuationService},
};

fn fixed_result() -> ValuationResult {
    ValuationResult {
        final_valuation: 500_000.0,
        multiples: Multiples {
            ebitda_multiple_used: 5.0,
        },
        valuation_range: ValuationRange {
            min: 400_000.0,
            max: 600_000.0,
        },
    }
}

struct FixedValuation;

#[async_trait]
impl ValuationService for FixedValuation {
    async fn compute(&self, _inputs: &ValuationInputs) -> Result<ValuationResult> {
        Ok(fixed_result())
    }
}

struct UnavailableValuation;

#[async_trait]
impl ValuationService for UnavailableValuation {
    async fn compute(&self, _inputs: &ValuationInputs) -> Result<ValuationResult> {
        Err(ValoraError::ValuationService {
            message: "upstream timed out".to_string(),
        })
    }
}

fn fill_company(session: &mut WizardSession) {
    session.update_field(Field::ContactName, "Ana García");
    session.update_field(Field::CompanyName, "Talleres Norte SL");
    session.update_field(Field::TaxId, "B12345678");
    session.update_field(Field::Email, "ana@talleresnorte.es");
    session.update_field(Field::Phone, "612 345 678");
    session.update_field(Field::Industry, "manufacturing");
    session.update_field(Field::EmployeeRange, "11-50");
}

fn fill_financials(session: &mut WizardSession) {
    session.update_field(Field::Revenue, "2.000.000");
    session.update_field(Field::Ebitda, 100_000.0);
}

fn fill_characteristics(session: &mut WizardSession) {
    session.update_field(Field::YearsOfOperation, 15.0);
    session.update_field(Field::OwnershipParticipation, 60.0);
}

/// A full-flavor session sitting on the last input step with valid data.
fn ready_session() -> WizardSession {
    let mut session = WizardSession::new(WizardFlavor::Full);
    fill_company(&mut session);
    session.next_step();
    fill_financials(&mut session);
    session.next_step();
    fill_characteristics(&mut session);
    assert_eq!(session.current_step(), 3);
    session
}

#[test]
fn test_new_session_starts_on_first_step() {
    let session = WizardSession::default();
    assert_eq!(session.current_step(), 1);
    assert_eq!(session.terminal_step(), 4);
    assert!(session.fields().is_blank());
    assert!(session.result().is_none());
    assert!(!session.show_validation());
    assert!(!session.is_calculating());
}

#[test]
fn test_next_step_refused_on_invalid_step_reveals_errors() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    session.update_field(Field::ContactName, "Ana García");

    let events = session.next_step();

    assert_eq!(events, vec![WizardEvent::StepBlocked { step: 1 }]);
    assert_eq!(session.current_step(), 1);
    assert!(session.show_validation());

    let company = session.field_state(Field::CompanyName);
    assert!(!company.touched);
    assert!(!company.valid);
    assert_eq!(company.error_message.as_deref(), Some("This field is required"));

    let contact = session.field_state(Field::ContactName);
    assert!(contact.valid);
    assert_eq!(contact.error_message, None);
}

#[test]
fn test_next_step_advances_when_step_validates() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    fill_company(&mut session);

    let events = session.next_step();

    assert_eq!(events, vec![WizardEvent::StepChanged { from: 1, to: 2 }]);
    assert_eq!(session.current_step(), 2);
}

#[test]
fn test_next_step_never_reaches_results_step() {
    let mut session = ready_session();
    assert!(session.validate_step(3));

    assert!(session.next_step().is_empty());
    assert_eq!(session.current_step(), 3);
}

#[test]
fn test_prev_step_is_unvalidated_and_floored() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    assert!(session.prev_step().is_empty());
    assert_eq!(session.current_step(), 1);

    fill_company(&mut session);
    session.next_step();
    // Step 2 is empty, going back is still allowed
    let events = session.prev_step();
    assert_eq!(events, vec![WizardEvent::StepChanged { from: 2, to: 1 }]);
    assert_eq!(session.current_step(), 1);
}

#[test]
fn test_go_to_step_requires_every_prior_step() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    fill_company(&mut session);

    assert!(session.go_to_step(3).is_empty());
    assert_eq!(session.current_step(), 1);

    assert_eq!(
        session.go_to_step(2),
        vec![WizardEvent::StepChanged { from: 1, to: 2 }]
    );

    fill_financials(&mut session);
    session.go_to_step(1);
    assert_eq!(session.go_to_step(3).len(), 1);
    assert_eq!(session.current_step(), 3);
}

#[test]
fn test_go_to_step_rejects_results_and_out_of_range() {
    let mut session = ready_session();
    for target in [0, 4, 5, u8::MAX] {
        assert!(session.go_to_step(target).is_empty());
        assert_eq!(session.current_step(), 3);
    }
}

#[test]
fn test_update_does_not_touch_and_blur_does() {
    let mut session = WizardSession::new(WizardFlavor::Full);

    let events = session.update_field(Field::Email, "not-an-email");
    assert_eq!(events, vec![WizardEvent::FieldUpdated { field: Field::Email }]);
    assert!(!session.field_state(Field::Email).touched);
    assert_eq!(session.field_state(Field::Email).error_message, None);

    let events = session.handle_field_blur(Field::Email);
    assert_eq!(
        events,
        vec![WizardEvent::FieldValidated {
            field: Field::Email,
            valid: false
        }]
    );
    let state = session.field_state(Field::Email);
    assert!(state.touched);
    assert_eq!(
        state.error_message.as_deref(),
        Some("Enter a valid email address")
    );
}

#[test]
fn test_valid_update_clears_stale_error() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    session.update_field(Field::Email, "ana@");
    session.handle_field_blur(Field::Email);
    assert!(session.field_state(Field::Email).error_message.is_some());

    // Still invalid: the stale message stays until the next blur
    session.update_field(Field::Email, "ana@empresa");
    assert!(session.field_state(Field::Email).error_message.is_some());

    session.update_field(Field::Email, "ana@empresa.es");
    let state = session.field_state(Field::Email);
    assert!(state.valid);
    assert!(state.touched);
    assert_eq!(state.error_message, None);
}

#[test]
fn test_dotted_thousands_are_stored_as_whole_amounts() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    session.update_field(Field::Revenue, "250.000");
    session.update_field(Field::Ebitda, "50.000");

    assert_eq!(session.fields().financial.revenue, Some(250_000.0));
    assert_eq!(session.fields().financial.ebitda, Some(50_000.0));
}

#[test]
fn test_phone_is_stored_normalized() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    session.update_field(Field::Phone, "0034 612-345-678");

    assert_eq!(session.fields().basic_info.phone, "0034 612-345-678");
    assert_eq!(session.fields().basic_info.phone_e164, "+34612345678");
    session.handle_field_blur(Field::Phone);
    assert!(session.field_state(Field::Phone).valid);
}

#[test]
fn test_streamlined_flavor_ignores_fields_it_does_not_collect() {
    let mut session = WizardSession::new(WizardFlavor::Streamlined);

    assert!(session.update_field(Field::TaxId, "B12345678").is_empty());
    assert!(session.handle_field_blur(Field::TaxId).is_empty());
    assert_eq!(session.fields().basic_info.tax_id, "");

    // Optional phone: step 1 validates without it
    session.update_field(Field::ContactName, "Ana García");
    session.update_field(Field::CompanyName, "Talleres Norte SL");
    session.update_field(Field::Email, "ana@talleresnorte.es");
    session.update_field(Field::Industry, "manufacturing");
    session.update_field(Field::EmployeeRange, "11-50");
    assert!(session.validate_step(1));
}

#[test]
fn test_optional_field_must_still_be_well_formed() {
    let mut session = WizardSession::new(WizardFlavor::Streamlined);
    session.update_field(Field::ContactName, "Ana García");
    session.update_field(Field::CompanyName, "Talleres Norte SL");
    session.update_field(Field::Email, "ana@talleresnorte.es");
    session.update_field(Field::Industry, "manufacturing");
    session.update_field(Field::EmployeeRange, "11-50");
    session.update_field(Field::Phone, "12");

    assert!(!session.validate_step(1));
}

#[tokio::test]
async fn test_successful_calculation_reaches_results() {
    let mut session = ready_session();

    let events = session.calculate_valuation(&FixedValuation).await.unwrap();

    assert_eq!(
        events,
        vec![
            WizardEvent::CalculationStarted { step: 3 },
            WizardEvent::CalculationCompleted {
                final_valuation: 500_000.0
            },
            WizardEvent::StepChanged { from: 3, to: 4 },
        ]
    );
    assert_eq!(session.current_step(), 4);
    assert!(!session.is_calculating());

    let result = session.result().unwrap();
    assert_eq!(result.final_valuation, 500_000.0);
    assert_eq!(result.multiples.ebitda_multiple_used, 5.0);
    assert_eq!(result.valuation_range.min, 400_000.0);
    assert_eq!(result.valuation_range.max, 600_000.0);
    assert!(session.validate_step(4));
}

#[tokio::test]
async fn test_failed_calculation_keeps_step_and_surfaces_error() {
    let mut session = ready_session();

    let error = session
        .calculate_valuation(&UnavailableValuation)
        .await
        .unwrap_err();

    assert!(matches!(error, ValoraError::ValuationService { .. }));
    assert_eq!(session.current_step(), 3);
    assert!(session.result().is_none());
    assert!(!session.is_calculating());
    assert_eq!(
        session.last_error(),
        Some("Something went wrong on our side. Please try again.")
    );

    // A retry is accepted
    session.calculate_valuation(&FixedValuation).await.unwrap();
    assert_eq!(session.current_step(), 4);
    assert_eq!(session.last_error(), None);
}

#[tokio::test]
async fn test_calculation_refused_with_invalid_earlier_step() {
    let mut session = ready_session();
    // Break step 2 after leaving it
    session.update_field(Field::Revenue, "");

    let events = session.calculate_valuation(&FixedValuation).await.unwrap();

    assert!(events.is_empty());
    assert_eq!(session.current_step(), 3);
    assert!(session.result().is_none());
    assert!(session.show_validation());
}

#[tokio::test]
async fn test_calculation_refused_before_last_input_step() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    fill_company(&mut session);

    let events = session.calculate_valuation(&FixedValuation).await.unwrap();
    assert!(events.is_empty());
    assert_eq!(session.current_step(), 1);
}

#[test]
fn test_second_calculation_is_rejected_while_in_flight() {
    let mut session = ready_session();

    let ticket = session.begin_calculation().unwrap();
    assert_eq!(ticket.events, vec![WizardEvent::CalculationStarted { step: 3 }]);
    assert_eq!(ticket.inputs, *session.fields());
    assert!(session.is_calculating());

    assert!(session.begin_calculation().is_none());
    // Navigation and edits wait for the outcome
    assert!(session.prev_step().is_empty());
    assert!(session.update_field(Field::Ebitda, 1.0).is_empty());
}

#[test]
fn test_outcome_after_reset_is_dropped() {
    let mut session = ready_session();
    assert!(session.begin_calculation().is_some());

    session.reset_calculator();
    let events = session.finish_calculation(Ok(fixed_result())).unwrap();

    assert!(events.is_empty());
    assert_eq!(session.current_step(), 1);
    assert!(session.result().is_none());
}

#[tokio::test]
async fn test_completed_session_is_read_only_until_reset() {
    let mut session = ready_session();
    session.calculate_valuation(&FixedValuation).await.unwrap();

    assert!(session.update_field(Field::Ebitda, 1.0).is_empty());
    assert!(session.handle_field_blur(Field::Ebitda).is_empty());
    assert!(session.prev_step().is_empty());
    assert!(session.go_to_step(1).is_empty());
    assert!(session.next_step().is_empty());
    assert!(session
        .calculate_valuation(&FixedValuation)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(session.current_step(), 4);
    assert_eq!(session.fields().financial.ebitda, Some(100_000.0));
}

#[tokio::test]
async fn test_reset_restores_initial_state() {
    let mut session = ready_session();
    session.handle_field_blur(Field::Location);
    session.calculate_valuation(&FixedValuation).await.unwrap();

    let events = session.reset_calculator();

    assert_eq!(events, vec![WizardEvent::SessionReset]);
    assert_eq!(session.current_step(), 1);
    assert!(session.fields().is_blank());
    assert!(session.result().is_none());
    assert_eq!(session.field_state(Field::Location), FieldState::default());
    assert!(!session.show_validation());
    assert_eq!(session.flavor(), WizardFlavor::Full);
}

#[test]
fn test_reset_mid_flow_reports_abandonment() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    fill_company(&mut session);
    session.next_step();

    assert_eq!(
        session.reset_calculator(),
        vec![
            WizardEvent::CalculationAbandoned { step: 2 },
            WizardEvent::SessionReset
        ]
    );

    // Nothing entered: nothing abandoned
    assert_eq!(session.reset_calculator(), vec![WizardEvent::SessionReset]);
}

#[test]
fn test_step_indicators_follow_navigation_rule() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    fill_company(&mut session);

    let indicators = session.step_indicators();
    assert_eq!(indicators.len(), 4);
    assert_eq!(indicators[0].title, "Company");
    assert!(indicators[0].current);
    assert!(indicators[0].complete);
    assert!(indicators[1].reachable);
    assert!(!indicators[2].reachable);
    assert!(!indicators[3].reachable);
    assert_eq!(indicators[3].title, "Results");

    for indicator in &indicators {
        assert_eq!(indicator.reachable, session.can_visit(indicator.number));
    }
}

#[test]
fn test_current_step_stays_in_range() {
    let mut session = WizardSession::new(WizardFlavor::Streamlined);
    let mut steps = vec![session.current_step()];

    for _ in 0..5 {
        session.next_step();
        steps.push(session.current_step());
        session.prev_step();
        steps.push(session.current_step());
        session.go_to_step(9);
        steps.push(session.current_step());
    }

    assert!(steps.iter().all(|step| (1..=4).contains(step)));
}

#[test]
fn test_session_round_trips_through_json() {
    let mut session = ready_session();
    session.handle_field_blur(Field::Email);

    let json = serde_json::to_string(&session).unwrap();
    let restored: WizardSession = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.current_step(), 3);
    assert_eq!(restored.fields(), session.fields());
    assert!(restored.field_state(Field::Email).touched);
    assert!(!restored.is_calculating());
}

#[test]
fn test_saved_session_with_step_out_of_range_is_rejected() {
    let mut json = serde_json::to_value(ready_session()).unwrap();

    for step in [0, 5] {
        json["current_step"] = step.into();
        assert!(serde_json::from_value::<WizardSession>(json.clone()).is_err());
    }
}

#[test]
fn test_saved_result_must_sit_on_results_step() {
    let mut session = ready_session();
    session.begin_calculation().expect("Calculation should be accepted");
    session.finish_calculation(Ok(fixed_result())).unwrap();

    let completed = serde_json::to_value(&session).unwrap();
    let restored: WizardSession = serde_json::from_value(completed.clone()).unwrap();
    assert!(restored.is_complete());
    assert_eq!(restored.current_step(), restored.terminal_step());

    let mut on_input_step = completed.clone();
    on_input_step["current_step"] = 1.into();
    assert!(serde_json::from_value::<WizardSession>(on_input_step).is_err());

    let mut missing_result = completed;
    missing_result["result"] = serde_json::Value::Null;
    assert!(serde_json::from_value::<WizardSession>(missing_result).is_err());
}

#[test]
fn test_second_next_step_without_step_two_is_a_no_op() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    fill_company(&mut session);

    session.next_step();
    assert_eq!(session.current_step(), 2);

    assert_eq!(session.next_step(), vec![WizardEvent::StepBlocked { step: 2 }]);
    assert_eq!(session.current_step(), 2);
}

#[test]
fn test_every_field_is_untouched_after_update_and_after_reset() {
    let mut session = WizardSession::new(WizardFlavor::Full);
    for field in Field::ALL {
        session.update_field(field, "x");
        assert!(!session.field_state(field).touched, "{field} touched by update");
        session.handle_field_blur(field);
    }

    session.reset_calculator();

    assert_eq!(session.current_step(), 1);
    for field in Field::ALL {
        assert_eq!(session.field_state(field), FieldState::default());
    }
}
