//! Multi-step valuation wizard.
//!
//! A [`WizardSession`] walks a visitor through three input steps (company,
//! financials, characteristics) and a terminal results step reached only by
//! a successful calculation. The fields each step collects come from a
//! [`FieldSchema`]; both [`WizardFlavor`]s share this engine.
//!
//! ```rust
//! use valora_core::wizard::{Field, WizardFlavor, WizardSession};
//!
//! let mut session = WizardSession::new(WizardFlavor::Streamlined);
//! session.update_field(Field::ContactName, "Ana García");
//! assert_eq!(session.current_step(), 1);
//!
//! // Step 1 is incomplete, so forward navigation is refused
//! session.next_step();
//! assert_eq!(session.current_step(), 1);
//! assert!(session.show_validation());
//! ```

pub mod events;
pub mod fields;
pub mod phone;
pub mod schema;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests;

pub use events::WizardEvent;
pub use fields::{
    parse_amount, BasicInfo, Characteristics, Field, FieldValue, FinancialData,
    ValuationInputs,
};
pub use schema::{FieldSchema, FieldSpec, StepSpec, WizardFlavor};
pub use session::{CalculationTicket, StepIndicator, WizardSession};
pub use validation::{FieldState, Rule, EMPLOYEE_RANGES, INDUSTRIES};
