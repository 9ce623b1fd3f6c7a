//! Pure field validators and the per-field validation state.

use serde::{Deserialize, Serialize};

use super::{
    fields::{Field, FieldValue},
    phone,
};

/// Sectors offered by the industry selector.
pub const INDUSTRIES: &[&str] = &[
    "technology",
    "healthcare",
    "energy",
    "services",
    "logistics",
    "food",
    "manufacturing",
    "retail",
    "hospitality",
    "construction",
    "other",
];

/// Headcount buckets offered by the employee-range selector.
pub const EMPLOYEE_RANGES: &[&str] = &["1-10", "11-50", "51-200", "201-500", "500+"];

const REQUIRED: &str = "This field is required";

/// Format check applied to a non-blank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Text,
    Email,
    Phone,
    TaxId,
    Industry,
    EmployeeRange,
    PositiveAmount,
    SignedAmount,
    NonNegativeAmount,
    Percentage,
    Years,
    Boolean,
}

impl Field {
    /// Format rule for the field.
    pub fn rule(&self) -> Rule {
        match self {
            Field::ContactName
            | Field::CompanyName
            | Field::Location
            | Field::CompetitiveAdvantage => Rule::Text,
            Field::TaxId => Rule::TaxId,
            Field::Email => Rule::Email,
            Field::Phone => Rule::Phone,
            Field::Industry => Rule::Industry,
            Field::EmployeeRange => Rule::EmployeeRange,
            Field::Revenue => Rule::PositiveAmount,
            Field::Ebitda => Rule::SignedAmount,
            Field::AdjustmentAmount => Rule::NonNegativeAmount,
            Field::YearsOfOperation => Rule::Years,
            Field::OwnershipParticipation => Rule::Percentage,
            Field::HasAdjustments => Rule::Boolean,
        }
    }
}

/// Validate a value against a rule.
///
/// Blank values fail only when `required`. The error is the message to show
/// next to the field.
pub fn validate(rule: Rule, required: bool, value: &FieldValue) -> Result<(), &'static str> {
    if value.is_blank() {
        return if required { Err(REQUIRED) } else { Ok(()) };
    }

    match rule {
        Rule::Text => match value.as_text() {
            Some(text) if text.trim().chars().count() >= 2 => Ok(()),
            _ => Err("Enter at least 2 characters"),
        },
        Rule::Email => text_check(value, is_email, "Enter a valid email address"),
        Rule::Phone => text_check(
            value,
            |p| phone::is_plausible(&phone::normalize(p)),
            "Enter a valid phone number",
        ),
        Rule::TaxId => text_check(value, is_tax_id, "Enter a valid CIF, NIF or NIE"),
        Rule::Industry => text_check(
            value,
            |s| INDUSTRIES.contains(&s.trim()),
            "Select an industry from the list",
        ),
        Rule::EmployeeRange => text_check(
            value,
            |s| EMPLOYEE_RANGES.contains(&s.trim()),
            "Select an employee range from the list",
        ),
        Rule::PositiveAmount => number_check(value, |n| n > 0.0, "Enter an amount greater than 0"),
        Rule::SignedAmount => number_check(value, |_| true, "Enter a valid amount"),
        Rule::NonNegativeAmount => number_check(value, |n| n >= 0.0, "Enter an amount of 0 or more"),
        Rule::Percentage => number_check(
            value,
            |n| (0.0..=100.0).contains(&n),
            "Enter a percentage between 0 and 100",
        ),
        Rule::Years => number_check(
            value,
            |n| n >= 0.0 && n.fract() == 0.0 && n < 500.0,
            "Enter a whole number of years",
        ),
        Rule::Boolean => match value {
            FieldValue::Bool(_) => Ok(()),
            _ => Err("Choose yes or no"),
        },
    }
}

fn text_check(
    value: &FieldValue,
    check: impl Fn(&str) -> bool,
    message: &'static str,
) -> Result<(), &'static str> {
    match value.as_text() {
        Some(text) if check(text) => Ok(()),
        _ => Err(message),
    }
}

fn number_check(
    value: &FieldValue,
    check: impl Fn(f64) -> bool,
    message: &'static str,
) -> Result<(), &'static str> {
    match value.as_number() {
        Some(n) if check(n) => Ok(()),
        _ => Err(message),
    }
}

fn is_email(raw: &str) -> bool {
    let email = raw.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

/// Shape check for Spanish tax identifiers (no checksum).
fn is_tax_id(raw: &str) -> bool {
    let id: Vec<char> = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if id.len() != 9 {
        return false;
    }

    let first = id[0];
    let middle = &id[1..8];
    let last = id[8];
    let middle_digits = middle.iter().all(char::is_ascii_digit);

    if "ABCDEFGHJNPQRSUVW".contains(first) {
        // CIF: organization letter, 7 digits, digit or letter control
        middle_digits && (last.is_ascii_digit() || ('A'..='J').contains(&last))
    } else if "XYZ".contains(first) {
        // NIE
        middle_digits && last.is_ascii_alphabetic()
    } else {
        // NIF: 8 digits and a letter
        first.is_ascii_digit() && middle_digits && last.is_ascii_alphabetic()
    }
}

/// Validation state of a single field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldState {
    /// The field has been blurred at least once
    pub touched: bool,
    /// The current value passes the validator
    pub valid: bool,
    /// Message to render; only set once the field is touched or validation
    /// display is enabled globally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FieldState {
    /// Build the state from a validator outcome.
    pub fn evaluate(outcome: Result<(), &'static str>, touched: bool, show_validation: bool) -> Self {
        let error_message = match outcome {
            Err(message) if touched || show_validation => Some(message.to_string()),
            _ => None,
        };
        Self {
            touched,
            valid: outcome.is_ok(),
            error_message,
        }
    }
}
