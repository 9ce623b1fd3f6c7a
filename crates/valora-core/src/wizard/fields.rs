//! Typed field groups collected by the valuation wizard.
//!
//! The wizard writes values through [`ValuationInputs::set`] using a [`Field`]
//! key and a loosely typed [`FieldValue`] (what a form control produces).
//! Coercion into the typed groups happens here, once, so the rest of the
//! engine reads plain Rust values.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::phone;

/// Every field the wizard knows about, across all flavors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ContactName,
    CompanyName,
    TaxId,
    Email,
    Phone,
    Industry,
    EmployeeRange,
    Revenue,
    Ebitda,
    HasAdjustments,
    AdjustmentAmount,
    Location,
    YearsOfOperation,
    OwnershipParticipation,
    CompetitiveAdvantage,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::ContactName,
        Field::CompanyName,
        Field::TaxId,
        Field::Email,
        Field::Phone,
        Field::Industry,
        Field::EmployeeRange,
        Field::Revenue,
        Field::Ebitda,
        Field::HasAdjustments,
        Field::AdjustmentAmount,
        Field::Location,
        Field::YearsOfOperation,
        Field::OwnershipParticipation,
        Field::CompetitiveAdvantage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ContactName => "contact_name",
            Field::CompanyName => "company_name",
            Field::TaxId => "tax_id",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Industry => "industry",
            Field::EmployeeRange => "employee_range",
            Field::Revenue => "revenue",
            Field::Ebitda => "ebitda",
            Field::HasAdjustments => "has_adjustments",
            Field::AdjustmentAmount => "adjustment_amount",
            Field::Location => "location",
            Field::YearsOfOperation => "years_of_operation",
            Field::OwnershipParticipation => "ownership_participation",
            Field::CompetitiveAdvantage => "competitive_advantage",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| format!("Unknown wizard field: {s}"))
    }
}

/// A raw value as produced by a form control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Empty, whitespace-only text, or a non-finite number.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(n) => !n.is_finite(),
            FieldValue::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    fn into_text(self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s,
        }
    }

    /// Numeric coercion: empty or unparseable input becomes `None`.
    fn into_number(self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(n),
            FieldValue::Text(s) => parse_amount(&s),
            _ => None,
        }
    }

    fn into_bool(self) -> bool {
        match self {
            FieldValue::Bool(b) => b,
            FieldValue::Number(n) => n != 0.0,
            FieldValue::Text(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "yes" | "si" | "sí" | "1" | "on"
            ),
            FieldValue::Empty => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Parse an amount typed by a person.
///
/// Accepts `1500000`, `1 500 000`, `1.500.000`, `250.000`, `1,500,000.50`
/// and `1.500.000,50`. A lone separator followed by exactly three digits
/// groups thousands; otherwise it marks the decimals (`2,5`, `99.90`).
/// Returns `None` for empty or unparseable input.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(comma), None) if cleaned.matches(',').count() == 1 => {
            if groups_thousands(&cleaned, comma) {
                cleaned.replace(',', "")
            } else {
                cleaned.replace(',', ".")
            }
        }
        (Some(_), None) => cleaned.replace(',', ""),
        (None, Some(dot)) if cleaned.matches('.').count() == 1 => {
            if groups_thousands(&cleaned, dot) {
                cleaned.replace('.', "")
            } else {
                cleaned
            }
        }
        (None, Some(_)) => cleaned.replace('.', ""),
        _ => cleaned,
    };

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether the separator at `index` is followed by exactly three digits.
fn groups_thousands(amount: &str, index: usize) -> bool {
    let tail = &amount[index + 1..];
    tail.len() == 3 && tail.chars().all(|c| c.is_ascii_digit())
}

/// Step 1: who is asking and which company.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BasicInfo {
    pub contact_name: String,
    pub company_name: String,
    /// Spanish tax id (CIF/NIF/NIE)
    pub tax_id: String,
    pub email: String,
    /// Phone as typed
    pub phone: String,
    /// Phone in canonical international format, derived from `phone`
    pub phone_e164: String,
    pub industry: String,
    pub employee_range: String,
}

/// Step 2: financial figures, in euros.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialData {
    pub revenue: Option<f64>,
    pub ebitda: Option<f64>,
    pub has_adjustments: bool,
    /// Normalization adjustment added to EBITDA when `has_adjustments`
    pub adjustment_amount: Option<f64>,
}

impl FinancialData {
    /// EBITDA including declared adjustments.
    pub fn adjusted_ebitda(&self) -> Option<f64> {
        let adjustment = if self.has_adjustments {
            self.adjustment_amount.unwrap_or(0.0)
        } else {
            0.0
        };
        self.ebitda.map(|ebitda| ebitda + adjustment)
    }
}

/// Step 3: qualitative characteristics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Characteristics {
    pub location: String,
    pub years_of_operation: Option<f64>,
    /// Percentage of the company owned by the contact
    pub ownership_participation: Option<f64>,
    pub competitive_advantage: String,
}

/// Everything the wizard collects, shared by every step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValuationInputs {
    pub basic_info: BasicInfo,
    pub financial: FinancialData,
    pub characteristics: Characteristics,
}

impl ValuationInputs {
    /// Store a value, coercing it to the field's kind.
    ///
    /// Writing the phone also refreshes the normalized phone.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        let basic = &mut self.basic_info;
        let financial = &mut self.financial;
        let traits = &mut self.characteristics;

        match field {
            Field::ContactName => basic.contact_name = value.into_text(),
            Field::CompanyName => basic.company_name = value.into_text(),
            Field::TaxId => basic.tax_id = value.into_text(),
            Field::Email => basic.email = value.into_text(),
            Field::Phone => {
                basic.phone = value.into_text();
                basic.phone_e164 = phone::normalize(&basic.phone);
            }
            Field::Industry => basic.industry = value.into_text(),
            Field::EmployeeRange => basic.employee_range = value.into_text(),
            Field::Revenue => financial.revenue = value.into_number(),
            Field::Ebitda => financial.ebitda = value.into_number(),
            Field::HasAdjustments => financial.has_adjustments = value.into_bool(),
            Field::AdjustmentAmount => financial.adjustment_amount = value.into_number(),
            Field::Location => traits.location = value.into_text(),
            Field::YearsOfOperation => traits.years_of_operation = value.into_number(),
            Field::OwnershipParticipation => {
                traits.ownership_participation = value.into_number()
            }
            Field::CompetitiveAdvantage => traits.competitive_advantage = value.into_text(),
        }
    }

    /// Read a value back in its form representation.
    ///
    /// Blank text and missing numbers read as [`FieldValue::Empty`]. The
    /// phone reads as its normalized form.
    pub fn get(&self, field: Field) -> FieldValue {
        let text = |s: &str| {
            if s.trim().is_empty() {
                FieldValue::Empty
            } else {
                FieldValue::Text(s.to_string())
            }
        };
        let number = |n: Option<f64>| n.map_or(FieldValue::Empty, FieldValue::Number);

        let basic = &self.basic_info;
        let financial = &self.financial;
        let traits = &self.characteristics;

        match field {
            Field::ContactName => text(&basic.contact_name),
            Field::CompanyName => text(&basic.company_name),
            Field::TaxId => text(&basic.tax_id),
            Field::Email => text(&basic.email),
            Field::Phone => text(&basic.phone_e164),
            Field::Industry => text(&basic.industry),
            Field::EmployeeRange => text(&basic.employee_range),
            Field::Revenue => number(financial.revenue),
            Field::Ebitda => number(financial.ebitda),
            Field::HasAdjustments => FieldValue::Bool(financial.has_adjustments),
            Field::AdjustmentAmount => number(financial.adjustment_amount),
            Field::Location => text(&traits.location),
            Field::YearsOfOperation => number(traits.years_of_operation),
            Field::OwnershipParticipation => number(traits.ownership_participation),
            Field::CompetitiveAdvantage => text(&traits.competitive_advantage),
        }
    }

    /// Nothing has been entered yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
