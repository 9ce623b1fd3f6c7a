//! Field schemas: which fields each step collects, per wizard flavor.
//!
//! Both flavors run through the same engine. They differ only in the schema
//! value they hand to it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::fields::Field;

/// The wizard variants offered on the site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardFlavor {
    /// Full flow: tax id, phone and ownership data are mandatory
    #[default]
    Full,

    /// Shorter flow for quick estimates
    Streamlined,
}

impl WizardFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardFlavor::Full => "full",
            WizardFlavor::Streamlined => "streamlined",
        }
    }
}

impl fmt::Display for WizardFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WizardFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "master" => Ok(WizardFlavor::Full),
            "streamlined" | "v2" => Ok(WizardFlavor::Streamlined),
            _ => Err(format!("Invalid wizard flavor: {s}")),
        }
    }
}

/// A field bound to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub required: bool,
}

const fn required(field: Field) -> FieldSpec {
    FieldSpec {
        field,
        required: true,
    }
}

const fn optional(field: Field) -> FieldSpec {
    FieldSpec {
        field,
        required: false,
    }
}

/// One input step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Title of the terminal step, reached only by a successful calculation.
pub const RESULTS_TITLE: &str = "Results";

const FULL_STEPS: &[StepSpec] = &[
    StepSpec {
        title: "Company",
        fields: &[
            required(Field::ContactName),
            required(Field::CompanyName),
            required(Field::TaxId),
            required(Field::Email),
            required(Field::Phone),
            required(Field::Industry),
            required(Field::EmployeeRange),
        ],
    },
    StepSpec {
        title: "Financials",
        fields: &[
            required(Field::Revenue),
            required(Field::Ebitda),
            optional(Field::HasAdjustments),
            optional(Field::AdjustmentAmount),
        ],
    },
    StepSpec {
        title: "Characteristics",
        fields: &[
            optional(Field::Location),
            required(Field::YearsOfOperation),
            required(Field::OwnershipParticipation),
            optional(Field::CompetitiveAdvantage),
        ],
    },
];

const STREAMLINED_STEPS: &[StepSpec] = &[
    StepSpec {
        title: "Company",
        fields: &[
            required(Field::ContactName),
            required(Field::CompanyName),
            required(Field::Email),
            optional(Field::Phone),
            required(Field::Industry),
            required(Field::EmployeeRange),
        ],
    },
    StepSpec {
        title: "Financials",
        fields: &[required(Field::Revenue), required(Field::Ebitda)],
    },
    StepSpec {
        title: "Characteristics",
        fields: &[
            optional(Field::Location),
            optional(Field::YearsOfOperation),
            required(Field::OwnershipParticipation),
        ],
    },
];

/// The field layout driving a wizard session.
///
/// Steps are numbered from 1. The input steps are `1..=input_steps()`; the
/// terminal results step is `total_steps()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    flavor: WizardFlavor,
    steps: &'static [StepSpec],
}

impl FieldSchema {
    pub fn for_flavor(flavor: WizardFlavor) -> Self {
        let steps = match flavor {
            WizardFlavor::Full => FULL_STEPS,
            WizardFlavor::Streamlined => STREAMLINED_STEPS,
        };
        Self { flavor, steps }
    }

    pub fn flavor(&self) -> WizardFlavor {
        self.flavor
    }

    /// Number of steps that collect input.
    pub fn input_steps(&self) -> u8 {
        self.steps.len() as u8
    }

    /// Input steps plus the terminal results step.
    pub fn total_steps(&self) -> u8 {
        self.input_steps() + 1
    }

    /// Spec of an input step; `None` for the terminal step or out of range.
    pub fn step(&self, number: u8) -> Option<&'static StepSpec> {
        let index = usize::from(number).checked_sub(1)?;
        self.steps.get(index)
    }

    /// Title of any step, including the terminal one.
    pub fn step_title(&self, number: u8) -> Option<&'static str> {
        if number == self.total_steps() {
            return Some(RESULTS_TITLE);
        }
        self.step(number).map(|step| step.title)
    }

    /// Step a field is collected on, with its spec.
    pub fn locate(&self, field: Field) -> Option<(u8, FieldSpec)> {
        self.steps.iter().enumerate().find_map(|(index, step)| {
            step.fields
                .iter()
                .find(|spec| spec.field == field)
                .map(|spec| (index as u8 + 1, *spec))
        })
    }

    /// Every field collected by this flavor.
    pub fn fields(&self) -> impl Iterator<Item = FieldSpec> + '_ {
        self.steps.iter().flat_map(|step| step.fields.iter().copied())
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::for_flavor(WizardFlavor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_flavors_have_four_steps() {
        for flavor in [WizardFlavor::Full, WizardFlavor::Streamlined] {
            let schema = FieldSchema::for_flavor(flavor);
            assert_eq!(schema.input_steps(), 3);
            assert_eq!(schema.total_steps(), 4);
            assert_eq!(schema.step_title(4), Some(RESULTS_TITLE));
            assert!(schema.step(4).is_none());
            assert!(schema.step(0).is_none());
        }
    }

    #[test]
    fn test_locate_fields() {
        let full = FieldSchema::for_flavor(WizardFlavor::Full);
        assert_eq!(full.locate(Field::Ebitda), Some((2, required(Field::Ebitda))));
        assert_eq!(full.locate(Field::TaxId), Some((1, required(Field::TaxId))));

        let streamlined = FieldSchema::for_flavor(WizardFlavor::Streamlined);
        assert_eq!(streamlined.locate(Field::TaxId), None);
        assert_eq!(streamlined.locate(Field::Phone), Some((1, optional(Field::Phone))));
    }

    #[test]
    fn test_each_field_is_bound_to_at_most_one_step() {
        for flavor in [WizardFlavor::Full, WizardFlavor::Streamlined] {
            let schema = FieldSchema::for_flavor(flavor);
            let mut seen: Vec<Field> = schema.fields().map(|spec| spec.field).collect();
            let total = seen.len();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), total, "{flavor} binds a field twice");
        }
    }

    #[test]
    fn test_flavor_parsing_accepts_legacy_names() {
        assert_eq!("master".parse::<WizardFlavor>().unwrap(), WizardFlavor::Full);
        assert_eq!("V2".parse::<WizardFlavor>().unwrap(), WizardFlavor::Streamlined);
        assert!("deluxe".parse::<WizardFlavor>().is_err());
    }
}
