//! Valuation computation: the result artifact and the service boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ValoraError},
    wizard::ValuationInputs,
};

/// Multiples applied by the computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Multiples {
    pub ebitda_multiple_used: f64,
}

/// Low/high bounds around the final valuation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValuationRange {
    pub min: f64,
    pub max: f64,
}

/// Outcome of a valuation computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub final_valuation: f64,
    pub multiples: Multiples,
    pub valuation_range: ValuationRange,
}

/// External collaborator that turns wizard inputs into a valuation.
///
/// Implementations may fail transiently; callers surface the error and never
/// retry on their own.
#[async_trait]
pub trait ValuationService: Send + Sync {
    async fn compute(&self, inputs: &ValuationInputs) -> Result<ValuationResult>;
}

/// Built-in valuation: adjusted EBITDA times a sector multiple.
#[derive(Debug, Clone, Copy)]
pub struct SectorMultiples {
    /// Relative width of the range on each side of the final valuation
    pub spread: f64,
}

impl Default for SectorMultiples {
    fn default() -> Self {
        Self { spread: 0.2 }
    }
}

impl SectorMultiples {
    /// EBITDA multiple for an industry slug; unknown sectors use "other".
    pub fn multiple_for(industry: &str) -> f64 {
        match industry.trim() {
            "technology" => 8.0,
            "healthcare" => 7.0,
            "energy" => 6.5,
            "services" => 5.5,
            "logistics" | "food" | "manufacturing" => 5.0,
            "retail" => 4.5,
            "hospitality" | "construction" => 4.0,
            _ => 4.5,
        }
    }

    /// Synchronous core of [`ValuationService::compute`].
    pub fn evaluate(&self, inputs: &ValuationInputs) -> Result<ValuationResult> {
        let ebitda = inputs
            .financial
            .adjusted_ebitda()
            .ok_or_else(|| ValoraError::ValuationService {
                message: "EBITDA is missing".to_string(),
            })?;
        if ebitda <= 0.0 {
            return Err(ValoraError::ValuationService {
                message: format!("Cannot value a company with non-positive EBITDA ({ebitda})"),
            });
        }

        let multiple = Self::multiple_for(&inputs.basic_info.industry);
        let final_valuation = (ebitda * multiple).round();

        Ok(ValuationResult {
            final_valuation,
            multiples: Multiples {
                ebitda_multiple_used: multiple,
            },
            valuation_range: ValuationRange {
                min: (final_valuation * (1.0 - self.spread)).round(),
                max: (final_valuation * (1.0 + self.spread)).round(),
            },
        })
    }
}

#[async_trait]
impl ValuationService for SectorMultiples {
    async fn compute(&self, inputs: &ValuationInputs) -> Result<ValuationResult> {
        self.evaluate(inputs)
    }
}
