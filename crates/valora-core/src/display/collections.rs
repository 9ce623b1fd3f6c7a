//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{LeadSummary, LeadTask};

/// Newtype wrapper for displaying lead summaries.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use valora_core::{
///     display::LeadSummaries,
///     models::{LeadProgress, LeadStatus, LeadSummary, LeadType},
/// };
///
/// let summary = LeadSummary {
///     id: 1,
///     lead_type: LeadType::Valuation,
///     status: LeadStatus::New,
///     contact_name: "Ana García".to_string(),
///     company_name: Some("Talleres Norte SL".to_string()),
///     created_at: Timestamp::now(),
///     progress: LeadProgress::from_tasks(LeadType::Valuation, &[]),
/// };
///
/// let output = LeadSummaries(vec![summary]).to_string();
/// assert!(output.contains("Ana García"));
/// assert_eq!(LeadSummaries(vec![]).to_string(), "No leads found.\n");
/// ```
pub struct LeadSummaries(pub Vec<LeadSummary>);

impl LeadSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeadSummary> {
        self.0.iter()
    }
}

impl Index<usize> for LeadSummaries {
    type Output = LeadSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for LeadSummaries {
    type Item = LeadSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for LeadSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No leads found.")
        } else {
            for lead in &self.0 {
                write!(f, "{lead}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a lead's checklist.
pub struct Tasks(pub Vec<LeadTask>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeadTask> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = LeadTask;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = LeadTask;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}
