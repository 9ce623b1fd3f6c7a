//! Lead summary and progress types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Lead, LeadStatus, LeadTask, LeadType, TaskStatus};

/// Rounded completion percentage; 0 when there are no tasks.
///
/// ```rust
/// use valora_core::models::progress_percentage;
///
/// assert_eq!(progress_percentage(0, 0), 0);
/// assert_eq!(progress_percentage(1, 3), 33);
/// assert_eq!(progress_percentage(2, 3), 67);
/// ```
pub fn progress_percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (f64::from(completed) / f64::from(total) * 100.0).round() as u8
}

/// Aggregate progress of a lead's checklist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadProgress {
    /// Number of tasks in status `completed`
    pub completed: u32,
    /// Number of tasks regardless of status
    pub total: u32,
    /// `round(completed / total * 100)`, 0 for an empty checklist
    pub percentage: u8,
    /// Every task of a valuation lead is completed
    pub auto_qualified: bool,
}

impl LeadProgress {
    /// Compute progress for the given tasks of a lead of `lead_type`.
    pub fn from_tasks(lead_type: LeadType, tasks: &[LeadTask]) -> Self {
        let total = tasks.len() as u32;
        let completed = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count() as u32;
        let percentage = progress_percentage(completed, total);

        Self {
            completed,
            total,
            percentage,
            auto_qualified: lead_type == LeadType::Valuation && percentage == 100,
        }
    }
}

/// Summary information about a lead with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSummary {
    /// Lead ID
    pub id: u64,
    /// Kind of lead
    pub lead_type: LeadType,
    /// Qualification status
    pub status: LeadStatus,
    /// Person the firm is talking to
    pub contact_name: String,
    /// Company name, when known
    pub company_name: Option<String>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Checklist progress
    pub progress: LeadProgress,
}

impl From<&Lead> for LeadSummary {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            lead_type: lead.lead_type,
            status: lead.status,
            contact_name: lead.contact_name.clone(),
            company_name: lead.company_name.clone(),
            created_at: lead.created_at,
            progress: LeadProgress::from_tasks(lead.lead_type, &lead.tasks),
        }
    }
}
