//! Lead task model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{LeadType, TaskCategory, TaskStatus};

/// Operator a task is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignee {
    /// Opaque identifier of the operator
    pub id: String,

    /// Display name of the operator
    pub name: String,
}

/// A checklist item attached to a lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadTask {
    /// Unique identifier for the task, stable for its lifetime
    pub id: u64,

    /// ID of the owning lead
    pub lead_id: u64,

    /// Kind of the owning lead
    pub lead_type: LeadType,

    /// Display label
    pub task_name: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Workflow phase; `None` for uncategorized user tasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,

    /// Seeded automatically for the lead and not deletable
    pub is_system_task: bool,

    /// Calendar day the task is due
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Assignee>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Link to the delivered document (valoracion tasks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverable_url: Option<String>,

    /// External system expected to close the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_system: Option<String>,

    /// Position of the task within the lead's checklist (0-indexed)
    pub order: u32,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}

impl LeadTask {
    /// Whether the task is past due on `today`.
    ///
    /// Completed tasks are never overdue. The comparison is strict on
    /// calendar days: a task due today is not overdue yet.
    pub fn is_overdue(&self, today: Date) -> bool {
        if self.status == TaskStatus::Completed {
            return false;
        }
        matches!(self.due_date, Some(due) if due < today)
    }
}
