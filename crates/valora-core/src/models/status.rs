//! Status and classification enumerations for leads and their tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a lead task.
///
/// Any status is reachable from any other. The usual path is
/// `pending → in_progress → completed`, with `skipped` as the escape hatch
/// from `pending` or `in_progress`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task has been finished
    Completed,

    /// Task was deliberately not done
    Skipped,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "inprogress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// Whether the task still belongs to the working set.
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::InProgress)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use valora_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::Skipped.with_icon(), "⤼ Skipped");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Pending => "○ Pending",
            TaskStatus::Skipped => "⤼ Skipped",
        }
    }
}

/// Phase of the lead workflow a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    /// Reception of the inquiry
    Recepcion,

    /// Valuation work; the only phase that carries deliverables
    Valoracion,

    /// Final decision on the lead
    Decision,
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recepcion" | "recepción" => Ok(TaskCategory::Recepcion),
            "valoracion" | "valoración" => Ok(TaskCategory::Valoracion),
            "decision" | "decisión" => Ok(TaskCategory::Decision),
            _ => Err(format!("Invalid task category: {s}")),
        }
    }
}

impl TaskCategory {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Recepcion => "recepcion",
            TaskCategory::Valoracion => "valoracion",
            TaskCategory::Decision => "decision",
        }
    }

    /// Whether tasks of this category may carry a deliverable link.
    pub fn accepts_deliverable(&self) -> bool {
        matches!(self, TaskCategory::Valoracion)
    }
}

/// Discriminator for the kind of record a lead is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadType {
    /// Came in through the valuation wizard
    #[default]
    Valuation,

    /// Came in through the contact form
    Contact,

    /// Applied to collaborate with the firm
    Collaborator,
}

impl FromStr for LeadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "valuation" => Ok(LeadType::Valuation),
            "contact" => Ok(LeadType::Contact),
            "collaborator" => Ok(LeadType::Collaborator),
            _ => Err(format!("Invalid lead type: {s}")),
        }
    }
}

impl LeadType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadType::Valuation => "valuation",
            LeadType::Contact => "contact",
            LeadType::Collaborator => "collaborator",
        }
    }
}

/// CRM qualification state of a lead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Freshly received
    #[default]
    New,

    /// Every checklist task is completed
    Qualified,
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(LeadStatus::New),
            "qualified" => Ok(LeadStatus::Qualified),
            _ => Err(format!("Invalid lead status: {s}")),
        }
    }
}

impl LeadStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Qualified => "qualified",
        }
    }
}
