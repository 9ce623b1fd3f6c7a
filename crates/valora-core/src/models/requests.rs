//! Request types for updating models.

use jiff::civil::Date;

use super::{Assignee, LeadTask, TaskStatus};

/// Scalar changes to apply to a task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskRequest {
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<Assignee>,
    pub due_date: Option<Date>,
    pub notes: Option<String>,
    pub deliverable_url: Option<String>,
}

impl UpdateTaskRequest {
    /// Request that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Whether the request would change nothing.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assigned_to.is_none()
            && self.due_date.is_none()
            && self.notes.is_none()
            && self.deliverable_url.is_none()
    }

    /// Apply the request to an in-memory task.
    ///
    /// Returns a human readable line per changed field.
    pub fn apply_to(&self, task: &mut LeadTask) -> Vec<String> {
        let mut changes = Vec::new();

        if let Some(status) = self.status {
            if task.status != status {
                changes.push(format!("Status: {} → {}", task.status, status));
            }
            task.status = status;
        }
        if let Some(assignee) = &self.assigned_to {
            changes.push(format!("Assigned to {}", assignee.name));
            task.assigned_to = Some(assignee.clone());
        }
        if let Some(due) = self.due_date {
            changes.push(format!("Due date: {due}"));
            task.due_date = Some(due);
        }
        if let Some(notes) = &self.notes {
            changes.push("Notes updated".to_string());
            task.notes = Some(notes.clone());
        }
        if let Some(url) = &self.deliverable_url {
            changes.push(format!("Deliverable: {url}"));
            task.deliverable_url = Some(url.clone());
        }

        changes
    }
}
