//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Lead, LeadTask};

/// Outcome of a create operation, followed by the created resource.
///
/// ```rust
/// use jiff::Timestamp;
/// use valora_core::{display::CreateResult, models::{Lead, LeadRecord}};
///
/// let lead = Lead::from(LeadRecord {
///     id: 3,
///     contact_name: Some("Ana García".to_string()),
///     created_at: Some(Timestamp::now()),
///     ..Default::default()
/// });
/// assert!(CreateResult::new(lead).to_string().starts_with("Created lead with ID: 3"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Lead> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created lead with ID: {} ({} system tasks)",
            self.resource.id,
            self.resource.tasks.len()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<LeadTask> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added task with ID: {} to lead {}",
            self.resource.id, self.resource.lead_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of an update, with the list of changes that were applied.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl UpdateResult<LeadTask> {
    fn write_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<LeadTask> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.id)?;
        self.write_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Lead> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated lead with ID: {}", self.resource.id)?;
        for change in &self.changes {
            writeln!(f, "- {change}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Confirmation of a deletion.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Lead> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted lead '{}' (ID: {}) with {} tasks",
            self.resource.contact_name,
            self.resource.id,
            self.resource.tasks.len()
        )
    }
}

impl fmt::Display for DeleteResult<LeadTask> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted task '{}' (ID: {})",
            self.resource.task_name, self.resource.id
        )
    }
}
