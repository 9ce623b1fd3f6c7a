//! Persistence boundary for lead tasks.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{LeadTask, TaskCategory, UpdateTaskRequest},
};

/// Storage the tracker writes through before touching its in-memory list.
///
/// Implementations return the task as persisted so the tracker mirrors the
/// stored state exactly (ids, order, timestamps).
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Append a user task to a lead's checklist.
    async fn insert_task(
        &self,
        lead_id: u64,
        task_name: &str,
        category: Option<TaskCategory>,
    ) -> Result<LeadTask>;

    /// Apply scalar changes to a task.
    async fn update_task(&self, task_id: u64, request: &UpdateTaskRequest) -> Result<LeadTask>;

    /// Delete a user task. System tasks must be refused.
    async fn remove_task(&self, task_id: u64) -> Result<()>;
}

#[async_trait]
impl<T: TaskStore + ?Sized> TaskStore for &T {
    async fn insert_task(
        &self,
        lead_id: u64,
        task_name: &str,
        category: Option<TaskCategory>,
    ) -> Result<LeadTask> {
        (**self).insert_task(lead_id, task_name, category).await
    }

    async fn update_task(&self, task_id: u64, request: &UpdateTaskRequest) -> Result<LeadTask> {
        (**self).update_task(task_id, request).await
    }

    async fn remove_task(&self, task_id: u64) -> Result<()> {
        (**self).remove_task(task_id).await
    }
}
