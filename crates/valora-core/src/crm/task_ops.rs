//! Task operations for the Crm.

use async_trait::async_trait;
use log::info;

use super::Crm;
use crate::{
    error::{Result, ValoraError},
    models::{LeadTask, TaskCategory, UpdateTaskRequest},
    params::{Id, TaskCreate},
    tracker::TaskStore,
};

impl Crm {
    /// Appends a user task to a lead.
    ///
    /// # Errors
    ///
    /// Returns `ValoraError::InvalidInput` for a blank name and
    /// `ValoraError::LeadNotFound` if the lead doesn't exist.
    pub async fn add_task(&self, params: &TaskCreate) -> Result<LeadTask> {
        let task_name = params.task_name.trim().to_string();
        if task_name.is_empty() {
            return Err(ValoraError::invalid_input("task_name").with_reason("A task needs a name"));
        }
        let lead_id = params.lead_id;
        let category = params.category;

        self.with_database(move |db| db.add_task(lead_id, &task_name, category))
            .await
    }

    /// Retrieves a task by its ID.
    pub async fn get_task(&self, params: &Id) -> Result<Option<LeadTask>> {
        let task_id = params.id;
        self.with_database(move |db| db.get_task(task_id)).await
    }

    /// Retrieves the tasks of a lead in checklist order.
    pub async fn get_tasks(&self, params: &Id) -> Result<crate::display::Tasks> {
        let lead_id = params.id;
        let tasks = self
            .with_database(move |db| {
                if !db.lead_exists(lead_id)? {
                    return Err(ValoraError::LeadNotFound { id: lead_id });
                }
                db.get_tasks(lead_id)
            })
            .await?;
        Ok(crate::display::Tasks(tasks))
    }

    /// Removes a user task.
    ///
    /// # Errors
    ///
    /// Returns `ValoraError::SystemTaskDeletion` for seeded tasks.
    pub async fn remove_task(&self, params: &Id) -> Result<()> {
        let task_id = params.id;
        self.with_database(move |db| db.remove_task(task_id)).await?;
        info!("Removed task {task_id}");
        Ok(())
    }
}

#[async_trait]
impl TaskStore for Crm {
    async fn insert_task(
        &self,
        lead_id: u64,
        task_name: &str,
        category: Option<TaskCategory>,
    ) -> Result<LeadTask> {
        self.add_task(&TaskCreate {
            lead_id,
            task_name: task_name.to_string(),
            category,
        })
        .await
    }

    async fn update_task(&self, task_id: u64, request: &UpdateTaskRequest) -> Result<LeadTask> {
        let request = request.clone();
        self.with_database(move |db| db.update_task(task_id, &request))
            .await
    }

    async fn remove_task(&self, task_id: u64) -> Result<()> {
        Crm::remove_task(self, &Id { id: task_id }).await
    }
}
