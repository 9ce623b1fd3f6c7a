//! Lead progress tracking.
//!
//! A [`LeadTracker`] owns the in-memory checklist of one lead. Mutations go
//! through a [`TaskStore`] first; the list changes only when the store
//! succeeds, so a failed write leaves it exactly as it was.

mod store;


use jiff::{civil::Date, tz::TimeZone, Timestamp};
use log::debug;

pub use store::TaskStore;

use crate::{
    error::{Result, ValoraError},
    models::{
        Assignee, Lead, LeadProgress, LeadTask, LeadType, TaskCategory, TaskStatus,
        UpdateTaskRequest,
    },
};

/// Checklist state machine for a single lead.
#[derive(Debug)]
pub struct LeadTracker<S> {
    store: S,
    lead_id: u64,
    lead_type: LeadType,
    time_zone: String,
    tasks: Vec<LeadTask>,
}

impl<S: TaskStore> LeadTracker<S> {
    /// Track `lead`, taking ownership of its loaded tasks.
    pub fn new(store: S, lead: Lead) -> Self {
        let mut tasks = lead.tasks;
        tasks.sort_by_key(|task| (task.order, task.id));

        Self {
            store,
            lead_id: lead.id,
            lead_type: lead.lead_type,
            time_zone: lead.time_zone,
            tasks,
        }
    }

    pub fn lead_id(&self) -> u64 {
        self.lead_id
    }

    pub fn lead_type(&self) -> LeadType {
        self.lead_type
    }

    pub fn tasks(&self) -> &[LeadTask] {
        &self.tasks
    }

    pub fn task(&self, id: u64) -> Option<&LeadTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(ValoraError::TaskNotFound { id })
    }

    /// Append a pending user task.
    pub async fn create_task(
        &mut self,
        task_name: &str,
        category: Option<TaskCategory>,
    ) -> Result<&LeadTask> {
        let task_name = task_name.trim();
        if task_name.is_empty() {
            return Err(ValoraError::invalid_input("task_name").with_reason("Task name is required"));
        }

        let task = self.store.insert_task(self.lead_id, task_name, category).await?;
        debug!("Lead {}: created task {} '{}'", self.lead_id, task.id, task.task_name);

        self.tasks.push(task);
        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Delete a user task. System tasks are refused without touching the
    /// store.
    pub async fn delete_task(&mut self, id: u64) -> Result<()> {
        let index = self.position(id)?;
        if self.tasks[index].is_system_task {
            return Err(ValoraError::SystemTaskDeletion { id });
        }

        self.store.remove_task(id).await?;
        debug!("Lead {}: deleted task {id}", self.lead_id);

        let removed = self.tasks.remove(index);
        // the store closes the gap in the checklist order
        for task in &mut self.tasks {
            if task.order > removed.order {
                task.order -= 1;
            }
        }
        Ok(())
    }

    /// Apply a request through the store and mirror the stored task.
    pub async fn update_task(&mut self, id: u64, request: &UpdateTaskRequest) -> Result<&LeadTask> {
        let index = self.position(id)?;

        let stored = self.store.update_task(id, request).await?;
        debug!("Lead {}: updated task {id}", self.lead_id);

        self.tasks[index] = stored;
        Ok(&self.tasks[index])
    }

    /// Move a task to any status.
    pub async fn update_status(&mut self, id: u64, status: TaskStatus) -> Result<&LeadTask> {
        self.update_task(id, &UpdateTaskRequest::status(status)).await
    }

    /// Assign a task; the status is left alone.
    pub async fn assign_task(
        &mut self,
        id: u64,
        assignee_id: &str,
        assignee_name: &str,
    ) -> Result<&LeadTask> {
        let request = UpdateTaskRequest {
            assigned_to: Some(Assignee {
                id: assignee_id.to_string(),
                name: assignee_name.to_string(),
            }),
            ..Default::default()
        };
        self.update_task(id, &request).await
    }

    pub async fn update_due_date(&mut self, id: u64, due_date: Date) -> Result<&LeadTask> {
        let request = UpdateTaskRequest {
            due_date: Some(due_date),
            ..Default::default()
        };
        self.update_task(id, &request).await
    }

    pub async fn update_notes(&mut self, id: u64, notes: &str) -> Result<&LeadTask> {
        let request = UpdateTaskRequest {
            notes: Some(notes.to_string()),
            ..Default::default()
        };
        self.update_task(id, &request).await
    }

    /// Attach a deliverable link.
    ///
    /// Deliverables belong on `valoracion` tasks; callers check
    /// [`TaskCategory::accepts_deliverable`] before offering this.
    pub async fn upload_deliverable(&mut self, id: u64, url: &str) -> Result<&LeadTask> {
        let request = UpdateTaskRequest {
            deliverable_url: Some(url.to_string()),
            ..Default::default()
        };
        self.update_task(id, &request).await
    }

    /// Tasks not completed whose due date is before `today`.
    pub fn overdue_tasks(&self, today: Date) -> Vec<&LeadTask> {
        self.tasks.iter().filter(|task| task.is_overdue(today)).collect()
    }

    /// [`overdue_tasks`](Self::overdue_tasks) for the current day in the
    /// lead's time zone.
    pub fn overdue_tasks_now(&self) -> Result<Vec<&LeadTask>> {
        Ok(self.overdue_tasks(self.today()?))
    }

    /// Current calendar day in the lead's time zone.
    pub fn today(&self) -> Result<Date> {
        let tz = TimeZone::get(&self.time_zone).map_err(|e| {
            ValoraError::invalid_input("time_zone").with_reason(e.to_string())
        })?;
        Ok(Timestamp::now().to_zoned(tz).date())
    }

    /// Pending and in-progress tasks.
    pub fn active_tasks(&self) -> Vec<&LeadTask> {
        self.tasks.iter().filter(|task| task.status.is_active()).collect()
    }

    pub fn tasks_in_category(&self, category: TaskCategory) -> Vec<&LeadTask> {
        self.tasks
            .iter()
            .filter(|task| task.category == Some(category))
            .collect()
    }

    pub fn progress(&self) -> LeadProgress {
        LeadProgress::from_tasks(self.lead_type, &self.tasks)
    }

    pub fn completed_count(&self) -> u32 {
        self.progress().completed
    }

    pub fn total_count(&self) -> u32 {
        self.progress().total
    }

    /// `round(completed / total * 100)`; 0 with no tasks.
    pub fn progress_percentage(&self) -> u8 {
        self.progress().percentage
    }

    /// Every task of a valuation lead is completed.
    pub fn is_auto_qualified(&self) -> bool {
        self.progress().auto_qualified
    }
}
