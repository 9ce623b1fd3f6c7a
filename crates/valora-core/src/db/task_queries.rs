//! Lead task CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, OptionalExtension, Transaction};

use super::{parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, Result, ValoraError},
    models::{Assignee, LeadTask, LeadType, TaskCategory, TaskStatus, UpdateTaskRequest},
};

const GET_NEXT_TASK_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(task_order), -1) + 1 FROM lead_tasks WHERE lead_id = ?1";
const INSERT_TASK_SQL: &str = "INSERT INTO lead_tasks (lead_id, task_name, status, category, is_system_task, responsible_system, task_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_LEAD_TIMESTAMP_SQL: &str = "UPDATE leads SET updated_at = ?1 WHERE id = ?2";
const TASK_COLUMNS: &str = "t.id, t.lead_id, l.lead_type, t.task_name, t.status, t.category, t.is_system_task, t.due_date, t.assignee_id, t.assignee_name, t.notes, t.deliverable_url, t.responsible_system, t.task_order, t.created_at, t.updated_at";
const UPDATE_TASK_SQL: &str = "UPDATE lead_tasks SET status = ?1, due_date = ?2, assignee_id = ?3, assignee_name = ?4, notes = ?5, deliverable_url = ?6, updated_at = ?7 WHERE id = ?8";
const SELECT_TASK_REMOVAL_SQL: &str =
    "SELECT lead_id, task_order, is_system_task FROM lead_tasks WHERE id = ?1";
const DELETE_TASK_SQL: &str = "DELETE FROM lead_tasks WHERE id = ?1";
const UPDATE_TASK_ORDERS_DECREMENT_SQL: &str =
    "UPDATE lead_tasks SET task_order = task_order - 1 WHERE lead_id = ?1 AND task_order > ?2";

fn select_tasks_by_lead_sql() -> String {
    format!(
        "SELECT {TASK_COLUMNS} FROM lead_tasks t JOIN leads l ON l.id = t.lead_id WHERE t.lead_id = ?1 ORDER BY t.task_order, t.id"
    )
}

fn select_task_by_id_sql() -> String {
    format!("SELECT {TASK_COLUMNS} FROM lead_tasks t JOIN leads l ON l.id = t.lead_id WHERE t.id = ?1")
}

impl super::Database {
    /// Helper function to construct a task from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<LeadTask> {
        let assignee_id: Option<String> = row.get(8)?;
        let assignee_name: Option<String> = row.get(9)?;
        let assigned_to = assignee_id.map(|id| Assignee {
            name: assignee_name.unwrap_or_else(|| id.clone()),
            id,
        });

        Ok(LeadTask {
            id: row.get::<_, i64>(0)? as u64,
            lead_id: row.get::<_, i64>(1)? as u64,
            lead_type: parse_column(row, 2)?,
            task_name: row.get(3)?,
            status: parse_column(row, 4)?,
            category: parse_optional_column(row, 5)?,
            is_system_task: row.get(6)?,
            due_date: parse_optional_column(row, 7)?,
            assigned_to,
            notes: row.get(10)?,
            deliverable_url: row.get(11)?,
            responsible_system: row.get(12)?,
            order: row.get::<_, i64>(13)? as u32,
            created_at: parse_column(row, 14)?,
            updated_at: parse_column(row, 15)?,
        })
    }

    /// Inserts the system tasks of `lead_type` for a freshly created lead.
    pub(super) fn seed_system_tasks(
        tx: &Transaction,
        lead_id: u64,
        lead_type: LeadType,
        now: Timestamp,
    ) -> Result<Vec<LeadTask>> {
        let now_str = now.to_string();
        let mut tasks = Vec::new();

        for (order, template) in lead_type.system_tasks().iter().enumerate() {
            tx.execute(
                INSERT_TASK_SQL,
                params![
                    lead_id as i64,
                    template.task_name,
                    TaskStatus::Pending.as_str(),
                    template.category.as_str(),
                    true,
                    template.responsible_system,
                    order as i64,
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| ValoraError::database_error("Failed to insert system task", e))?;

            tasks.push(LeadTask {
                id: tx.last_insert_rowid() as u64,
                lead_id,
                lead_type,
                task_name: template.task_name.to_string(),
                status: TaskStatus::Pending,
                category: Some(template.category),
                is_system_task: true,
                due_date: None,
                assigned_to: None,
                notes: None,
                deliverable_url: None,
                responsible_system: template.responsible_system.map(String::from),
                order: order as u32,
                created_at: now,
                updated_at: now,
            });
        }

        debug!("Seeded {} system tasks for lead {lead_id}", tasks.len());
        Ok(tasks)
    }

    /// Appends a user task to the lead's checklist.
    pub fn add_task(
        &mut self,
        lead_id: u64,
        task_name: &str,
        category: Option<TaskCategory>,
    ) -> Result<LeadTask> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let lead_type: Option<String> = tx
            .query_row(
                "SELECT lead_type FROM leads WHERE id = ?1",
                params![lead_id as i64],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ValoraError::database_error("Failed to check lead existence", e))?;

        let Some(lead_type) = lead_type else {
            return Err(ValoraError::LeadNotFound { id: lead_id });
        };
        let lead_type = lead_type
            .parse::<LeadType>()
            .map_err(|reason| ValoraError::invalid_input("lead_type").with_reason(reason))?;

        let next_order: i64 = tx
            .query_row(GET_NEXT_TASK_ORDER_SQL, params![lead_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| ValoraError::database_error("Failed to get next task order", e))?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TASK_SQL,
            params![
                lead_id as i64,
                task_name,
                TaskStatus::Pending.as_str(),
                category.map(|c| c.as_str()),
                false,
                None::<String>,
                next_order,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| ValoraError::database_error("Failed to insert task", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(UPDATE_LEAD_TIMESTAMP_SQL, params![&now_str, lead_id as i64])
            .map_err(|e| ValoraError::database_error("Failed to update lead timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(LeadTask {
            id,
            lead_id,
            lead_type,
            task_name: task_name.to_string(),
            status: TaskStatus::Pending,
            category,
            is_system_task: false,
            due_date: None,
            assigned_to: None,
            notes: None,
            deliverable_url: None,
            responsible_system: None,
            order: next_order as u32,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves all tasks of a lead in checklist order.
    pub fn get_tasks(&self, lead_id: u64) -> Result<Vec<LeadTask>> {
        let mut stmt = self
            .connection
            .prepare(&select_tasks_by_lead_sql())
            .map_err(|e| ValoraError::database_error("Failed to prepare query", e))?;

        let tasks = stmt
            .query_map(params![lead_id as i64], Self::build_task_from_row)
            .map_err(|e| ValoraError::database_error("Failed to query tasks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ValoraError::database_error("Failed to fetch tasks", e))?;

        Ok(tasks)
    }

    /// Retrieves a single task by its ID.
    pub fn get_task(&self, task_id: u64) -> Result<Option<LeadTask>> {
        let mut stmt = self
            .connection
            .prepare(&select_task_by_id_sql())
            .map_err(|e| ValoraError::database_error("Failed to prepare query", e))?;

        let task = stmt
            .query_row(params![task_id as i64], Self::build_task_from_row)
            .optional()
            .map_err(|e| ValoraError::database_error("Failed to get task", e))?;

        Ok(task)
    }

    /// Applies a request to a task and returns the stored result.
    ///
    /// Last write wins; an empty request returns the task unchanged.
    pub fn update_task(&mut self, task_id: u64, request: &UpdateTaskRequest) -> Result<LeadTask> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut task = tx
            .query_row(
                &select_task_by_id_sql(),
                params![task_id as i64],
                Self::build_task_from_row,
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    ValoraError::TaskNotFound { id: task_id }
                } else {
                    ValoraError::database_error("Failed to get current task", e)
                }
            })?;

        if request.is_empty() {
            return Ok(task);
        }

        let changes = request.apply_to(&mut task);
        task.updated_at = Timestamp::now();
        let now_str = task.updated_at.to_string();
        let (assignee_id, assignee_name) = match &task.assigned_to {
            Some(assignee) => (Some(assignee.id.as_str()), Some(assignee.name.as_str())),
            None => (None, None),
        };

        tx.execute(
            UPDATE_TASK_SQL,
            params![
                task.status.as_str(),
                task.due_date.map(|d| d.to_string()),
                assignee_id,
                assignee_name,
                &task.notes,
                &task.deliverable_url,
                &now_str,
                task_id as i64
            ],
        )
        .map_err(|e| ValoraError::database_error("Failed to update task", e))?;

        tx.execute(
            UPDATE_LEAD_TIMESTAMP_SQL,
            params![&now_str, task.lead_id as i64],
        )
        .map_err(|e| ValoraError::database_error("Failed to update lead timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Task {task_id} updated: {}", changes.join(", "));
        Ok(task)
    }

    /// Removes a user task. System tasks are refused.
    pub fn remove_task(&mut self, task_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (lead_id, task_order, is_system_task): (i64, i64, bool) = tx
            .query_row(SELECT_TASK_REMOVAL_SQL, params![task_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    ValoraError::TaskNotFound { id: task_id }
                } else {
                    ValoraError::database_error("Failed to query task", e)
                }
            })?;

        if is_system_task {
            return Err(ValoraError::SystemTaskDeletion { id: task_id });
        }

        tx.execute(DELETE_TASK_SQL, params![task_id as i64])
            .map_err(|e| ValoraError::database_error("Failed to delete task", e))?;

        tx.execute(
            UPDATE_TASK_ORDERS_DECREMENT_SQL,
            params![lead_id, task_order],
        )
        .map_err(|e| ValoraError::database_error("Failed to update task orders", e))?;

        let now_str = Timestamp::now().to_string();
        tx.execute(UPDATE_LEAD_TIMESTAMP_SQL, params![&now_str, lead_id])
            .map_err(|e| ValoraError::database_error("Failed to update lead timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
