//! Lead CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::parse_optional_column;
use crate::{
    error::{DatabaseResultExt, Result, ValoraError},
    models::{Lead, LeadFilter, LeadRecord, LeadStatus},
    params::CreateLead,
    wizard::phone,
};

const INSERT_LEAD_SQL: &str = "INSERT INTO leads (lead_type, status, contact_name, company_name, email, phone, time_zone, valuation_amount, submission, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const LEAD_COLUMNS: &str = "id, lead_type, status, contact_name, company_name, email, phone, time_zone, valuation_amount, created_at, updated_at";
const CHECK_LEAD_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM leads WHERE id = ?1)";
const UPDATE_LEAD_STATUS_SQL: &str = "UPDATE leads SET status = ?1, updated_at = ?2 WHERE id = ?3";
const SELECT_SUBMISSION_SQL: &str = "SELECT submission FROM leads WHERE id = ?1";
const DELETE_LEAD_TASKS_SQL: &str = "DELETE FROM lead_tasks WHERE lead_id = ?1";
const DELETE_LEAD_SQL: &str = "DELETE FROM leads WHERE id = ?1";

impl super::Database {
    /// Reads a lead row into its partial form.
    fn build_lead_record_from_row(row: &rusqlite::Row) -> rusqlite::Result<LeadRecord> {
        Ok(LeadRecord {
            id: row.get::<_, i64>(0)? as u64,
            lead_type: parse_optional_column(row, 1)?,
            status: parse_optional_column(row, 2)?,
            contact_name: row.get(3)?,
            company_name: row.get(4)?,
            email: row.get(5)?,
            phone: row.get(6)?,
            time_zone: row.get(7)?,
            valuation_amount: row.get(8)?,
            created_at: parse_optional_column(row, 9)?,
            updated_at: parse_optional_column(row, 10)?,
        })
    }

    /// Creates a lead and seeds the system tasks for its type in the same
    /// transaction.
    ///
    /// The phone is stored in canonical international format. `submission`
    /// carries the serialized wizard data of valuation leads.
    pub fn create_lead(&mut self, lead: &CreateLead, submission: Option<&str>) -> Result<Lead> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let phone = lead
            .phone
            .as_deref()
            .map(phone::normalize)
            .filter(|p| !p.is_empty());

        tx.execute(
            INSERT_LEAD_SQL,
            params![
                lead.lead_type.as_str(),
                LeadStatus::New.as_str(),
                lead.contact_name.trim(),
                lead.company_name.as_deref(),
                lead.email.as_deref(),
                phone.as_deref(),
                lead.time_zone.as_deref(),
                lead.valuation_amount,
                submission,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| ValoraError::database_error("Failed to insert lead", e))?;

        let id = tx.last_insert_rowid() as u64;
        let tasks = Self::seed_system_tasks(&tx, id, lead.lead_type, now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        let mut created = Lead::from(LeadRecord {
            id,
            lead_type: Some(lead.lead_type),
            status: Some(LeadStatus::New),
            contact_name: Some(lead.contact_name.trim().to_string()),
            company_name: lead.company_name.clone(),
            email: lead.email.clone(),
            phone,
            time_zone: lead.time_zone.clone(),
            valuation_amount: lead.valuation_amount,
            created_at: Some(now),
            updated_at: Some(now),
        });
        created.tasks = tasks;
        Ok(created)
    }

    /// Retrieves a lead with its tasks.
    pub fn get_lead(&self, id: u64) -> Result<Option<Lead>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"))
            .map_err(|e| ValoraError::database_error("Failed to prepare query", e))?;

        let record = stmt
            .query_row(params![id as i64], Self::build_lead_record_from_row)
            .optional()
            .map_err(|e| ValoraError::database_error("Failed to query lead", e))?;

        let Some(record) = record else {
            return Ok(None);
        };

        let mut lead = Lead::from(record);
        lead.tasks = self.get_tasks(lead.id)?;
        Ok(Some(lead))
    }

    /// Lists leads, newest first, with their tasks loaded.
    pub fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>> {
        let mut query = format!("SELECT {LEAD_COLUMNS} FROM leads");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(lead_type) = filter.lead_type {
            conditions.push("lead_type = ?");
            params_vec.push(Box::new(lead_type.as_str()));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| ValoraError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let records = stmt
            .query_map(&params_refs[..], Self::build_lead_record_from_row)
            .map_err(|e| ValoraError::database_error("Failed to query leads", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ValoraError::database_error("Failed to fetch leads", e))?;

        let mut leads: Vec<Lead> = records.into_iter().map(Lead::from).collect();
        for lead in &mut leads {
            lead.tasks = self.get_tasks(lead.id)?;
        }

        Ok(leads)
    }

    /// Sets the qualification status of a lead.
    /// Returns `None` if the lead doesn't exist.
    pub fn set_lead_status(&mut self, id: u64, status: LeadStatus) -> Result<Option<Lead>> {
        let now_str = Timestamp::now().to_string();
        let rows_affected = self
            .connection
            .execute(
                UPDATE_LEAD_STATUS_SQL,
                params![status.as_str(), &now_str, id as i64],
            )
            .map_err(|e| ValoraError::database_error("Failed to update lead status", e))?;

        if rows_affected == 0 {
            return Ok(None);
        }

        self.get_lead(id)
    }

    /// Serialized wizard submission stored with a lead, if any.
    pub fn get_submission(&self, id: u64) -> Result<Option<String>> {
        let submission: Option<Option<String>> = self
            .connection
            .query_row(SELECT_SUBMISSION_SQL, params![id as i64], |row| row.get(0))
            .optional()
            .map_err(|e| ValoraError::database_error("Failed to query submission", e))?;

        match submission {
            Some(submission) => Ok(submission),
            None => Err(ValoraError::LeadNotFound { id }),
        }
    }

    /// Whether a lead with the given ID exists.
    pub fn lead_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_LEAD_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .map_err(|e| ValoraError::database_error("Failed to check lead existence", e))
    }

    /// Permanently deletes a lead and all its tasks.
    pub fn delete_lead(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_LEAD_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .map_err(|e| ValoraError::database_error("Failed to check lead existence", e))?;

        if !exists {
            return Err(ValoraError::LeadNotFound { id });
        }

        tx.execute(DELETE_LEAD_TASKS_SQL, params![id as i64])
            .map_err(|e| ValoraError::database_error("Failed to delete lead tasks", e))?;

        tx.execute(DELETE_LEAD_SQL, params![id as i64])
            .map_err(|e| ValoraError::database_error("Failed to delete lead", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
