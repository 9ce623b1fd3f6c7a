//! Lead operations for the Crm.

use log::info;

use super::Crm;
use crate::{
    error::{Result, ValoraError},
    models::{Lead, LeadFilter, LeadProgress, LeadStatus, LeadSummary},
    params::{CreateLead, DeleteLead, Id, ListLeads},
    tracker::LeadTracker,
};

impl Crm {
    /// Creates a lead and seeds the system tasks of its type.
    ///
    /// # Errors
    ///
    /// Returns `ValoraError::InvalidInput` for a blank contact name or an
    /// unknown time zone.
    pub async fn create_lead(&self, params: &CreateLead) -> Result<Lead> {
        params.validate()?;
        let params = params.clone();

        let lead = self
            .with_database(move |db| db.create_lead(&params, None))
            .await?;
        info!(
            "Created {} lead {} with {} system tasks",
            lead.lead_type,
            lead.id,
            lead.tasks.len()
        );
        Ok(lead)
    }

    /// Retrieves a lead with its tasks.
    pub async fn get_lead(&self, params: &Id) -> Result<Option<Lead>> {
        let lead_id = params.id;
        self.with_database(move |db| db.get_lead(lead_id)).await
    }

    /// Lists leads, newest first, with their tasks loaded.
    pub async fn list_leads(&self, filter: LeadFilter) -> Result<Vec<Lead>> {
        self.with_database(move |db| db.list_leads(&filter)).await
    }

    /// Handle listing leads as summaries with checklist progress.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use valora_core::{params::ListLeads, CrmBuilder};
    /// # async {
    /// let crm = CrmBuilder::new().build().await?;
    /// let summaries = crm.list_leads_summary(&ListLeads::default()).await?;
    /// println!("{summaries}");
    /// # Result::<(), valora_core::ValoraError>::Ok(())
    /// # };
    /// ```
    pub async fn list_leads_summary(
        &self,
        params: &ListLeads,
    ) -> Result<crate::display::LeadSummaries> {
        let leads = self.list_leads(LeadFilter::from(params)).await?;
        let summaries: Vec<LeadSummary> = leads.iter().map(Into::into).collect();
        Ok(crate::display::LeadSummaries(summaries))
    }

    /// Handle deleting a lead with all its tasks.
    ///
    /// Deletion must be confirmed. Returns the lead as it was before the
    /// deletion, or `None` if it did not exist.
    pub async fn delete_lead(&self, params: &DeleteLead) -> Result<Option<Lead>> {
        if !params.confirmed {
            return Err(ValoraError::invalid_input("confirmed")
                .with_reason("Deleting a lead removes all its tasks and must be confirmed"));
        }

        let lead_id = params.id;
        let Some(lead) = self.get_lead(&Id { id: lead_id }).await? else {
            return Ok(None);
        };

        self.with_database(move |db| db.delete_lead(lead_id)).await?;
        info!("Deleted lead {lead_id}");
        Ok(Some(lead))
    }

    /// Marks a lead as qualified.
    ///
    /// Only valuation leads whose checklist is fully completed can be
    /// qualified.
    ///
    /// # Errors
    ///
    /// Returns `ValoraError::LeadNotFound` if the lead doesn't exist and
    /// `ValoraError::InvalidInput` if it is not ready for qualification.
    pub async fn mark_qualified(&self, params: &Id) -> Result<Lead> {
        let lead_id = params.id;
        let lead = self
            .get_lead(params)
            .await?
            .ok_or(ValoraError::LeadNotFound { id: lead_id })?;

        if lead.status == LeadStatus::Qualified {
            return Ok(lead);
        }

        let progress = LeadProgress::from_tasks(lead.lead_type, &lead.tasks);
        if !progress.auto_qualified {
            return Err(ValoraError::invalid_input("status").with_reason(format!(
                "Lead {lead_id} is at {}% and cannot be qualified yet",
                progress.percentage
            )));
        }

        let qualified = self
            .with_database(move |db| db.set_lead_status(lead_id, LeadStatus::Qualified))
            .await?
            .ok_or(ValoraError::LeadNotFound { id: lead_id })?;
        info!("Lead {lead_id} qualified");
        Ok(qualified)
    }

    /// Loads a lead into a [`LeadTracker`] that writes through this CRM.
    pub async fn tracker(&self, params: &Id) -> Result<LeadTracker<Crm>> {
        let lead = self
            .get_lead(params)
            .await?
            .ok_or(ValoraError::LeadNotFound { id: params.id })?;
        Ok(LeadTracker::new(self.clone(), lead))
    }
}
