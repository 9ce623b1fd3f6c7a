//! Recording completed wizard sessions as valuation leads.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::Crm;
use crate::{
    error::{Result, ValoraError},
    models::{Lead, LeadType},
    notify::Notifier,
    params::{CreateLead, Id},
    valuation::ValuationResult,
    wizard::{ValuationInputs, WizardFlavor, WizardSession},
};

/// Everything the visitor entered plus what the engine computed, stored
/// with the lead as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationSubmission {
    pub flavor: WizardFlavor,
    pub inputs: ValuationInputs,
    pub result: ValuationResult,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ValuationSubmission {
    /// Snapshot of a completed session, or `None` while it has no result.
    pub fn from_session(session: &WizardSession) -> Option<Self> {
        session.result().map(|result| Self {
            flavor: session.flavor(),
            inputs: session.fields().clone(),
            result: *result,
        })
    }

    /// Lead parameters derived from the visitor's basic info.
    pub fn to_create_lead(&self) -> CreateLead {
        let info = &self.inputs.basic_info;
        CreateLead {
            lead_type: LeadType::Valuation,
            contact_name: info.contact_name.trim().to_string(),
            company_name: non_blank(&info.company_name),
            email: non_blank(&info.email),
            phone: non_blank(&info.phone),
            time_zone: None,
            valuation_amount: Some(self.result.final_valuation),
        }
    }
}

impl Crm {
    /// Persists a completed wizard session as a valuation lead, then
    /// notifies.
    ///
    /// A failing notifier is logged; the stored lead is kept and returned.
    ///
    /// # Errors
    ///
    /// Returns `ValoraError::InvalidInput` if the session has no result yet.
    pub async fn record_valuation(
        &self,
        session: &WizardSession,
        notifier: &dyn Notifier,
    ) -> Result<Lead> {
        let submission = ValuationSubmission::from_session(session).ok_or_else(|| {
            ValoraError::invalid_input("result")
                .with_reason("Only completed valuations can be recorded")
        })?;

        let params = submission.to_create_lead();
        params.validate()?;
        let payload = serde_json::to_string(&submission)?;

        let lead = self
            .with_database(move |db| db.create_lead(&params, Some(&payload)))
            .await?;
        info!(
            "Recorded {} valuation as lead {}",
            submission.flavor, lead.id
        );

        if let Err(e) = notifier
            .valuation_recorded(&lead, &submission.result)
            .await
        {
            warn!("Notification for lead {} failed: {e}", lead.id);
        }

        Ok(lead)
    }

    /// The wizard submission stored with a lead; `None` for leads that did
    /// not come from the wizard.
    pub async fn get_submission(&self, params: &Id) -> Result<Option<ValuationSubmission>> {
        let lead_id = params.id;
        let payload = self
            .with_database(move |db| db.get_submission(lead_id))
            .await?;

        payload
            .map(|json| serde_json::from_str(&json).map_err(ValoraError::from))
            .transpose()
    }
}
