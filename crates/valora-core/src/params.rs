//! Parameter structures for valora operations
//!
//! Interface-agnostic parameter types shared by the CLI and any other front
//! end. They carry no framework derives beyond serde; interface layers wrap
//! them with their own argument types and convert via `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Crm / Tracker │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    models::{LeadType, TaskCategory},
    ValoraError,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new lead.
///
/// System tasks for the lead type are seeded together with the lead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLead {
    /// Kind of lead
    #[serde(default)]
    pub lead_type: LeadType,
    /// Person the firm is talking to (required)
    pub contact_name: String,
    pub company_name: Option<String>,
    pub email: Option<String>,
    /// Raw phone; stored in canonical international format
    pub phone: Option<String>,
    /// IANA time zone of the lead; defaults to the firm's
    pub time_zone: Option<String>,
    /// Final valuation, for leads created from a completed wizard
    pub valuation_amount: Option<f64>,
}

impl CreateLead {
    /// Check the parameters before anything is written.
    pub fn validate(&self) -> crate::Result<()> {
        if self.contact_name.trim().is_empty() {
            return Err(ValoraError::invalid_input("contact_name")
                .with_reason("A lead needs a contact name"));
        }
        if let Some(tz) = &self.time_zone {
            jiff::tz::TimeZone::get(tz).map_err(|e| {
                ValoraError::invalid_input("time_zone").with_reason(format!("{tz}: {e}"))
            })?;
        }
        Ok(())
    }
}

/// Parameters for listing leads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLeads {
    /// Only leads of this kind
    pub lead_type: Option<LeadType>,
    /// Only leads already qualified
    #[serde(default)]
    pub qualified_only: bool,
}

/// Parameters for deleting a lead with its tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteLead {
    /// The ID of the lead to delete
    pub id: u64,
    /// Deletion must be confirmed explicitly
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding a user task to a lead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreate {
    /// ID of the lead to add the task to
    pub lead_id: u64,
    /// Display label (required)
    pub task_name: String,
    /// Optional workflow phase
    pub category: Option<TaskCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lead_requires_contact_name() {
        let params = CreateLead {
            contact_name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ValoraError::InvalidInput { ref field, .. }) if field == "contact_name"
        ));
    }

    #[test]
    fn test_create_lead_rejects_unknown_time_zone() {
        let params = CreateLead {
            contact_name: "Ana".to_string(),
            time_zone: Some("Mars/Olympus_Mons".to_string()),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
