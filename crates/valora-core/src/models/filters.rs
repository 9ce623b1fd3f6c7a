//! Filter types for querying leads.

use super::{LeadStatus, LeadType};

/// Filter options for querying leads.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Only leads of this kind
    pub lead_type: Option<LeadType>,

    /// Only leads in this qualification state
    pub status: Option<LeadStatus>,
}

impl From<&crate::params::ListLeads> for LeadFilter {
    /// ```rust
    /// use valora_core::{models::{LeadFilter, LeadType}, params::ListLeads};
    ///
    /// let params = ListLeads { lead_type: Some(LeadType::Contact), qualified_only: false };
    /// let filter: LeadFilter = (&params).into();
    /// assert_eq!(filter.lead_type, Some(LeadType::Contact));
    /// assert!(filter.status.is_none());
    /// ```
    fn from(params: &crate::params::ListLeads) -> Self {
        Self {
            lead_type: params.lead_type,
            status: params.qualified_only.then_some(LeadStatus::Qualified),
        }
    }
}
