//! Lead model definition and the partial-to-complete boundary conversion.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{LeadStatus, LeadTask, LeadType};

/// Time zone assumed for leads that never declared one.
pub const DEFAULT_TIME_ZONE: &str = "Europe/Madrid";

/// Represents a complete lead with its checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    /// Unique identifier for the lead
    pub id: u64,

    /// Kind of lead
    pub lead_type: LeadType,

    /// CRM qualification status
    #[serde(default)]
    pub status: LeadStatus,

    /// Person the firm is talking to
    pub contact_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone in canonical international format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// IANA time zone used for due-date comparisons
    pub time_zone: String,

    /// Final valuation produced by the wizard (valuation leads only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_amount: Option<f64>,

    /// Timestamp when the lead was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the lead or one of its tasks last changed (UTC)
    pub updated_at: Timestamp,

    /// Associated tasks (lazy-loaded by default)
    #[serde(default)]
    pub tasks: Vec<LeadTask>,
}

/// A lead as it comes out of storage or an import: every column may be
/// missing.
///
/// Convert it into a [`Lead`] exactly once, at the boundary, so the rest of
/// the crate never has to defend against absent values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: u64,
    pub lead_type: Option<LeadType>,
    pub status: Option<LeadStatus>,
    pub contact_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub time_zone: Option<String>,
    pub valuation_amount: Option<f64>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl From<LeadRecord> for Lead {
    fn from(record: LeadRecord) -> Self {
        let created_at = record.created_at.unwrap_or(Timestamp::UNIX_EPOCH);
        let contact_name = record
            .contact_name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| record.company_name.clone())
            .unwrap_or_else(|| "Unknown contact".to_string());

        Self {
            id: record.id,
            lead_type: record.lead_type.unwrap_or_default(),
            status: record.status.unwrap_or_default(),
            contact_name,
            company_name: record.company_name.filter(|c| !c.trim().is_empty()),
            email: record.email.filter(|e| !e.trim().is_empty()),
            phone: record.phone.filter(|p| !p.trim().is_empty()),
            time_zone: record
                .time_zone
                .filter(|tz| !tz.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string()),
            valuation_amount: record.valuation_amount,
            created_at,
            updated_at: record.updated_at.unwrap_or(created_at),
            tasks: Vec::new(),
        }
    }
}
