//! Notification dispatch for newly recorded valuations.

use async_trait::async_trait;
use log::info;

use crate::{error::Result, models::Lead, valuation::ValuationResult};

/// Tells the team (and the visitor) that a valuation was recorded.
///
/// Delivery failures are reported to the caller, which logs them; a failed
/// notification never undoes the stored lead.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn valuation_recorded(&self, lead: &Lead, result: &ValuationResult) -> Result<()>;
}

/// Notifier that only logs what would be sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn valuation_recorded(&self, lead: &Lead, result: &ValuationResult) -> Result<()> {
        info!(
            "Valuation of {:.0} EUR recorded for lead {} ({} <{}>)",
            result.final_valuation,
            lead.id,
            lead.company_name.as_deref().unwrap_or(&lead.contact_name),
            lead.email.as_deref().unwrap_or("no email"),
        );
        Ok(())
    }
}
