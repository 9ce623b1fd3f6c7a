//! High-level CRM API for leads and their task checklists.
//!
//! [`Crm`] is the persistence collaborator of both the wizard (completed
//! sessions become valuation leads) and the [`LeadTracker`](crate::tracker::LeadTracker)
//! (it implements [`TaskStore`](crate::tracker::TaskStore)).
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  WizardSession  │    │       Crm       │    │    Database     │
//! │  LeadTracker    │───▶│ (lead_ops,      │───▶│   (via db/)     │
//! │                 │    │  task_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!    State machines        Async facade          SQLite storage
//! ```
//!
//! Every call opens its own connection on a blocking thread, so a `Crm` is
//! cheap to clone and can be shared freely.
//!
//! # Examples
//!
//! ```rust,no_run
//! use valora_core::{params::{CreateLead, Id}, CrmBuilder, LeadType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let crm = CrmBuilder::new()
//!     .with_database_path("/tmp/valora.db")
//!     .build()
//!     .await?;
//!
//! let lead = crm
//!     .create_lead(&CreateLead {
//!         lead_type: LeadType::Contact,
//!         contact_name: "Ana García".to_string(),
//!         email: Some("ana@talleresnorte.es".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(lead.tasks.len(), 3);
//!
//! let mut tracker = crm.tracker(&Id { id: lead.id }).await?;
//! let first = tracker.tasks()[0].id;
//! tracker.update_status(first, valora_core::TaskStatus::Completed).await?;
//! assert_eq!(tracker.progress_percentage(), 33);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, ValoraError},
};

pub mod builder;
pub mod lead_ops;
pub mod submission;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::CrmBuilder;
pub use submission::ValuationSubmission;

/// Main CRM interface for managing leads and tasks.
#[derive(Debug, Clone)]
pub struct Crm {
    pub(crate) db_path: PathBuf,
}

impl Crm {
    /// Creates a CRM over the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Run `operation` against a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(ValoraError::join)?
    }
}
