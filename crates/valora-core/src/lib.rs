//! Core library for the valora valuation wizard and lead tracker.
//!
//! Two state machines sit at the heart of the crate:
//!
//! - [`wizard::WizardSession`] walks a visitor through the business
//!   valuation steps, validates every field and hands the collected inputs to
//!   a [`valuation::ValuationService`].
//! - [`tracker::LeadTracker`] keeps the task checklist of one lead and
//!   derives progress, overdue tasks and the auto-qualification signal.
//!
//! Both are plain, synchronous data plus async calls into their
//! collaborators. [`Crm`] is the SQLite-backed collaborator used by the
//! operator CLI; [`tracking`] and [`notify`] carry the side channels.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use valora_core::{
//!     notify::LogNotifier,
//!     valuation::SectorMultiples,
//!     wizard::{Field, WizardFlavor, WizardSession},
//!     CrmBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let crm = CrmBuilder::new().with_database_path("valora.db").build().await?;
//!
//! let mut session = WizardSession::new(WizardFlavor::Streamlined);
//! session.update_field(Field::ContactName, "Ana García");
//! // ... fill in the remaining steps, calling `next_step` in between
//! session.calculate_valuation(&SectorMultiples::default()).await?;
//!
//! if let Some(result) = session.result() {
//!     println!("{result}");
//!     let lead = crm.record_valuation(&session, &LogNotifier).await?;
//!     println!("Recorded as lead {}", lead.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod crm;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod notify;
pub mod params;
pub mod tracker;
pub mod tracking;
pub mod valuation;
pub mod wizard;

// Re-export commonly used types
pub use crm::{Crm, CrmBuilder, ValuationSubmission};
pub use db::Database;
pub use display::{CreateResult, DeleteResult, LeadSummaries, OperationStatus, Tasks, UpdateResult};
pub use error::{Result, ValoraError};
pub use models::{
    Assignee, Lead, LeadFilter, LeadProgress, LeadStatus, LeadSummary, LeadTask, LeadType,
    TaskCategory, TaskStatus, UpdateTaskRequest,
};
pub use params::{CreateLead, DeleteLead, Id, ListLeads, TaskCreate};
pub use tracker::{LeadTracker, TaskStore};
pub use valuation::{SectorMultiples, ValuationResult, ValuationService};
pub use wizard::{Field, WizardEvent, WizardFlavor, WizardSession};
