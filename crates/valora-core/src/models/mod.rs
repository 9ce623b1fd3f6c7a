//! Data models for leads and their task checklists.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation apart from the data
//! structures.
//!
//! # Partial and complete leads
//!
//! Persisted lead rows can be partially populated. They are read as
//! [`LeadRecord`] and converted into [`Lead`] once, at the storage boundary,
//! with every default filled in. Code past that boundary works with complete
//! values only.
//!
//! # Examples
//!
//! ```rust
//! use valora_core::models::{LeadProgress, LeadTask, LeadType, TaskStatus};
//! use jiff::Timestamp;
//!
//! let task = LeadTask {
//!     id: 1,
//!     lead_id: 1,
//!     lead_type: LeadType::Valuation,
//!     task_name: "Qualification call".to_string(),
//!     status: TaskStatus::Completed,
//! #   category: None,
//! #   is_system_task: true,
//! #   due_date: None,
//! #   assigned_to: None,
//! #   notes: None,
//! #   deliverable_url: None,
//! #   responsible_system: None,
//! #   order: 0,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! let progress = LeadProgress::from_tasks(LeadType::Valuation, &[task]);
//! assert_eq!(progress.percentage, 100);
//! assert!(progress.auto_qualified);
//! ```

pub mod filters;
pub mod lead;
pub mod requests;
pub mod status;
pub mod summary;
pub mod task;
pub mod templates;


pub use filters::LeadFilter;
pub use lead::{Lead, LeadRecord, DEFAULT_TIME_ZONE};
pub use requests::UpdateTaskRequest;
pub use status::{LeadStatus, LeadType, TaskCategory, TaskStatus};
pub use summary::{progress_percentage, LeadProgress, LeadSummary};
pub use task::{Assignee, LeadTask};
pub use templates::SystemTaskTemplate;
