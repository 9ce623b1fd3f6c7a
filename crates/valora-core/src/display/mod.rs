//! Display formatting for leads, tasks and valuation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes are wrapped in newtypes so every interface prints
//! the same markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │  (Lead, Task)   │───▶│ (LeadSummaries, │───▶│     output      │
//! │                 │    │  CreateResult)  │    │   (terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use valora_core::display::{Euros, OperationStatus};
//!
//! let status = OperationStatus::success(format!("Valued at {}", Euros(1_500_000.0)));
//! assert_eq!(status.to_string(), "Success: Valued at 1.500.000 €\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{LeadSummaries, Tasks};
pub use datetime::{Euros, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::{OperationStatus, StatusLevel};
