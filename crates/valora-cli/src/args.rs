//! Command-line argument definitions using clap.
//!
//! Every wrapper here converts into an interface-agnostic parameter type from
//! `valora_core::params` via `From`, so clap attributes never leak into the
//! core crate.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Crm / LeadTracker / WizardSession
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use valora_core::{
    models::{LeadType, TaskCategory, TaskStatus},
    params::{CreateLead, DeleteLead, Id, ListLeads, TaskCreate},
    wizard::WizardFlavor,
};

/// Operator console for valuation leads and their task checklists
///
/// Valora records leads coming from the valuation wizard, the contact form
/// and collaborator applications, seeds a checklist for each one and tracks
/// it until the lead is qualified.
#[derive(Parser)]
#[command(version, about, name = "valora")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/valora/valora.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage leads
    #[command(alias = "l")]
    Lead {
        #[command(subcommand)]
        command: LeadCommands,
    },
    /// Manage the task checklist of a lead
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Run the valuation wizard non-interactively and record the lead
    #[command(alias = "v")]
    Valuate(ValuateArgs),
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LeadTypeArg {
    Valuation,
    Contact,
    Collaborator,
}

impl From<LeadTypeArg> for LeadType {
    fn from(val: LeadTypeArg) -> Self {
        match val {
            LeadTypeArg::Valuation => LeadType::Valuation,
            LeadTypeArg::Contact => LeadType::Contact,
            LeadTypeArg::Collaborator => LeadType::Collaborator,
        }
    }
}

/// Task status values accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(val: TaskStatusArg) -> Self {
        match val {
            TaskStatusArg::Pending => TaskStatus::Pending,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::Completed => TaskStatus::Completed,
            TaskStatusArg::Skipped => TaskStatus::Skipped,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskCategoryArg {
    Recepcion,
    Valoracion,
    Decision,
}

impl From<TaskCategoryArg> for TaskCategory {
    fn from(val: TaskCategoryArg) -> Self {
        match val {
            TaskCategoryArg::Recepcion => TaskCategory::Recepcion,
            TaskCategoryArg::Valoracion => TaskCategory::Valoracion,
            TaskCategoryArg::Decision => TaskCategory::Decision,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FlavorArg {
    Full,
    Streamlined,
}

impl From<FlavorArg> for WizardFlavor {
    fn from(val: FlavorArg) -> Self {
        match val {
            FlavorArg::Full => WizardFlavor::Full,
            FlavorArg::Streamlined => WizardFlavor::Streamlined,
        }
    }
}

// ============================================================================
// Lead commands
// ============================================================================

/// Create a lead by hand
///
/// System tasks for the lead type are seeded automatically.
#[derive(ClapArgs)]
pub struct CreateLeadArgs {
    /// Name of the person to talk to
    pub contact_name: String,
    #[arg(short = 't', long = "type", value_enum, default_value = "contact")]
    pub lead_type: LeadTypeArg,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    /// Phone in any common format; stored as +<country><number>
    #[arg(short, long)]
    pub phone: Option<String>,
    /// IANA time zone used for due dates (defaults to Europe/Madrid)
    #[arg(long)]
    pub time_zone: Option<String>,
}

impl From<CreateLeadArgs> for CreateLead {
    fn from(val: CreateLeadArgs) -> Self {
        CreateLead {
            lead_type: val.lead_type.into(),
            contact_name: val.contact_name,
            company_name: val.company,
            email: val.email,
            phone: val.phone,
            time_zone: val.time_zone,
            valuation_amount: None,
        }
    }
}

/// List leads with their checklist progress
#[derive(ClapArgs)]
pub struct ListLeadsArgs {
    /// Only leads of this type
    #[arg(short = 't', long = "type", value_enum)]
    pub lead_type: Option<LeadTypeArg>,
    /// Only qualified leads
    #[arg(long)]
    pub qualified: bool,
}

impl From<ListLeadsArgs> for ListLeads {
    fn from(val: ListLeadsArgs) -> Self {
        ListLeads {
            lead_type: val.lead_type.map(Into::into),
            qualified_only: val.qualified,
        }
    }
}

/// Identify a lead by ID
#[derive(ClapArgs)]
pub struct LeadIdArgs {
    /// ID of the lead
    pub id: u64,
}

impl From<LeadIdArgs> for Id {
    fn from(val: LeadIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a lead and all its tasks
#[derive(ClapArgs)]
pub struct DeleteLeadArgs {
    /// ID of the lead to delete
    pub id: u64,
    /// Confirm the deletion
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteLeadArgs> for DeleteLead {
    fn from(val: DeleteLeadArgs) -> Self {
        DeleteLead {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum LeadCommands {
    /// Create a lead
    #[command(alias = "c")]
    Create(CreateLeadArgs),
    /// List leads
    #[command(aliases = ["l", "ls"])]
    List(ListLeadsArgs),
    /// Show a lead with its tasks
    #[command(alias = "s")]
    Show(LeadIdArgs),
    /// Mark a fully completed valuation lead as qualified
    #[command(alias = "q")]
    Qualify(LeadIdArgs),
    /// Show the wizard data a valuation lead was created from
    Submission(LeadIdArgs),
    /// Delete a lead permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteLeadArgs),
}

// ============================================================================
// Task commands
// ============================================================================

/// Add a user task to a lead
#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// ID of the lead
    pub lead_id: u64,
    /// Task label
    pub task_name: String,
    #[arg(short, long, value_enum)]
    pub category: Option<TaskCategoryArg>,
}

impl From<AddTaskArgs> for TaskCreate {
    fn from(val: AddTaskArgs) -> Self {
        TaskCreate {
            lead_id: val.lead_id,
            task_name: val.task_name,
            category: val.category.map(Into::into),
        }
    }
}

#[derive(ClapArgs)]
pub struct TaskStatusArgs {
    /// ID of the task
    pub id: u64,
    #[arg(value_enum)]
    pub status: TaskStatusArg,
}

#[derive(ClapArgs)]
pub struct AssignTaskArgs {
    /// ID of the task
    pub id: u64,
    /// Identifier of the operator
    pub assignee_id: String,
    /// Display name of the operator (defaults to the identifier)
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(ClapArgs)]
pub struct DueTaskArgs {
    /// ID of the task
    pub id: u64,
    /// Due date as YYYY-MM-DD
    pub date: jiff::civil::Date,
}

#[derive(ClapArgs)]
pub struct NotesTaskArgs {
    /// ID of the task
    pub id: u64,
    pub notes: String,
}

#[derive(ClapArgs)]
pub struct DeliverableTaskArgs {
    /// ID of the task
    pub id: u64,
    /// Link to the delivered document
    pub url: String,
}

#[derive(ClapArgs)]
pub struct TaskIdArgs {
    /// ID of the task
    pub id: u64,
}

#[derive(ClapArgs)]
pub struct OverdueArgs {
    /// ID of the lead
    pub lead_id: u64,
    /// Reference day (defaults to today in the lead's time zone)
    #[arg(long)]
    pub today: Option<jiff::civil::Date>,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a user task to a lead
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List the tasks of a lead
    #[command(aliases = ["l", "ls"])]
    List(LeadIdArgs),
    /// Change the status of a task
    #[command(alias = "st")]
    Status(TaskStatusArgs),
    /// Assign a task to an operator
    Assign(AssignTaskArgs),
    /// Set the due date of a task
    Due(DueTaskArgs),
    /// Replace the notes of a task
    Notes(NotesTaskArgs),
    /// Attach a deliverable link to a task
    Deliverable(DeliverableTaskArgs),
    /// Delete a user task
    #[command(aliases = ["d", "rm"])]
    Delete(TaskIdArgs),
    /// List overdue tasks of a lead
    Overdue(OverdueArgs),
}

// ============================================================================
// Valuation wizard
// ============================================================================

/// Wizard input given as flags. Amounts accept `1.500.000`, `1,500,000`
/// and similar spellings.
#[derive(ClapArgs)]
pub struct ValuateArgs {
    #[arg(long, value_enum, default_value = "full")]
    pub flavor: FlavorArg,
    #[arg(long)]
    pub contact_name: Option<String>,
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub tax_id: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Industry slug, e.g. manufacturing or technology
    #[arg(long)]
    pub industry: Option<String>,
    /// Employee range: 1-10, 11-50, 51-200, 201-500 or 500+
    #[arg(long)]
    pub employees: Option<String>,
    #[arg(long)]
    pub revenue: Option<String>,
    #[arg(long)]
    pub ebitda: Option<String>,
    /// Normalization adjustment added to EBITDA
    #[arg(long)]
    pub adjustment: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub years: Option<String>,
    /// Percentage of the company owned by the contact
    #[arg(long)]
    pub ownership: Option<String>,
    #[arg(long)]
    pub competitive_advantage: Option<String>,
    /// Compute the valuation without recording a lead
    #[arg(long)]
    pub dry_run: bool,
}
