//! Command handlers: turn parsed arguments into Crm, LeadTracker and
//! WizardSession calls and render the outcome.

use anyhow::{anyhow, bail, Result};
use log::debug;
use valora_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    notify::LogNotifier,
    params::{Id, ListLeads},
    tracking::{publish, LogSink},
    wizard::{Field, WizardSession},
    Crm, LeadStatus, LeadTracker, SectorMultiples, TaskStatus, Tasks,
};

use crate::{
    args::{LeadCommands, TaskCommands, ValuateArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    crm: Crm,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(crm: Crm, renderer: TerminalRenderer) -> Self {
        Self { crm, renderer }
    }

    pub async fn list_leads(&self, params: &ListLeads) -> Result<()> {
        let summaries = self.crm.list_leads_summary(params).await?;
        self.renderer.render(&summaries.to_string())
    }

    pub async fn handle_lead_command(&self, command: LeadCommands) -> Result<()> {
        match command {
            LeadCommands::Create(args) => {
                let lead = self.crm.create_lead(&args.into()).await?;
                self.renderer.render(&CreateResult::new(lead).to_string())
            }
            LeadCommands::List(args) => self.list_leads(&args.into()).await,
            LeadCommands::Show(args) => {
                let id = args.id;
                match self.crm.get_lead(&args.into()).await? {
                    Some(lead) => self.renderer.render(&lead.to_string()),
                    None => bail!("Lead with ID {id} not found"),
                }
            }
            LeadCommands::Qualify(args) => {
                let lead = self.crm.mark_qualified(&args.into()).await?;
                self.renderer.render(
                    &OperationStatus::success(format!("Lead {} qualified", lead.id)).to_string(),
                )
            }
            LeadCommands::Submission(args) => {
                let id = args.id;
                match self.crm.get_submission(&args.into()).await? {
                    Some(submission) => {
                        let json = serde_json::to_string_pretty(&submission)?;
                        self.renderer
                            .render(&format!("# Submission of lead {id}\n\n{json}\n"))
                    }
                    None => self.renderer.render(
                        &OperationStatus::warning(format!(
                            "Lead {id} was not created by the valuation wizard"
                        ))
                        .to_string(),
                    ),
                }
            }
            LeadCommands::Delete(args) => {
                let id = args.id;
                match self.crm.delete_lead(&args.into()).await? {
                    Some(lead) => self.renderer.render(&DeleteResult::new(lead).to_string()),
                    None => bail!("Lead with ID {id} not found"),
                }
            }
        }
    }

    /// Load the tracker of the lead owning `task_id`.
    async fn tracker_for_task(&self, task_id: u64) -> Result<LeadTracker<Crm>> {
        let task = self
            .crm
            .get_task(&Id { id: task_id })
            .await?
            .ok_or_else(|| anyhow!("Task with ID {task_id} not found"))?;
        Ok(self.crm.tracker(&Id { id: task.lead_id }).await?)
    }

    /// Point the operator at `lead qualify` once a valuation lead is done.
    async fn suggest_qualification(&self, tracker: &LeadTracker<Crm>) -> Result<()> {
        if !tracker.is_auto_qualified() {
            return Ok(());
        }
        let lead = self.crm.get_lead(&Id { id: tracker.lead_id() }).await?;
        if matches!(lead, Some(ref lead) if lead.status == LeadStatus::New) {
            self.renderer.render(
                &OperationStatus::success(format!(
                    "Every task of lead {0} is completed; run `valora lead qualify {0}`",
                    tracker.lead_id()
                ))
                .to_string(),
            )?;
        }
        Ok(())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let mut tracker = self.crm.tracker(&Id { id: args.lead_id }).await?;
                let task = tracker
                    .create_task(&args.task_name, args.category.map(Into::into))
                    .await?
                    .clone();
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::List(args) => {
                let tracker = self.crm.tracker(&args.into()).await?;
                let tasks = Tasks(tracker.tasks().to_vec());
                self.renderer.render(&format!(
                    "# Lead {} ({})\n\n{tasks}",
                    tracker.lead_id(),
                    tracker.progress()
                ))
            }
            TaskCommands::Status(args) => {
                let mut tracker = self.tracker_for_task(args.id).await?;
                let status = TaskStatus::from(args.status);
                let before = tracker.task(args.id).map(|t| t.status);
                let task = tracker.update_status(args.id, status).await?.clone();

                let changes = match before {
                    Some(before) if before != status => vec![format!("Status: {before} → {status}")],
                    _ => Vec::new(),
                };
                self.renderer
                    .render(&UpdateResult::with_changes(task, changes).to_string())?;
                self.suggest_qualification(&tracker).await
            }
            TaskCommands::Assign(args) => {
                let mut tracker = self.tracker_for_task(args.id).await?;
                let name = args.name.unwrap_or_else(|| args.assignee_id.clone());
                let task = tracker
                    .assign_task(args.id, &args.assignee_id, &name)
                    .await?
                    .clone();
                self.renderer.render(
                    &UpdateResult::with_changes(task, vec![format!("Assigned to {name}")])
                        .to_string(),
                )
            }
            TaskCommands::Due(args) => {
                let mut tracker = self.tracker_for_task(args.id).await?;
                let task = tracker.update_due_date(args.id, args.date).await?.clone();
                self.renderer.render(
                    &UpdateResult::with_changes(task, vec![format!("Due date: {}", args.date)])
                        .to_string(),
                )
            }
            TaskCommands::Notes(args) => {
                let mut tracker = self.tracker_for_task(args.id).await?;
                let task = tracker.update_notes(args.id, &args.notes).await?.clone();
                self.renderer.render(
                    &UpdateResult::with_changes(task, vec!["Notes updated".to_string()])
                        .to_string(),
                )
            }
            TaskCommands::Deliverable(args) => {
                let mut tracker = self.tracker_for_task(args.id).await?;
                let task = tracker
                    .upload_deliverable(args.id, &args.url)
                    .await?
                    .clone();
                let accepts = task.category.is_some_and(|c| c.accepts_deliverable());
                let name = task.task_name.clone();

                self.renderer.render(
                    &UpdateResult::with_changes(task, vec![format!("Deliverable: {}", args.url)])
                        .to_string(),
                )?;
                if !accepts {
                    self.renderer.render(
                        &OperationStatus::warning(format!(
                            "'{name}' is not a valoracion task; deliverables usually belong there"
                        ))
                        .to_string(),
                    )?;
                }
                Ok(())
            }
            TaskCommands::Delete(args) => {
                let mut tracker = self.tracker_for_task(args.id).await?;
                let task = tracker
                    .task(args.id)
                    .cloned()
                    .ok_or_else(|| anyhow!("Task with ID {} not found", args.id))?;
                tracker.delete_task(args.id).await?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
            TaskCommands::Overdue(args) => {
                let tracker = self.crm.tracker(&Id { id: args.lead_id }).await?;
                let today = match args.today {
                    Some(day) => day,
                    None => tracker.today()?,
                };
                let overdue: Vec<_> = tracker.overdue_tasks(today).into_iter().cloned().collect();
                self.renderer.render(&format!(
                    "# Overdue tasks of lead {} on {today}\n\n{}",
                    tracker.lead_id(),
                    Tasks(overdue)
                ))
            }
        }
    }

    /// Fill a wizard session from flags, walk it step by step, compute the
    /// valuation and record the lead.
    pub async fn valuate(&self, args: ValuateArgs) -> Result<()> {
        let sink = LogSink;
        let dry_run = args.dry_run;
        let mut session = WizardSession::new(args.flavor.into());

        for (field, value) in wizard_values(args) {
            publish(&sink, &session.update_field(field, value));
        }

        // next_step on the last input step only reveals its errors
        loop {
            let step = session.current_step();
            publish(&sink, &session.next_step());
            if session.current_step() == step {
                if !session.validate_step(step) {
                    bail!(step_errors(&session, step));
                }
                break;
            }
        }

        let events = session
            .calculate_valuation(&SectorMultiples::default())
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        publish(&sink, &events);

        let Some(result) = session.result() else {
            bail!(session
                .last_error()
                .unwrap_or("The valuation could not be computed")
                .to_string());
        };
        self.renderer.render(&result.to_string())?;

        if dry_run {
            debug!("Dry run; valuation not recorded");
            return Ok(());
        }

        let lead = self.crm.record_valuation(&session, &LogNotifier).await?;
        self.renderer.render(&CreateResult::new(lead).to_string())
    }
}

/// Flag values in wizard order. Fields the chosen flavor does not collect
/// are ignored by the session.
fn wizard_values(args: ValuateArgs) -> Vec<(Field, String)> {
    let has_adjustments = args.adjustment.as_ref().map(|_| "true".to_string());
    [
        (Field::ContactName, args.contact_name),
        (Field::CompanyName, args.company_name),
        (Field::TaxId, args.tax_id),
        (Field::Email, args.email),
        (Field::Phone, args.phone),
        (Field::Industry, args.industry),
        (Field::EmployeeRange, args.employees),
        (Field::Revenue, args.revenue),
        (Field::Ebitda, args.ebitda),
        (Field::HasAdjustments, has_adjustments),
        (Field::AdjustmentAmount, args.adjustment),
        (Field::Location, args.location),
        (Field::YearsOfOperation, args.years),
        (Field::OwnershipParticipation, args.ownership),
        (Field::CompetitiveAdvantage, args.competitive_advantage),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|value| (field, value)))
    .collect()
}

fn step_errors(session: &WizardSession, step: u8) -> String {
    let schema = session.schema();
    let title = schema.step_title(step).unwrap_or_default();
    let mut message = format!("Step {step} ({title}) is incomplete:");

    if let Some(spec) = schema.step(step) {
        for field in spec.fields.iter().map(|spec| spec.field) {
            if let Some(error) = session.field_state(field).error_message {
                message.push_str(&format!("\n  --{}: {error}", flag_name(field)));
            }
        }
    }
    message
}

fn flag_name(field: Field) -> &'static str {
    match field {
        Field::ContactName => "contact-name",
        Field::CompanyName => "company-name",
        Field::TaxId => "tax-id",
        Field::Email => "email",
        Field::Phone => "phone",
        Field::Industry => "industry",
        Field::EmployeeRange => "employees",
        Field::Revenue => "revenue",
        Field::Ebitda => "ebitda",
        Field::HasAdjustments | Field::AdjustmentAmount => "adjustment",
        Field::Location => "location",
        Field::YearsOfOperation => "years",
        Field::OwnershipParticipation => "ownership",
        Field::CompetitiveAdvantage => "competitive-advantage",
    }
}
