//! Display implementations for domain models.
//!
//! Output is markdown so the CLI can hand it straight to the terminal
//! renderer.

use std::fmt;

use super::datetime::{Euros, LocalDateTime};
use crate::{
    models::{Lead, LeadProgress, LeadStatus, LeadSummary, LeadTask, LeadType, TaskCategory, TaskStatus},
    valuation::ValuationResult,
};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for LeadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for LeadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% ({}/{})", self.percentage, self.completed, self.total)?;
        if self.auto_qualified {
            write!(f, ", ready to qualify")?;
        }
        Ok(())
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.company_name {
            Some(company) => writeln!(f, "# {}. {} ({company})", self.id, self.contact_name)?,
            None => writeln!(f, "# {}. {}", self.id, self.contact_name)?,
        }
        writeln!(f)?;

        writeln!(f, "- Type: {}", self.lead_type)?;
        writeln!(f, "- Status: {}", self.status)?;
        if let Some(email) = &self.email {
            writeln!(f, "- Email: {email}")?;
        }
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        if let Some(amount) = self.valuation_amount {
            writeln!(f, "- Valuation: {}", Euros(amount))?;
        }
        writeln!(
            f,
            "- Progress: {}",
            LeadProgress::from_tasks(self.lead_type, &self.tasks)
        )?;
        writeln!(f, "- Time zone: {}", self.time_zone)?;
        writeln!(
            f,
            "- Created: {}",
            LocalDateTime::new(&self.created_at, &self.time_zone)
        )?;
        writeln!(
            f,
            "- Updated: {}",
            LocalDateTime::new(&self.updated_at, &self.time_zone)
        )?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks for this lead.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for LeadTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lock = if self.is_system_task { " [system]" } else { "" };
        writeln!(
            f,
            "### {}. {} ({}){lock}",
            self.id,
            self.task_name,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        if let Some(category) = self.category {
            writeln!(f, "- Category: {category}")?;
        }
        if let Some(due) = self.due_date {
            writeln!(f, "- Due: {due}")?;
        }
        if let Some(assignee) = &self.assigned_to {
            writeln!(f, "- Assigned to: {} ({})", assignee.name, assignee.id)?;
        }
        if let Some(system) = &self.responsible_system {
            writeln!(f, "- Closed by: {system}")?;
        }
        if let Some(url) = &self.deliverable_url {
            writeln!(f, "- Deliverable: {url}")?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for LeadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.contact_name, self.id)?;
        writeln!(f)?;

        if let Some(company) = &self.company_name {
            writeln!(f, "- **Company**: {company}")?;
        }
        writeln!(f, "- **Type**: {}", self.lead_type)?;
        writeln!(f, "- **Status**: {}", self.status)?;
        writeln!(f, "- **Progress**: {}", self.progress)?;
        writeln!(f, "- **Created**: {}", self.created_at.strftime("%Y-%m-%d"))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for ValuationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Valuation: {}", Euros(self.final_valuation))?;
        writeln!(f)?;
        writeln!(
            f,
            "- Range: {} to {}",
            Euros(self.valuation_range.min),
            Euros(self.valuation_range.max)
        )?;
        writeln!(
            f,
            "- EBITDA multiple: {:.1}x",
            self.multiples.ebitda_multiple_used
        )
    }
}
