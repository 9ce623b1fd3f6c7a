//! System task templates seeded for every new lead.

use super::{LeadType, TaskCategory};

/// A checklist item created automatically with a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTaskTemplate {
    pub task_name: &'static str,
    pub category: TaskCategory,
    /// External system expected to close the task
    pub responsible_system: Option<&'static str>,
}

const fn template(task_name: &'static str, category: TaskCategory) -> SystemTaskTemplate {
    SystemTaskTemplate {
        task_name,
        category,
        responsible_system: None,
    }
}

const VALUATION_TASKS: &[SystemTaskTemplate] = &[
    SystemTaskTemplate {
        task_name: "Review submitted data",
        category: TaskCategory::Recepcion,
        responsible_system: Some("wizard"),
    },
    template("Qualification call", TaskCategory::Recepcion),
    template("Prepare valuation report", TaskCategory::Valoracion),
    template("Go / no-go decision", TaskCategory::Decision),
];

const CONTACT_TASKS: &[SystemTaskTemplate] = &[
    template("Review inquiry", TaskCategory::Recepcion),
    template("Reply to contact", TaskCategory::Recepcion),
    template("Decide follow-up", TaskCategory::Decision),
];

const COLLABORATOR_TASKS: &[SystemTaskTemplate] = &[
    template("Review application", TaskCategory::Recepcion),
    template("Interview", TaskCategory::Valoracion),
    template("Accept or decline", TaskCategory::Decision),
];

impl LeadType {
    /// Tasks seeded, in order, when a lead of this type is created.
    pub fn system_tasks(&self) -> &'static [SystemTaskTemplate] {
        match self {
            LeadType::Valuation => VALUATION_TASKS,
            LeadType::Contact => CONTACT_TASKS,
            LeadType::Collaborator => COLLABORATOR_TASKS,
        }
    }
}
