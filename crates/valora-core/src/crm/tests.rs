use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use super::*;
use crate::{
    models::{Assignee, Lead, LeadStatus, LeadType, TaskCategory, TaskStatus, UpdateTaskRequest},
    notify::{LogNotifier, Notifier},
    params::{CreateLead, DeleteLead, Id, ListLeads, TaskCreate},
    tracker::TaskStore,
    valuation::{SectorMultiples, ValuationResult},
    wizard::{Field, WizardFlavor, WizardSession},
};

async fn create_test_crm() -> (TempDir, Crm) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let crm = CrmBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create crm");
    (temp_dir, crm)
}

fn contact(name: &str) -> CreateLead {
    CreateLead {
        lead_type: LeadType::Contact,
        contact_name: name.to_string(),
        ..Default::default()
    }
}

async fn completed_session() -> WizardSession {
    let mut session = WizardSession::new(WizardFlavor::Streamlined);
    session.update_field(Field::ContactName, "Ana García");
    session.update_field(Field::CompanyName, "Talleres Norte SL");
    session.update_field(Field::Email, "ana@talleresnorte.es");
    session.update_field(Field::Phone, "612 345 678");
    session.update_field(Field::Industry, "manufacturing");
    session.update_field(Field::EmployeeRange, "11-50");
    session.next_step();
    session.update_field(Field::Revenue, "2.000.000");
    session.update_field(Field::Ebitda, 100_000.0);
    session.next_step();
    session.update_field(Field::OwnershipParticipation, 100.0);
    session
        .calculate_valuation(&SectorMultiples::default())
        .await
        .expect("valuation should succeed");
    assert!(session.is_complete());
    session
}

struct CountingNotifier {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn valuation_recorded(&self, _lead: &Lead, _result: &ValuationResult) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ValoraError::Notification {
                message: "smtp unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_create_lead_seeds_system_tasks() {
    let (_temp_dir, crm) = create_test_crm().await;

    let lead = crm
        .create_lead(&CreateLead {
            contact_name: "Ana García".to_string(),
            phone: Some("612 345 678".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create lead");

    assert_eq!(lead.lead_type, LeadType::Valuation);
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.phone.as_deref(), Some("+34612345678"));
    assert_eq!(lead.tasks.len(), 4);
    assert!(lead.tasks.iter().all(|t| t.is_system_task));
    assert!(lead.tasks.iter().all(|t| t.status == TaskStatus::Pending));
    assert_eq!(lead.tasks[0].responsible_system.as_deref(), Some("wizard"));

    let loaded = crm
        .get_lead(&Id { id: lead.id })
        .await
        .expect("Failed to get lead")
        .expect("Lead should exist");
    assert_eq!(loaded.tasks, lead.tasks);
}

#[tokio::test]
async fn test_create_lead_rejects_blank_contact() {
    let (_temp_dir, crm) = create_test_crm().await;

    let result = crm.create_lead(&contact("  ")).await;
    assert!(matches!(result, Err(ValoraError::InvalidInput { .. })));

    let summaries = crm.list_leads_summary(&ListLeads::default()).await.unwrap();
    assert!(summaries.0.is_empty());
}

#[tokio::test]
async fn test_list_leads_filters() {
    let (_temp_dir, crm) = create_test_crm().await;

    crm.create_lead(&contact("First")).await.unwrap();
    crm.create_lead(&CreateLead {
        lead_type: LeadType::Collaborator,
        contact_name: "Second".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    let all = crm.list_leads_summary(&ListLeads::default()).await.unwrap();
    assert_eq!(all.0.len(), 2);
    assert_eq!(all.0[0].contact_name, "Second");

    let contacts = crm
        .list_leads_summary(&ListLeads {
            lead_type: Some(LeadType::Contact),
            qualified_only: false,
        })
        .await
        .unwrap();
    assert_eq!(contacts.0.len(), 1);
    assert_eq!(contacts.0[0].progress.total, 3);

    let qualified = crm
        .list_leads_summary(&ListLeads {
            lead_type: None,
            qualified_only: true,
        })
        .await
        .unwrap();
    assert!(qualified.0.is_empty());
}

#[tokio::test]
async fn test_delete_lead_requires_confirmation() {
    let (_temp_dir, crm) = create_test_crm().await;
    let lead = crm.create_lead(&contact("Ana")).await.unwrap();

    let refused = crm
        .delete_lead(&DeleteLead {
            id: lead.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(refused, Err(ValoraError::InvalidInput { .. })));
    assert!(crm.get_lead(&Id { id: lead.id }).await.unwrap().is_some());

    let deleted = crm
        .delete_lead(&DeleteLead {
            id: lead.id,
            confirmed: true,
        })
        .await
        .unwrap()
        .expect("Deleted lead should be returned");
    assert_eq!(deleted.id, lead.id);
    assert!(crm.get_lead(&Id { id: lead.id }).await.unwrap().is_none());
    assert!(crm
        .get_task(&Id { id: lead.tasks[0].id })
        .await
        .unwrap()
        .is_none());

    let missing = crm
        .delete_lead(&DeleteLead {
            id: lead.id,
            confirmed: true,
        })
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_task_crud() {
    let (_temp_dir, crm) = create_test_crm().await;
    let lead = crm.create_lead(&contact("Ana")).await.unwrap();

    let task = crm
        .add_task(&TaskCreate {
            lead_id: lead.id,
            task_name: "Send brochure".to_string(),
            category: Some(TaskCategory::Recepcion),
        })
        .await
        .unwrap();
    assert!(!task.is_system_task);
    assert_eq!(task.order, 3);

    let updated = crm
        .update_task(
            task.id,
            &UpdateTaskRequest {
                status: Some(TaskStatus::InProgress),
                assigned_to: Some(Assignee {
                    id: "u-7".to_string(),
                    name: "Marta".to_string(),
                }),
                due_date: Some(jiff::civil::date(2026, 3, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.assigned_to.as_ref().map(|a| a.name.as_str()), Some("Marta"));
    assert_eq!(updated.due_date, Some(jiff::civil::date(2026, 3, 1)));

    let tasks = crm.get_tasks(&Id { id: lead.id }).await.unwrap();
    assert_eq!(tasks.0.len(), 4);

    crm.remove_task(&Id { id: task.id }).await.unwrap();
    assert!(crm.get_task(&Id { id: task.id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_task_errors() {
    let (_temp_dir, crm) = create_test_crm().await;
    let lead = crm.create_lead(&contact("Ana")).await.unwrap();

    let orphan = crm
        .add_task(&TaskCreate {
            lead_id: 999,
            task_name: "Nowhere".to_string(),
            category: None,
        })
        .await;
    assert!(matches!(orphan, Err(ValoraError::LeadNotFound { id: 999 })));

    let system = crm.remove_task(&Id { id: lead.tasks[0].id }).await;
    assert!(matches!(system, Err(ValoraError::SystemTaskDeletion { .. })));

    let missing = crm
        .update_task(
            999,
            &UpdateTaskRequest {
                notes: Some("hello".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing, Err(ValoraError::TaskNotFound { id: 999 })));

    let no_lead = crm.get_tasks(&Id { id: 999 }).await;
    assert!(matches!(no_lead, Err(ValoraError::LeadNotFound { id: 999 })));
}

#[tokio::test]
async fn test_tracker_writes_through_crm() {
    let (_temp_dir, crm) = create_test_crm().await;
    let lead = crm.create_lead(&CreateLead {
        contact_name: "Ana".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    let mut tracker = crm.tracker(&Id { id: lead.id }).await.unwrap();
    let first = tracker.tasks()[0].id;
    tracker
        .update_status(first, TaskStatus::Completed)
        .await
        .unwrap();
    assert_eq!(tracker.progress_percentage(), 25);

    let reloaded = crm.tracker(&Id { id: lead.id }).await.unwrap();
    assert_eq!(reloaded.completed_count(), 1);
    assert_eq!(reloaded.progress_percentage(), 25);
}

#[tokio::test]
async fn test_mark_qualified_requires_full_checklist() {
    let (_temp_dir, crm) = create_test_crm().await;
    let lead = crm.create_lead(&CreateLead {
        contact_name: "Ana".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    let early = crm.mark_qualified(&Id { id: lead.id }).await;
    assert!(matches!(early, Err(ValoraError::InvalidInput { .. })));

    let mut tracker = crm.tracker(&Id { id: lead.id }).await.unwrap();
    let ids: Vec<u64> = tracker.tasks().iter().map(|t| t.id).collect();
    for id in ids {
        tracker.update_status(id, TaskStatus::Completed).await.unwrap();
    }
    assert!(tracker.is_auto_qualified());

    let qualified = crm.mark_qualified(&Id { id: lead.id }).await.unwrap();
    assert_eq!(qualified.status, LeadStatus::Qualified);

    let missing = crm.mark_qualified(&Id { id: 999 }).await;
    assert!(matches!(missing, Err(ValoraError::LeadNotFound { id: 999 })));
}

#[tokio::test]
async fn test_contact_lead_never_qualifies() {
    let (_temp_dir, crm) = create_test_crm().await;
    let lead = crm.create_lead(&contact("Ana")).await.unwrap();

    let mut tracker = crm.tracker(&Id { id: lead.id }).await.unwrap();
    let ids: Vec<u64> = tracker.tasks().iter().map(|t| t.id).collect();
    for id in ids {
        tracker.update_status(id, TaskStatus::Completed).await.unwrap();
    }
    assert_eq!(tracker.progress_percentage(), 100);

    let result = crm.mark_qualified(&Id { id: lead.id }).await;
    assert!(matches!(result, Err(ValoraError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_record_valuation_requires_result() {
    let (_temp_dir, crm) = create_test_crm().await;
    let session = WizardSession::new(WizardFlavor::Full);

    let result = crm.record_valuation(&session, &LogNotifier).await;
    assert!(matches!(result, Err(ValoraError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_record_valuation_stores_lead_and_submission() {
    let (_temp_dir, crm) = create_test_crm().await;
    let session = completed_session().await;
    let notifier = CountingNotifier {
        calls: AtomicUsize::new(0),
        fail: false,
    };

    let lead = crm.record_valuation(&session, &notifier).await.unwrap();

    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    assert_eq!(lead.lead_type, LeadType::Valuation);
    assert_eq!(lead.contact_name, "Ana García");
    assert_eq!(lead.company_name.as_deref(), Some("Talleres Norte SL"));
    assert_eq!(lead.phone.as_deref(), Some("+34612345678"));
    assert_eq!(lead.valuation_amount, Some(500_000.0));
    assert_eq!(lead.tasks.len(), 4);

    let submission = crm
        .get_submission(&Id { id: lead.id })
        .await
        .unwrap()
        .expect("Submission should be stored");
    assert_eq!(submission.flavor, WizardFlavor::Streamlined);
    assert_eq!(submission.result.final_valuation, 500_000.0);
    assert_eq!(submission.inputs.financial.ebitda, Some(100_000.0));
}

#[tokio::test]
async fn test_record_valuation_survives_notifier_failure() {
    let (_temp_dir, crm) = create_test_crm().await;
    let session = completed_session().await;
    let notifier = CountingNotifier {
        calls: AtomicUsize::new(0),
        fail: true,
    };

    let lead = crm.record_valuation(&session, &notifier).await.unwrap();

    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    assert!(crm.get_lead(&Id { id: lead.id }).await.unwrap().is_some());
}

#[tokio::test]
async fn test_submission_absent_for_manual_leads() {
    let (_temp_dir, crm) = create_test_crm().await;
    let lead = crm.create_lead(&contact("Ana")).await.unwrap();

    assert!(crm.get_submission(&Id { id: lead.id }).await.unwrap().is_none());

    let missing = crm.get_submission(&Id { id: 999 }).await;
    assert!(matches!(missing, Err(ValoraError::LeadNotFound { id: 999 })));
}
