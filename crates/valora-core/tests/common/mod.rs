use tempfile::TempDir;
use valora_core::{
    wizard::{Field, WizardFlavor, WizardSession},
    CrmBuilder,
};

/// Helper function to create a test CRM
pub async fn create_test_crm() -> (TempDir, valora_core::Crm) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let crm = CrmBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create crm");
    (temp_dir, crm)
}

/// A full-flavor session with every input step filled in and sitting on the
/// last input step.
#[allow(dead_code)]
pub fn filled_full_session() -> WizardSession {
    let mut session = WizardSession::new(WizardFlavor::Full);
    session.update_field(Field::ContactName, "Ana García");
    session.update_field(Field::CompanyName, "Talleres Norte SL");
    session.update_field(Field::TaxId, "B12345678");
    session.update_field(Field::Email, "ana@talleresnorte.es");
    session.update_field(Field::Phone, "612 345 678");
    session.update_field(Field::Industry, "manufacturing");
    session.update_field(Field::EmployeeRange, "11-50");
    session.next_step();
    session.update_field(Field::Revenue, "2.000.000");
    session.update_field(Field::Ebitda, 100_000.0);
    session.next_step();
    session.update_field(Field::YearsOfOperation, 15.0);
    session.update_field(Field::OwnershipParticipation, 60.0);
    session
}
