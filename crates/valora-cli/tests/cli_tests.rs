use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a Command with --no-color flag for testing
fn valora_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("valora").expect("Failed to find valora binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn create_lead(db_path: &Path, name: &str, lead_type: &str) {
    valora_cmd(db_path)
        .args(["lead", "create", name, "--type", lead_type])
        .assert()
        .success();
}

const FULL_WIZARD: &[&str] = &[
    "valuate",
    "--contact-name",
    "Ana García",
    "--company-name",
    "Talleres Norte SL",
    "--tax-id",
    "B12345678",
    "--email",
    "ana@talleresnorte.es",
    "--phone",
    "612 345 678",
    "--industry",
    "manufacturing",
    "--employees",
    "11-50",
    "--revenue",
    "2.000.000",
    "--ebitda",
    "100000",
    "--years",
    "15",
    "--ownership",
    "60",
];

#[test]
fn test_cli_create_lead() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path)
        .args([
            "lead",
            "create",
            "Marta Ruiz",
            "--company",
            "Panadería Sol",
            "--phone",
            "612-345-678",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lead with ID: 1 (3 system tasks)"))
        .stdout(predicate::str::contains("# 1. Marta Ruiz (Panadería Sol)"))
        .stdout(predicate::str::contains("+34612345678"));
}

#[test]
fn test_cli_create_lead_with_blank_name_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path)
        .args(["lead", "create", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contact_name"));
}

#[test]
fn test_cli_list_empty_and_default_command() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No leads found."));
}

#[test]
fn test_cli_list_filters_by_type() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    create_lead(&db_path, "Marta Ruiz", "contact");
    create_lead(&db_path, "Luis Pardo", "collaborator");

    valora_cmd(&db_path)
        .args(["lead", "list", "--type", "collaborator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Luis Pardo"))
        .stdout(predicate::str::contains("Marta Ruiz").not());
}

#[test]
fn test_cli_show_missing_lead() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path)
        .args(["lead", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lead with ID 42 not found"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    create_lead(&db_path, "Marta Ruiz", "contact");

    valora_cmd(&db_path)
        .args(["lead", "delete", "1"])
        .assert()
        .failure();

    valora_cmd(&db_path)
        .args(["lead", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted lead 'Marta Ruiz' (ID: 1) with 3 tasks"));

    valora_cmd(&db_path)
        .args(["lead", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No leads found."));
}

#[test]
fn test_cli_task_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    create_lead(&db_path, "Marta Ruiz", "contact");

    valora_cmd(&db_path)
        .args(["task", "add", "1", "Send brochure", "--category", "recepcion"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task with ID: 4 to lead 1"));

    valora_cmd(&db_path)
        .args(["task", "status", "1", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: pending → completed"));

    valora_cmd(&db_path)
        .args(["task", "assign", "2", "u-7", "--name", "Jorge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned to: Jorge (u-7)"));

    valora_cmd(&db_path)
        .args(["task", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25% (1/4)"))
        .stdout(predicate::str::contains("Send brochure"));
}

#[test]
fn test_cli_system_task_cannot_be_deleted() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    create_lead(&db_path, "Marta Ruiz", "contact");

    valora_cmd(&db_path)
        .args(["task", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("system task"));

    valora_cmd(&db_path)
        .args(["task", "add", "1", "Extra"])
        .assert()
        .success();
    valora_cmd(&db_path)
        .args(["task", "delete", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task 'Extra' (ID: 4)"));
}

#[test]
fn test_cli_deliverable_warns_outside_valoracion() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    create_lead(&db_path, "Marta Ruiz", "contact");

    valora_cmd(&db_path)
        .args(["task", "deliverable", "1", "https://files.example.com/a.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deliverable: https://files.example.com/a.pdf"))
        .stdout(predicate::str::contains("Warning:"));
}

#[test]
fn test_cli_overdue_tasks() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    create_lead(&db_path, "Marta Ruiz", "contact");

    valora_cmd(&db_path)
        .args(["task", "due", "2", "2026-03-01"])
        .assert()
        .success();

    valora_cmd(&db_path)
        .args(["task", "overdue", "1", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    valora_cmd(&db_path)
        .args(["task", "overdue", "1", "--today", "2026-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reply to contact"));
}

#[test]
fn test_cli_valuate_records_lead() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path)
        .args(FULL_WIZARD)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Valuation: 500.000 €"))
        .stdout(predicate::str::contains("Range: 400.000 € to 600.000 €"))
        .stdout(predicate::str::contains("Created lead with ID: 1 (4 system tasks)"));

    valora_cmd(&db_path)
        .args(["lead", "submission", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Talleres Norte SL"))
        .stdout(predicate::str::contains("finalValuation"));
}

#[test]
fn test_cli_valuate_dry_run_records_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path)
        .args(FULL_WIZARD)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Valuation: 500.000 €"));

    valora_cmd(&db_path)
        .args(["lead", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No leads found."));
}

#[test]
fn test_cli_valuate_reports_missing_fields() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path)
        .args([
            "valuate",
            "--contact-name",
            "Ana García",
            "--company-name",
            "Talleres Norte SL",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step 1 (Company) is incomplete"))
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn test_cli_qualify_incomplete_lead_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    valora_cmd(&db_path).args(FULL_WIZARD).assert().success();

    valora_cmd(&db_path)
        .args(["lead", "qualify", "1"])
        .assert()
        .failure();

    for id in 1..=3 {
        valora_cmd(&db_path)
            .args(["task", "status", &id.to_string(), "completed"])
            .assert()
            .success();
    }
    valora_cmd(&db_path)
        .args(["task", "status", "4", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valora lead qualify 1"));

    valora_cmd(&db_path)
        .args(["lead", "qualify", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Lead 1 qualified"));
}
