use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("LEDGER_DATA_DIR", dir.path())
        .env("LEDGER_TODAY", "2024-02-01")
        .env_remove("LEDGER_LOG");
    cmd
}

fn seed(dir: &TempDir) {
    ledger(dir)
        .args([
            "add", "Sale", "100", "--date", "2024-01-05", "--client", "Jones", "-C", "Lawn",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction: txn-"));
    ledger(dir)
        .args([
            "add", "Expense", "40", "--date", "2024-01-20", "-C", "Fuel", "--paid", "40",
        ])
        .assert()
        .success();
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    ledger(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jones"))
        .stdout(predicate::str::contains("$100.00"))
        .stdout(predicate::str::contains("Fuel"));

    assert!(dir.path().join("data").join("transactions.json").exists());
    assert!(dir.path().join("audit.log").exists());
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["add", "Sale", "ten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    ledger(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn summary_nets_sales_against_expenses() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    ledger(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("$140.00"))
        .stdout(predicate::str::contains("$60.00"));

    ledger(&dir)
        .arg("chart")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01"));
}

#[test]
fn paid_by_row_uses_filtered_list() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    ledger(&dir)
        .args(["paid", "0", "--outstanding"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$100.00"));

    ledger(&dir)
        .args(["list", "--outstanding"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    ledger(&dir)
        .args(["paid", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index out of range"));
}

#[test]
fn remove_and_clear_need_confirmation() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    ledger(&dir).args(["remove", "0"]).assert().failure();
    ledger(&dir).args(["clear"]).assert().failure();

    ledger(&dir)
        .args(["remove", "0", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction"));

    ledger(&dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 transactions."));
}

#[test]
fn csv_export_writes_dated_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    ledger(&dir)
        .args(["export", "csv", "--output"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to export"));
    assert!(!out.join("ledger-2024-02-01.csv").exists());

    seed(&dir);
    ledger(&dir)
        .args(["export", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(out.join("ledger-2024-02-01.csv")).unwrap();
    assert!(text.starts_with("Date,Client,Type,Category,Amount Due,Amount Paid"));
    assert!(text.contains("Totals,,,,140.00,40.00"));
}

#[test]
fn csv_export_to_stdout_without_totals() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    ledger(&dir)
        .args(["export", "csv", "--stdout", "--no-totals", "--type", "Sale"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05,Jones,Sale,Lawn,100"))
        .stdout(predicate::str::contains("Totals").not())
        .stdout(predicate::str::contains("Expense").not());
}

#[test]
fn recurring_template_materializes_once_per_period() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args([
            "recurring", "add", "monthly", "Expense", "120", "-C", "Insurance", "--note", "van",
        ])
        .assert()
        .success();

    // Every invocation materializes; the second must not duplicate.
    ledger(&dir).arg("list").assert().success();
    ledger(&dir)
        .args(["list", "--recurring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insurance").count(1));

    ledger(&dir)
        .args(["list", "--recurring"])
        .env("LEDGER_TODAY", "2024-03-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("Insurance").count(2));
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data").join("transactions.json"), "{broken").unwrap();

    ledger(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn json_export_and_import() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let backup = dir.path().join("backup.json");

    ledger(&dir)
        .args(["export", "json", "--pretty"])
        .arg(&backup)
        .assert()
        .success();

    ledger(&dir).args(["clear", "--yes"]).assert().success();

    ledger(&dir)
        .arg("import")
        .arg(&backup)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transactions"));

    ledger(&dir)
        .arg("clients")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jones"));
}

#[test]
fn config_set_changes_currency() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    ledger(&dir)
        .args(["config", "set", "currency_symbol", "€"])
        .assert()
        .success();

    ledger(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("€100.00"));

    ledger(&dir)
        .args(["config", "set", "colour", "red"])
        .assert()
        .failure();
}

#[test]
fn legacy_records_keep_their_ids_between_runs() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data").join("transactions.json"),
        r#"[{"transactionDate": "2024-01-05", "type": "Sale", "amount": "100", "customerName": "Jones"}]"#,
    )
    .unwrap();

    let output = ledger(&dir).arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find("txn-").unwrap();
    let id = &stdout[start..start + 12];

    ledger(&dir)
        .args(["paid", id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Marked paid: {}", id)));
}

#[test]
fn audit_lists_changes_by_full_id() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    ledger(&dir)
        .args(["audit", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("Fuel").or(predicate::str::contains("Expense")))
        .stdout(predicate::str::is_match(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-").unwrap());

    let empty = TempDir::new().unwrap();
    ledger(&empty)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries."));
}

#[test]
fn huge_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["add", "Sale", "99999999999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}
