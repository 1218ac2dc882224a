use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A throwaway HOME with `tfsa init` already run for `a@example.com`.
fn setup() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    tfsa(home.path())
        .args(["init", "--account", "a@example.com", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tfsa"));
    home
}

fn tfsa(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tfsa").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn add(home: &Path, args: &[&str]) {
    tfsa(home).arg("add").args(args).assert().success();
}

#[test]
fn test_init_writes_settings_and_db() {
    let home = setup();
    assert!(home.path().join(".config/tfsa/settings.json").exists());
    assert!(home.path().join("data/tfsa.db").exists());
    tfsa(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("a@example.com"))
        .stdout(predicate::str::contains("Start year:    2009"));
}

#[test]
fn test_summary_after_full_deposit() {
    let home = setup();
    tfsa(home.path()).args(["start-year", "2020"]).assert().success();
    add(home.path(), &["--amount", "6000", "--date", "2020-01-01", "--institution", "X"]);

    tfsa(home.path())
        .args(["report", "summary", "--year", "2022"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$18,000.00"))
        .stdout(predicate::str::contains("$12,000.00"))
        .stdout(predicate::str::contains("33.3%"))
        .stdout(predicate::str::contains("OVER-CONTRIBUTED").not());
}

#[test]
fn test_withdrawal_credited_in_following_year() {
    let home = setup();
    tfsa(home.path()).args(["start-year", "2020"]).assert().success();
    add(home.path(), &["--amount", "6000", "--date", "2020-06-01"]);
    add(home.path(), &["--amount", "2000", "--type", "withdrawal", "--date", "2020-12-01"]);

    tfsa(home.path())
        .args(["report", "years", "--year", "2022"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2021"))
        .stdout(predicate::str::contains("$8,000.00"));
}

#[test]
fn test_over_contribution_warning() {
    let home = setup();
    tfsa(home.path()).args(["start-year", "2025"]).assert().success();
    add(home.path(), &["--amount", "7500", "--date", "2025-02-01"]);

    tfsa(home.path())
        .args(["report", "summary", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OVER-CONTRIBUTED"))
        .stdout(predicate::str::contains("-$500.00"));
}

#[test]
fn test_start_year_must_be_in_schedule() {
    let home = setup();
    tfsa(home.path())
        .args(["start-year", "2008"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No contribution limit is defined for 2008"));
}

#[test]
fn test_missing_account_is_an_error() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    tfsa(home.path()).args(["init", "--data-dir"]).arg(&data_dir).assert().success();
    tfsa(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No account selected"));
}

#[test]
fn test_add_rejects_negative_amount_and_bad_date() {
    let home = setup();
    tfsa(home.path())
        .args(["add", "--amount=-50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
    tfsa(home.path())
        .args(["add", "--amount", "50", "--date", "next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_accounts_are_isolated() {
    let home = setup();
    add(home.path(), &["--amount", "100", "--date", "2024-01-01", "--institution", "Questrade"]);

    tfsa(home.path())
        .args(["list", "--account", "b@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions recorded"));
    tfsa(home.path())
        .args(["delete", "1", "--account", "b@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No transaction with ID 1"));
    tfsa(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Questrade"));
}

#[test]
fn test_delete_and_clear() {
    let home = setup();
    add(home.path(), &["--amount", "100", "--date", "2024-01-01"]);
    add(home.path(), &["--amount", "200", "--date", "2024-02-01"]);
    add(home.path(), &["--amount", "300", "--date", "2024-03-01"]);

    tfsa(home.path())
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction 2"));

    tfsa(home.path())
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted"));

    tfsa(home.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 transactions"));
}

#[test]
fn test_import_csv() {
    let home = setup();
    let csv = home.path().join("history.csv");
    std::fs::write(
        &csv,
        "Date,Institution,Amount\n2019-03-01,Questrade,6000\n2019-13-01,Questrade,1\n2020-08-15,Questrade,-1000\n",
    )
    .unwrap();

    tfsa(home.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 imported, 1 skipped"));
    tfsa(home.path()).args(["start-year", "2019"]).assert().success();

    // 2019..=2021 room is 18000; 6000 used, 1000 withdrawn in 2020 comes back
    tfsa(home.path())
        .args(["report", "summary", "--year", "2021"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$13,000.00"));
}

#[test]
fn test_limits_file_replaces_schedule() {
    let home = tempfile::tempdir().unwrap();
    let limits = home.path().join("limits.json");
    std::fs::write(&limits, r#"{"2030": 1000, "2031": 2000}"#).unwrap();
    tfsa(home.path())
        .args(["init", "--account", "a@example.com", "--data-dir"])
        .arg(home.path().join("data"))
        .arg("--limits-file")
        .arg(&limits)
        .assert()
        .success();

    tfsa(home.path())
        .arg("limits")
        .assert()
        .success()
        .stdout(predicate::str::contains("2031"))
        .stdout(predicate::str::contains("$3,000.00"))
        .stdout(predicate::str::contains("2009").not());
}

#[test]
fn test_report_year_is_bounded() {
    let home = setup();
    tfsa(home.path())
        .args(["report", "years", "--year", "2147483647"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
    tfsa(home.path())
        .args(["report", "summary", "--year", "10000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_start_year_missing_from_schedule_reports_nothing() {
    let home = tempfile::tempdir().unwrap();
    let limits = home.path().join("limits.json");
    std::fs::write(&limits, r#"{"2030": 1000}"#).unwrap();
    tfsa(home.path())
        .args(["init", "--account", "a@example.com", "--data-dir"])
        .arg(home.path().join("data"))
        .arg("--limits-file")
        .arg(&limits)
        .assert()
        .success();

    // Default start year 2009 is not in this schedule
    tfsa(home.path())
        .args(["report", "summary", "--year", "2031"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,000.00").not())
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn test_init_prompts_for_data_dir_on_first_run() {
    let home = tempfile::tempdir().unwrap();
    let chosen = home.path().join("chosen");
    tfsa(home.path())
        .arg("init")
        .write_stdin(format!("{}\n", chosen.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory"));
    assert!(chosen.join("tfsa.db").exists());
}
