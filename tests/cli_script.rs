use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn script_mode_records_and_lists_expenses() {
    let home = TempDir::new().unwrap();
    let input = "add food 150 2024-03-01 \"team lunch\"\nadd fuel 40.5 2024-03-02\nlist\nexit\n";

    let mut cmd = Command::cargo_bin("expense_tracker_cli").unwrap();
    cmd.env("EXPENSE_TRACKER_CLI_SCRIPT", "1")
        .env("EXPENSE_TRACKER_HOME", home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Expense added"))
        .stdout(contains("team lunch"))
        .stdout(contains("₹150.00"))
        .stdout(contains("Mar 2, 2024"));

    let json = std::fs::read_to_string(home.path().join("data").join("expenses.json")).unwrap();
    assert!(json.contains("\"team lunch\""));
    assert!(json.contains("\"fuel\""));
}

#[test]
fn script_mode_reports_bad_input_and_keeps_going() {
    let home = TempDir::new().unwrap();
    let input = "add food abc\nfrobnicate\nadd bills 10\nexit\n";

    let mut cmd = Command::cargo_bin("expense_tracker_cli").unwrap();
    cmd.env("EXPENSE_TRACKER_CLI_SCRIPT", "1")
        .env("EXPENSE_TRACKER_HOME", home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("not a valid amount"))
        .stdout(contains("Unknown command `frobnicate`"))
        .stdout(contains("Expense added"));
}
