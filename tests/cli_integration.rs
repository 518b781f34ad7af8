use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn formdesk(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("formdesk").unwrap();
    cmd.env("FORMDESK_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn submit(home: &Path, first: &str, last: &str, gender: &[&str]) {
    let mut cmd = formdesk(home);
    cmd.args([
        "submit",
        "--prefix",
        "mr",
        "--first-name",
        first,
        "--last-name",
        last,
        "--birth-date",
        "1/2/1990",
        "--nationality",
        "thai",
        "--phone-country",
        "th",
        "--phone-number",
        "0812345678",
        "--expected-salary",
        "30000",
    ]);
    for tag in gender {
        cmd.args(["--gender", tag]);
    }
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Record submitted"));
}

fn stored(home: &Path) -> Vec<serde_json::Value> {
    let raw = std::fs::read_to_string(home.join("formData.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn submit_persists_record_in_camel_case() {
    let temp_dir = tempfile::tempdir().unwrap();
    submit(temp_dir.path(), "Somchai", "Dee", &["male"]);

    let records = stored(temp_dir.path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["firstName"], "Somchai");
    assert_eq!(records[0]["gender"], "male");
    assert_eq!(records[0]["birthDate"], "01/02/1990");
    assert_eq!(records[0]["nationality"], "ไทย");
    assert_eq!(records[0]["expectedSalary"], 30000.0);
}

#[test]
fn gender_tags_join_in_given_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    submit(temp_dir.path(), "A", "B", &["female", "male"]);

    assert_eq!(stored(temp_dir.path())[0]["gender"], "female, male");
}

#[test]
fn submit_rejects_missing_required_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    formdesk(temp_dir.path())
        .args(["submit", "--first-name", "A", "--expected-salary", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required fields"));

    assert!(!temp_dir.path().join("formData.json").exists());
}

#[test]
fn submit_rejects_bad_birth_date() {
    let temp_dir = tempfile::tempdir().unwrap();
    formdesk(temp_dir.path())
        .args([
            "submit",
            "--prefix",
            "ms",
            "--first-name",
            "A",
            "--last-name",
            "B",
            "--birth-date",
            "1990-02-01",
            "--nationality",
            "french",
            "--expected-salary",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected DD/MM/YYYY"));
}

#[test]
fn list_sorts_by_column() {
    let temp_dir = tempfile::tempdir().unwrap();
    submit(temp_dir.path(), "Malee", "Zed", &["female"]);
    submit(temp_dir.path(), "Anong", "Young", &["female"]);

    formdesk(temp_dir.path())
        .args(["list", "--sort", "first-name"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)Anong.*Malee").unwrap())
        .stdout(predicate::str::contains("Page 1 of 1 (2 records)"));

    formdesk(temp_dir.path())
        .args(["list", "--sort", "first-name", "--desc"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)Malee.*Anong").unwrap());

    // Sorting is view-only
    let records = stored(temp_dir.path());
    assert_eq!(records[0]["firstName"], "Malee");
}

#[test]
fn list_pages_by_five() {
    let temp_dir = tempfile::tempdir().unwrap();
    for name in ["R1", "R2", "R3", "R4", "R5", "R6"] {
        submit(temp_dir.path(), name, "X", &[]);
    }

    formdesk(temp_dir.path())
        .args(["list", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R6"))
        .stdout(predicate::str::contains("R1").not())
        .stdout(predicate::str::contains("Page 2 of 2 (6 records)"));
}

#[test]
fn delete_by_key_prefix() {
    let temp_dir = tempfile::tempdir().unwrap();
    submit(temp_dir.path(), "Somchai", "Dee", &["male"]);
    submit(temp_dir.path(), "Malee", "Dee", &["female"]);

    let key = stored(temp_dir.path())[0]["key"].as_str().unwrap().to_string();

    formdesk(temp_dir.path())
        .args(["delete", &key[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record deleted: Mr. Somchai Dee"));

    let records = stored(temp_dir.path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["firstName"], "Malee");
}

#[test]
fn delete_unknown_key_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    submit(temp_dir.path(), "Somchai", "Dee", &["male"]);

    formdesk(temp_dir.path())
        .args(["delete", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found"));

    assert_eq!(stored(temp_dir.path()).len(), 1);
}

#[test]
fn delete_selected_removes_all_given_keys() {
    let temp_dir = tempfile::tempdir().unwrap();
    for name in ["A", "B", "C"] {
        submit(temp_dir.path(), name, "X", &[]);
    }
    let records = stored(temp_dir.path());
    let first = records[0]["key"].as_str().unwrap().to_string();
    let third = records[2]["key"].as_str().unwrap().to_string();

    formdesk(temp_dir.path())
        .args(["delete-selected", &first, &third])
        .assert()
        .success();

    let remaining = stored(temp_dir.path());
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["firstName"], "B");
}

#[test]
fn clear_empties_storage() {
    let temp_dir = tempfile::tempdir().unwrap();
    submit(temp_dir.path(), "A", "X", &[]);

    formdesk(temp_dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 record(s)."));

    assert!(stored(temp_dir.path()).is_empty());
    formdesk(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn corrupt_storage_lists_as_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("formData.json"), "{oops").unwrap();

    formdesk(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn config_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();

    formdesk(temp_dir.path())
        .args(["config", "delete-scope", "clear-store"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delete-scope set to clear-store"));

    formdesk(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("storage-key = formData"))
        .stdout(predicate::str::contains("delete-scope = clear-store"));

    formdesk(temp_dir.path())
        .args(["config", "delete-scope", "everything"])
        .assert()
        .failure();
}

#[test]
fn storage_key_setting_moves_the_mirror() {
    let temp_dir = tempfile::tempdir().unwrap();
    formdesk(temp_dir.path())
        .args(["config", "storage-key", "people"])
        .assert()
        .success();

    submit(temp_dir.path(), "A", "X", &[]);

    assert!(temp_dir.path().join("people.json").exists());
    assert!(!temp_dir.path().join("formData.json").exists());
}
