use assert_cmd::Command;
use predicates::prelude::*;

fn command(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("sheets-wrapper").unwrap();
    cmd.current_dir(dir)
        .env("CONFIG_PATH", dir.join("no-config"))
        .env("SHEETS_WRAPPER_CREDENTIALS_PATH", dir.join("credentials.json"))
        .env("SHEETS_WRAPPER_TOKEN_PATH", dir.join("token.json"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_payload_exits_with_status_one_and_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("data").join("update.json");

    command(dir.path())
        .env("SHEETS_WRAPPER_PAYLOAD_PATH", &payload)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(payload.display().to_string()))
        .stdout(predicate::str::contains("is missing"))
        .stdout(predicate::str::contains("Done").not());
}

#[test]
fn malformed_payload_fails_before_authorization() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("update.json");
    std::fs::write(&payload, r#"{"spreadsheetId": 1}"#).unwrap();

    command(dir.path())
        .env("SHEETS_WRAPPER_PAYLOAD_PATH", &payload)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Enter verification code").not())
        .stdout(predicate::str::contains("Done").not());

    assert!(!dir.path().join("token.json").exists());
}

#[test]
fn missing_credentials_fail_without_prompting() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("update.json");
    std::fs::write(
        &payload,
        r#"{"spreadsheetId": "abc", "listName": "Sheet1", "data": {"A1": [[1]]}}"#,
    )
    .unwrap();

    command(dir.path())
        .env("SHEETS_WRAPPER_PAYLOAD_PATH", &payload)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Enter verification code").not());
}
