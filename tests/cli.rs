use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn household(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("household").expect("bin");
    cmd.env("HOUSEHOLD_CLI_DATA_DIR", data_dir.path())
        .env_remove("HOUSEHOLD_API_URL")
        .env_remove("HOUSEHOLD_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    household(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("member"))
        .stdout(predicate::str::contains("expense"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn config_shows_paths_and_defaults() {
    let dir = TempDir::new().unwrap();
    household(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_string_lossy().as_ref()))
        .stdout(predicate::str::contains("session.json"))
        .stdout(predicate::str::contains("₹"));
}

#[test]
fn set_api_url_is_persisted() {
    let dir = TempDir::new().unwrap();
    household(&dir)
        .args(["config", "set-api-url", "https://budget.example.com/api/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://budget.example.com/api"));

    household(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API URL:  https://budget.example.com/api"));
}

#[test]
fn set_api_url_rejects_other_schemes() {
    let dir = TempDir::new().unwrap();
    household(&dir)
        .args(["config", "set-api-url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http"));
}

#[test]
fn show_requires_login() {
    let dir = TempDir::new().unwrap();
    household(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn member_commands_require_login() {
    let dir = TempDir::new().unwrap();
    household(&dir)
        .args(["member", "add", "Asha", "--salary", "30000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_without_session_is_harmless() {
    let dir = TempDir::new().unwrap();
    household(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn corrupt_session_file_is_discarded() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data").join("session.json"), "{ broken").unwrap();

    household(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
    assert!(!dir.path().join("data").join("session.json").exists());
}
