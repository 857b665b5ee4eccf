//! Runs the `backoffice` binary against an API that is not there.
//!
//! Port 9 on loopback refuses connections, so every request fails at the
//! transport and the outcome depends on the synthetic-fallback flag alone.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Sandbox {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// Run the CLI with an isolated session file and the unreachable API.
    fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_backoffice"));
        cmd.args(["--api-url", UNREACHABLE_API, "--timeout-secs", "2"]);
        cmd.arg("--session-file").arg(self.session_file());
        cmd.args(args);
        cmd.env_remove("BACKOFFICE_SYNTHETIC_FALLBACK");
        cmd.env_remove("BACKOFFICE_PASSWORD");
        cmd.env_remove("BACKOFFICE_NEW_USER_PASSWORD");
        cmd.env_remove("RUST_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.output().expect("Failed to execute CLI")
    }

    fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

fn read_session(path: &Path) -> serde_json::Value {
    let json = std::fs::read_to_string(path).expect("session file should exist");
    serde_json::from_str(&json).expect("session file should be JSON")
}

#[test]
fn version_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_backoffice"))
        .arg("--version")
        .output()
        .expect("Failed to execute CLI");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("backoffice "));
}

#[test]
fn list_fails_without_fallback() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.run_failure(&["employees", "list"]);
    assert!(stderr.contains("Failed to load page 1"), "stderr: {}", stderr);
}

#[test]
fn list_serves_synthetic_data_with_fallback() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&["--synthetic-fallback", "employees", "list"]);
    assert!(stdout.contains("John Doe"));
    assert!(stdout.contains("Jane Smith"));
}

#[test]
fn list_as_json_prints_one_record_per_line() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&["--synthetic-fallback", "corporates", "list", "--json"]);

    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["no"], 1);
    assert_eq!(records[0]["name"], "Acme Holdings");
}

#[test]
fn page_past_the_end_shows_the_last_page() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--synthetic-fallback", "employees", "list", "--page", "5"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Page 1 of 1"), "stderr: {}", stderr);
}

#[test]
fn employee_stats_come_from_synthetic_counts() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&["--synthetic-fallback", "employees", "stats"]);
    assert!(stdout.contains("Employees: 2"), "stdout: {}", stdout);
    assert!(stdout.contains("Verified: 1"), "stdout: {}", stdout);
    assert!(stdout.contains("Pending requests: 1"), "stdout: {}", stdout);
}

#[test]
fn employee_transactions_are_listed_for_that_employee() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&[
        "--synthetic-fallback",
        "employees",
        "transactions",
        "emp-7",
    ]);
    assert!(stdout.contains("tx-emp-7-1"));
    assert!(stdout.contains("repayment"));
}

#[test]
fn verify_never_pretends_to_succeed() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.run_failure(&["--synthetic-fallback", "employees", "verify", "emp-1"]);
    assert!(stderr.contains("Failed to verify employee emp-1"), "stderr: {}", stderr);
}

#[test]
fn created_user_is_echoed_with_a_synthetic_id() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&[
        "--synthetic-fallback",
        "users",
        "create",
        "--name",
        "Ops User",
        "--email",
        "ops@advanzpay.com",
        "--password",
        "changeme123",
        "--role",
        "operator",
    ]);
    assert!(stdout.contains("Created user user-100001"), "stdout: {}", stdout);
}

#[test]
fn login_then_logout_round_trips_the_session_file() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&[
        "--synthetic-fallback",
        "auth",
        "login",
        "--email",
        "admin@advanzpay.com",
        "--password",
        "hunter22",
    ]);
    assert!(stdout.contains("Logged in successfully"));

    let session = read_session(&sandbox.session_file());
    let token = session["authToken"].as_str().unwrap();
    assert!(token.starts_with("dummy-token-"));

    let stdout = sandbox.run_success(&["--synthetic-fallback", "auth", "whoami"]);
    assert!(stdout.contains("Admin User"));

    sandbox.run_success(&["auth", "logout"]);
    assert!(!sandbox.session_file().exists());
}

#[test]
fn login_fails_without_fallback_and_stores_nothing() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.run_failure(&[
        "auth",
        "login",
        "--email",
        "admin@advanzpay.com",
        "--password",
        "hunter22",
    ]);
    assert!(stderr.contains("Failed to login"));
    assert!(!sandbox.session_file().exists());
}

#[test]
fn whoami_requires_a_session() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.run_failure(&["--synthetic-fallback", "auth", "whoami"]);
    assert!(stderr.contains("No active session"));
}

#[test]
fn invalid_form_is_rejected_even_with_fallback() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.run_failure(&[
        "--synthetic-fallback",
        "employees",
        "create",
        "--name",
        "John Doe",
        "--email",
        "not-an-email",
        "--mobile",
        "+1234567890",
        "--salary",
        "50000",
        "--acc-no",
        "123456789",
    ]);
    assert!(stderr.contains("valid email"), "stderr: {}", stderr);
}

#[test]
fn create_falls_back_to_a_synthetic_record() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&[
        "--synthetic-fallback",
        "employees",
        "create",
        "--name",
        "John Doe",
        "--email",
        "john.doe@company.com",
        "--mobile",
        "+1234567890",
        "--salary",
        "50000",
        "--acc-no",
        "123456789",
    ]);
    assert!(stdout.contains("Enrolled employee 100001"));
}

#[test]
fn status_toggle_never_falls_back() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.run_failure(&["--synthetic-fallback", "employees", "toggle", "1"]);
    assert!(stderr.contains("Failed to update status of 1"), "stderr: {}", stderr);
}

#[test]
fn toggle_of_a_record_not_on_the_page_is_rejected() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.run_failure(&["--synthetic-fallback", "corporates", "toggle", "99"]);
    assert!(stderr.contains("Record 99 is not on this page"), "stderr: {}", stderr);
}
