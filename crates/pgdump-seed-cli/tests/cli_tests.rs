//! CLI integration tests for pgdump-seed.
//!
//! These tests verify command-line argument parsing, help output,
//! fatal input checks and exit codes. Loading runs use --dry-run so no
//! document store is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const DUMP: &str = "\
COPY \"backup_osclass\".\"oc_t_category\" (pk_i_id, fk_i_parent_id, b_enabled) FROM stdin;
1\t\\N\tt
\\.

COPY \"backup_osclass\".\"oc_t_category_description\" (fk_i_category_id, s_name, s_slug) FROM stdin;
1\tLand\tland
\\.

COPY \"public\".\"oc_t_item\" (pk_i_id, fk_i_category_id, f_price, b_enabled, b_active, b_spam) FROM stdin;
10\t1\t2500000.00\tt\tt\tf
\\.
";

/// Get a command for the pgdump-seed binary with a clean environment.
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("pgdump-seed").unwrap();
    cmd.env_remove("APPWRITE_API_KEY")
        .env_remove("APPWRITE_ENDPOINT")
        .env_remove("APPWRITE_PROJECT_ID")
        .env_remove("APPWRITE_DATABASE_ID");
    cmd
}

fn dump_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--skip-clear"))
        .stdout(predicate::str::contains("--batch-size"))
        .stdout(predicate::str::contains("--health-check"))
        .stdout(predicate::str::contains("full_remote_backup.sql"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgdump-seed"));
}

#[test]
fn test_log_format_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"));
}

#[test]
fn test_verbosity_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: info]"));
}

// =============================================================================
// Fatal Input Tests (Exit Code 1)
// =============================================================================

#[test]
fn test_missing_credential_exits_with_code_1() {
    let dump = dump_file(DUMP);
    cmd()
        .arg(dump.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("APPWRITE_API_KEY"));
}

#[test]
fn test_missing_dump_file_exits_with_code_1() {
    cmd()
        .env("APPWRITE_API_KEY", "key")
        .arg("nonexistent_dump_file.sql")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Dump file not found"));
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "invalid: yaml: content: [").unwrap();

    cmd()
        .args(["--dry-run", "--config", file.path().to_str().unwrap()])
        .assert()
        .code(1);
}

#[test]
fn test_zero_batch_size_exits_with_code_1() {
    let dump = dump_file(DUMP);
    cmd()
        .args(["--dry-run", "--batch-size", "0"])
        .arg(dump.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("batch_size"));
}

#[test]
fn test_unknown_log_format_exits_with_code_1() {
    cmd()
        .args(["--dry-run", "--log-format", "xml"])
        .assert()
        .code(1);
}

// =============================================================================
// Dry Run Tests
// =============================================================================

#[test]
fn test_dry_run_prints_summary() {
    let dump = dump_file(DUMP);
    cmd()
        .args(["--dry-run", "--batch-delay-ms", "0"])
        .arg(dump.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeding completed!"))
        .stdout(predicate::str::contains("Categories: 1 added, 0 errors"))
        .stdout(predicate::str::contains("Listings: 1 added, 0 errors"));
}

#[test]
fn test_dry_run_json_output() {
    let dump = dump_file(DUMP);
    let output = cmd()
        .args(["--dry-run", "--output-json"])
        .arg(dump.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["status"], "completed");
    assert_eq!(result["categories"]["success_count"], 1);
    assert_eq!(result["listings"]["success_count"], 1);
}

#[test]
fn test_dry_run_with_empty_dump_succeeds() {
    let dump = dump_file("-- empty dump\n");
    cmd()
        .arg("--dry-run")
        .arg(dump.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Listings: 0 added, 0 errors"));
}

#[test]
fn test_dry_run_health_check() {
    cmd()
        .args(["--dry-run", "--health-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target (memory): OK"));
}
