use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn circlite_cmd() -> Command {
    Command::cargo_bin("circlite").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    circlite_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("cache"));
}

#[test]
fn test_help_shows_plain_flag() {
    circlite_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--plain"))
        .stdout(predicate::str::contains("Disable the fishing mechanic"));
}

#[test]
fn test_fetch_help_shows_refresh_flag() {
    circlite_cmd()
        .arg("fetch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--refresh"));
}

#[test]
fn test_cache_status_on_fresh_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    circlite_cmd()
        .arg("cache")
        .arg("status")
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("cache: empty"));
}

#[test]
fn test_cache_clear_on_fresh_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    circlite_cmd()
        .arg("cache")
        .arg("clear")
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("cache cleared"));
}

#[test]
fn test_stats_on_fresh_database_shows_zero_counters() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    circlite_cmd()
        .arg("stats")
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("cache: empty"))
        .stdout(predicate::str::contains("钓鱼次数: 0"));
}

#[test]
fn test_fetch_failure_prints_fixed_message() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    // Nothing listens on this port; with an empty cache the fetch fails.
    circlite_cmd()
        .arg("fetch")
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .arg("--api-url")
        .arg("http://127.0.0.1:9/")
        .assert()
        .failure()
        .stdout(predicate::str::contains("加载失败"));
}

#[test]
fn test_invalid_page_size_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    circlite_cmd()
        .arg("stats")
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .arg("--page-size")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page size"));
}
