//! End-to-end tests for the `lazydoc` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lazydoc(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lazydoc").unwrap();
    cmd.current_dir(cwd.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("LAZYDOC_COMMENT")
        .env_remove("LAZYDOC_DIR");
    cmd
}

#[test]
fn test_annotates_directory_in_place() {
    let temp = TempDir::new().unwrap();
    let pkg = temp.path().join("pkg");
    fs::create_dir(&pkg).unwrap();
    fs::write(pkg.join("foo.go"), "package pkg\n\nfunc Foo() {}\n\nfunc bar() {}\n").unwrap();

    lazydoc(&temp)
        .args(["-c", "does a thing", "-d", "pkg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foo.go"));

    assert_eq!(
        fs::read_to_string(pkg.join("foo.go")).unwrap(),
        "package pkg\n\n// Foo does a thing\nfunc Foo() {}\n\nfunc bar() {}\n"
    );
}

#[test]
fn test_default_comment_text() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("t.go"), "package t\n\ntype Thing struct{}\n").unwrap();

    lazydoc(&temp).args(["--dir", "t.go"]).assert().success();

    assert_eq!(
        fs::read_to_string(temp.path().join("t.go")).unwrap(),
        "package t\n\n// Thing --default comment--\ntype Thing struct{}\n"
    );
}

#[test]
fn test_bad_file_does_not_stop_the_run() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.go"), "package p\n\nfunc (\n").unwrap();
    fs::write(temp.path().join("b.go"), "package p\n\nvar Count int\n").unwrap();

    lazydoc(&temp)
        .args(["-c", "todo", "-d", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.go").and(predicate::str::contains("b.go")))
        .stderr(predicate::str::contains("a.go"));

    assert_eq!(
        fs::read_to_string(temp.path().join("a.go")).unwrap(),
        "package p\n\nfunc (\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("b.go")).unwrap(),
        "package p\n\n// Count todo\nvar Count int\n"
    );
}

#[test]
fn test_config_file_and_env() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("x.go"), "package x\n\nconst Max = 3\n").unwrap();
    fs::write(temp.path().join("lazydoc.toml"), "comment = \"from file\"\n").unwrap();

    lazydoc(&temp)
        .env("LAZYDOC_DIR", "x.go")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("x.go")).unwrap(),
        "package x\n\n// Max from file\nconst Max = 3\n"
    );
}

#[test]
fn test_missing_dir_flag_fails() {
    let temp = TempDir::new().unwrap();

    lazydoc(&temp)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("dir"));
}

#[test]
fn test_nonexistent_target_fails() {
    let temp = TempDir::new().unwrap();

    lazydoc(&temp)
        .args(["-d", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_help_lists_flags() {
    let temp = TempDir::new().unwrap();

    lazydoc(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--comment").and(predicate::str::contains("--dir")));
}
