#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// Engine script run through `sh -c`; the request JSON lands in `$0`.
const TRIM_ENGINE: &str = r#"sed -e 's/[[:space:]]*$//'"#;

fn prismafmt() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("prismafmt"))
}

fn with_engine(cmd: &mut Command, script: &str) {
    cmd.args(["--engine", "sh", "--engine-arg", "-c", "--engine-arg", script]);
}

#[test]
fn languages_prints_the_registry() {
    prismafmt()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "Prisma""#))
        .stdout(predicate::str::contains(r#""linguistLanguageId": 499933428"#))
        .stdout(predicate::str::contains(r#"".prisma""#));
}

#[test]
fn request_shows_the_engine_payload() {
    prismafmt()
        .args(["request", "schema.prisma", "--tab-width", "4", "--use-tabs"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""uri": "file:///"#))
        .stdout(predicate::str::contains(r#""tabSize": 4"#))
        .stdout(predicate::str::contains(r#""insertSpaces": false"#))
        .stdout(predicate::str::contains(r#""trimFinalNewlines": true"#));
}

#[test]
fn request_refuses_unregistered_files() {
    prismafmt()
        .args(["request", "schema.sql"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no parser could be inferred"));
}

#[test]
fn stdin_is_formatted_through_the_engine() {
    let mut cmd = prismafmt();
    cmd.args(["fmt", "--stdin-filepath", "schema.prisma"]);
    with_engine(&mut cmd, TRIM_ENGINE);
    cmd.write_stdin("model A {   \n  id Int  \n}\n")
        .assert()
        .success()
        .stdout("model A {\n  id Int\n}\n");
}

#[test]
fn stdin_with_unknown_extension_fails() {
    let mut cmd = prismafmt();
    cmd.args(["fmt", "--stdin-filepath", "notes.txt"]);
    with_engine(&mut cmd, TRIM_ENGINE);
    cmd.write_stdin("model A {}\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no parser could be inferred"));
}

#[test]
fn check_then_write_then_check() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.prisma");
    fs::write(&schema, "model A {  \n  id Int\n}\n").unwrap();

    let mut check = prismafmt();
    check.arg("fmt").arg("--check").arg(dir.path());
    with_engine(&mut check, TRIM_ENGINE);
    check.assert().code(1);

    let mut write = prismafmt();
    write.arg("fmt").arg("--write").arg(dir.path());
    with_engine(&mut write, TRIM_ENGINE);
    write.assert().success();
    assert_eq!(fs::read_to_string(&schema).unwrap(), "model A {\n  id Int\n}\n");

    let mut recheck = prismafmt();
    recheck.arg("fmt").arg("--check").arg(dir.path());
    with_engine(&mut recheck, TRIM_ENGINE);
    recheck.assert().success();
}

#[test]
fn engine_failure_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.prisma");
    fs::write(&schema, "model {\n").unwrap();

    let mut cmd = prismafmt();
    cmd.arg("fmt").arg("--check").arg(&schema);
    with_engine(&mut cmd, "echo 'Error parsing attribute' >&2; exit 1");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Error parsing attribute"));
    assert_eq!(fs::read_to_string(&schema).unwrap(), "model {\n");
}

#[test]
fn write_and_check_are_exclusive() {
    prismafmt()
        .args(["fmt", "--write", "--check", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn missing_path_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.prisma");

    let mut cmd = prismafmt();
    cmd.arg("fmt").arg("--check").arg(&missing);
    with_engine(&mut cmd, TRIM_ENGINE);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("missing.prisma"));
}

#[test]
fn stdout_mode_keeps_each_header_with_its_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.prisma");
    let second = dir.path().join("b.prisma");
    fs::write(&first, "model A {   \n  id Int\n}\n").unwrap();
    fs::write(&second, "model B {\n  name String   \n}\n").unwrap();

    let mut cmd = prismafmt();
    cmd.arg("fmt").arg(dir.path());
    with_engine(&mut cmd, TRIM_ENGINE);
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let first_block = format!("===== {} =====\nmodel A {{\n  id Int\n}}\n", first.display());
    let second_block = format!("===== {} =====\nmodel B {{\n  name String\n}}\n", second.display());
    assert!(stdout.contains(&first_block), "{stdout}");
    assert!(stdout.contains(&second_block), "{stdout}");
    assert_eq!(stdout.len(), first_block.len() + second_block.len());
}
