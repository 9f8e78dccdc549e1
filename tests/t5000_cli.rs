use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

mod common;

use common::TempRepo;

fn mingit(fixture: &TempRepo) -> Command {
    let mut cmd = Command::cargo_bin("mingit").unwrap();
    cmd.current_dir(fixture.path());
    cmd
}

#[test]
fn init_is_silent_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("mingit")
        .unwrap()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout("")
        .stderr("");

    assert!(dir.path().join(".mingit").is_dir());
}

#[test]
fn expected_failures_print_and_exit_zero() {
    let fixture = TempRepo::new();

    // Wrong, but in the expected way: message to stdout, exit code 0.
    mingit(&fixture)
        .args(&["add", "no-such-file.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n")
        .stderr("");
}

#[test]
fn add_commit_log_round_trip() {
    let fixture = TempRepo::new();
    fixture.write_file("wug.txt", "This is a wug.\n");

    mingit(&fixture)
        .args(&["add", "wug.txt"])
        .assert()
        .success()
        .stdout("");

    mingit(&fixture)
        .args(&["commit", "add wug"])
        .assert()
        .success()
        .stdout("");

    mingit(&fixture)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("===\ncommit "))
        .stdout(predicate::str::contains("add wug"))
        .stdout(predicate::str::contains("initial commit"));
}

#[test]
fn checkout_file_uses_the_double_dash_form() {
    let fixture = TempRepo::new();
    fixture.write_file("wug.txt", "committed\n");

    mingit(&fixture).args(&["add", "wug.txt"]).assert().success();
    mingit(&fixture)
        .args(&["commit", "add wug"])
        .assert()
        .success();

    fixture.write_file("wug.txt", "scratch\n");
    mingit(&fixture)
        .args(&["checkout", "--", "wug.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(fixture.read_file("wug.txt"), "committed\n");
}

#[test]
fn merge_conflict_reports_but_exits_zero() {
    let fixture = TempRepo::new();

    fixture.write_file("wug.txt", "base\n");
    mingit(&fixture).args(&["add", "wug.txt"]).assert().success();
    mingit(&fixture).args(&["commit", "base"]).assert().success();
    mingit(&fixture).args(&["branch", "dev"]).assert().success();

    fixture.write_file("wug.txt", "ours\n");
    mingit(&fixture).args(&["add", "wug.txt"]).assert().success();
    mingit(&fixture).args(&["commit", "ours"]).assert().success();

    mingit(&fixture)
        .args(&["checkout", "dev"])
        .assert()
        .success();
    fixture.write_file("wug.txt", "theirs\n");
    mingit(&fixture).args(&["add", "wug.txt"]).assert().success();
    mingit(&fixture)
        .args(&["commit", "theirs"])
        .assert()
        .success();

    mingit(&fixture)
        .args(&["checkout", "master"])
        .assert()
        .success();
    mingit(&fixture)
        .args(&["merge", "dev"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        fixture.read_file("wug.txt"),
        "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>>\n"
    );
}

#[test]
fn damaged_repository_state_exits_nonzero() {
    let fixture = TempRepo::new();
    fs::write(fixture.path().join(".mingit").join("HEAD"), "garbage\n").unwrap();

    mingit(&fixture)
        .arg("status")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("ERROR: "));
}

#[test]
fn workdir_flag_replaces_changing_directory() {
    let fixture = TempRepo::new();
    fixture.write_file("wug.txt", "via -C\n");

    // Invoke from a different working directory entirely.
    let elsewhere = tempfile::tempdir().unwrap();
    let target = fixture.path().to_str().unwrap();

    Command::cargo_bin("mingit")
        .unwrap()
        .current_dir(elsewhere.path())
        .args(&["-C", target, "add", "wug.txt"])
        .assert()
        .success();

    Command::cargo_bin("mingit")
        .unwrap()
        .current_dir(elsewhere.path())
        .args(&["-C", target, "commit", "via -C"])
        .assert()
        .success();

    let repo = fixture.repo();
    assert_eq!(repo.head_commit().unwrap().message(), "via -C");
}

#[test]
fn push_and_pull_between_two_working_copies() {
    let alice = TempRepo::new();
    let bob = TempRepo::new();

    mingit(&alice)
        .args(&["add-remote", "bob", bob.path().to_str().unwrap()])
        .assert()
        .success();
    mingit(&bob)
        .args(&["add-remote", "alice", alice.path().to_str().unwrap()])
        .assert()
        .success();

    alice.write_file("story.txt", "chapter one\n");
    mingit(&alice)
        .args(&["add", "story.txt"])
        .assert()
        .success();
    mingit(&alice)
        .args(&["commit", "chapter one"])
        .assert()
        .success();
    mingit(&alice)
        .args(&["push", "bob", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(bob.read_file("story.txt"), "chapter one\n");

    bob.write_file("story.txt", "chapter one\nchapter two\n");
    mingit(&bob).args(&["add", "story.txt"]).assert().success();
    mingit(&bob)
        .args(&["commit", "chapter two"])
        .assert()
        .success();

    mingit(&alice)
        .args(&["pull", "bob", "master"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(alice.read_file("story.txt"), "chapter one\nchapter two\n");
}
