use std::fs;

mod common;

use common::TempRepo;

#[test]
fn init_lays_out_the_state_directory() {
    let fixture = TempRepo::new();
    let state = fixture.path().join(".mingit");

    assert!(state.join("objects").is_dir());
    assert!(state.join("staging").is_dir());
    assert!(state.join("refs").join("heads").join("master").is_file());
    assert!(state.join("refs").join("remotes").is_dir());
    assert!(state.join("config").is_file());

    let head = fs::read_to_string(state.join("HEAD")).unwrap();
    assert_eq!(head, "ref: refs/heads/master\n");
}

#[test]
fn the_root_commit_is_fixed() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    let root = repo.head_commit().unwrap();
    assert_eq!(root.message(), "initial commit");
    assert_eq!(root.timestamp(), 0);
    assert!(root.parents().is_empty());
    assert!(root.files().is_empty());
}

#[test]
fn fresh_repositories_share_one_root_commit() {
    // Every repository starts from the same commit, which is what lets
    // two unrelated working copies push and pull from day one.
    let a = TempRepo::new();
    let b = TempRepo::new();

    assert_eq!(
        a.repo().head_id().unwrap(),
        b.repo().head_id().unwrap()
    );
}

#[test]
fn a_repository_survives_reopening() {
    let fixture = TempRepo::new();

    fixture.write_file("wug.txt", "This is a wug.\n");
    let repo = fixture.repo();
    repo.add("wug.txt").unwrap();
    repo.commit("add wug").unwrap();
    drop(repo);

    let repo = fixture.repo();
    assert_eq!(repo.head_branch().unwrap(), "master");
    assert_eq!(repo.log().unwrap().len(), 2);
    assert_eq!(repo.head_commit().unwrap().message(), "add wug");
}
