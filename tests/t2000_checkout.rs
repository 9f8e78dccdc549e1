use std::fs;

use mingit::repo::Error;

mod common;

use common::TempRepo;

/// Copies the visible working files (everything except the state
/// directory) into a scratch directory for later comparison.
fn snapshot(fixture: &TempRepo) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(fixture.path()).unwrap() {
        let entry = entry.unwrap();
        if entry.file_type().unwrap().is_file() {
            fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
        }
    }
    dir
}

#[test]
fn checkout_file_from_an_old_commit_by_prefix() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("wug.txt", "v1\n");
    repo.add("wug.txt").unwrap();
    let v1 = repo.commit("v1").unwrap();

    fixture.write_file("wug.txt", "v2\n");
    repo.add("wug.txt").unwrap();
    repo.commit("v2").unwrap();

    let prefix = &v1.to_string()[..8];
    repo.checkout_file_from_commit(prefix, "wug.txt").unwrap();
    assert_eq!(fixture.read_file("wug.txt"), "v1\n");

    // The restore touched the working tree only; head is still v2.
    repo.checkout_file_from_head("wug.txt").unwrap();
    assert_eq!(fixture.read_file("wug.txt"), "v2\n");
}

#[test]
fn switching_branches_swaps_the_whole_tree() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("common.txt", "shared\n");
    fixture.write_file("master-only.txt", "m\n");
    repo.add("common.txt").unwrap();
    repo.add("master-only.txt").unwrap();
    repo.commit("master files").unwrap();

    repo.branch("dev").unwrap();
    repo.checkout_branch("dev").unwrap();
    repo.remove("master-only.txt").unwrap();
    fixture.write_file("dev-only.txt", "d\n");
    repo.add("dev-only.txt").unwrap();
    repo.commit("dev files").unwrap();

    assert!(!fixture.exists("master-only.txt"));
    assert!(fixture.exists("dev-only.txt"));

    repo.checkout_branch("master").unwrap();
    assert!(fixture.exists("master-only.txt"));
    assert!(!fixture.exists("dev-only.txt"));
    assert_eq!(fixture.read_file("common.txt"), "shared\n");
}

#[test]
fn switching_branches_discards_staged_changes() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("wug.txt", "master\n");
    repo.add("wug.txt").unwrap();
    repo.commit("master wug").unwrap();
    repo.branch("dev").unwrap();

    fixture.write_file("wug.txt", "staged but never committed\n");
    repo.add("wug.txt").unwrap();

    repo.checkout_branch("dev").unwrap();
    assert!(repo.status().unwrap().staged.is_empty());
    assert_eq!(fixture.read_file("wug.txt"), "master\n");

    assert!(matches!(repo.commit("noop"), Err(Error::NothingToCommit)));
}

#[test]
fn reset_moves_the_branch_and_clears_the_stage() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("wug.txt", "v1\n");
    repo.add("wug.txt").unwrap();
    let v1 = repo.commit("v1").unwrap();

    fixture.write_file("wug.txt", "v2\n");
    repo.add("wug.txt").unwrap();
    repo.commit("v2").unwrap();

    fixture.write_file("extra.txt", "staged\n");
    repo.add("extra.txt").unwrap();

    repo.reset(&v1.to_string()).unwrap();

    assert_eq!(repo.head_id().unwrap(), v1);
    assert_eq!(fixture.read_file("wug.txt"), "v1\n");
    assert!(repo.status().unwrap().staged.is_empty());

    // Still on master; only the tip moved.
    assert_eq!(repo.head_branch().unwrap(), "master");
    assert_eq!(repo.log().unwrap().len(), 2);
}

#[test]
fn untracked_file_blocks_a_switch_that_would_overwrite_it() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    repo.branch("dev").unwrap();
    repo.checkout_branch("dev").unwrap();
    fixture.write_file("wug.txt", "dev content\n");
    repo.add("wug.txt").unwrap();
    repo.commit("dev wug").unwrap();

    repo.checkout_branch("master").unwrap();
    fixture.write_file("wug.txt", "precious local work\n");

    assert!(matches!(
        repo.checkout_branch("dev"),
        Err(Error::UntrackedFileConflict)
    ));
    assert_eq!(fixture.read_file("wug.txt"), "precious local work\n");
    assert_eq!(repo.head_branch().unwrap(), "master");
}

#[test]
fn branch_points_at_the_head_where_it_was_created() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("wug.txt", "v1\n");
    repo.add("wug.txt").unwrap();
    let v1 = repo.commit("v1").unwrap();

    repo.branch("pinned").unwrap();

    fixture.write_file("wug.txt", "v2\n");
    repo.add("wug.txt").unwrap();
    repo.commit("v2").unwrap();

    repo.checkout_branch("pinned").unwrap();
    assert_eq!(repo.head_id().unwrap(), v1);
    assert_eq!(fixture.read_file("wug.txt"), "v1\n");
}

#[test]
fn round_trip_restores_the_exact_tree() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("a.txt", "alpha\n");
    fixture.write_file("b.txt", "beta\n");
    repo.add("a.txt").unwrap();
    repo.add("b.txt").unwrap();
    repo.commit("two files").unwrap();

    let before = snapshot(&fixture);

    repo.branch("dev").unwrap();
    repo.checkout_branch("dev").unwrap();
    fixture.write_file("a.txt", "rewritten\n");
    repo.add("a.txt").unwrap();
    repo.remove("b.txt").unwrap();
    repo.commit("diverge").unwrap();

    repo.checkout_branch("master").unwrap();
    let after = snapshot(&fixture);

    assert!(!dir_diff::is_different(before.path(), after.path()).unwrap());
}

#[test]
fn single_file_restore_from_another_branch() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("hello.txt", "hello\n");
    repo.add("hello.txt").unwrap();
    repo.commit("hello").unwrap();

    repo.branch("dev").unwrap();
    repo.checkout_branch("dev").unwrap();
    fixture.write_file("hello.txt", "world\n");
    repo.add("hello.txt").unwrap();
    let dev_tip = repo.commit("world").unwrap();

    repo.checkout_branch("master").unwrap();
    assert_eq!(fixture.read_file("hello.txt"), "hello\n");

    repo.checkout_file_from_commit(&dev_tip.to_string(), "hello.txt")
        .unwrap();
    assert_eq!(fixture.read_file("hello.txt"), "world\n");

    // Only the one file moved; HEAD and the branch tip did not.
    assert_eq!(repo.head_branch().unwrap(), "master");
    assert_ne!(repo.head_id().unwrap(), dev_tip);
}

#[test]
fn untracked_file_blocks_a_reset_that_would_overwrite_it() {
    let fixture = TempRepo::new();
    let repo = fixture.repo();

    fixture.write_file("wug.txt", "v1\n");
    repo.add("wug.txt").unwrap();
    let v1 = repo.commit("v1").unwrap();

    repo.remove("wug.txt").unwrap();
    let v2 = repo.commit("drop wug").unwrap();

    fixture.write_file("wug.txt", "precious local work\n");

    assert!(matches!(
        repo.reset(&v1.to_string()),
        Err(Error::UntrackedFileConflict)
    ));
    assert_eq!(fixture.read_file("wug.txt"), "precious local work\n");
    assert_eq!(repo.head_id().unwrap(), v2);
}
