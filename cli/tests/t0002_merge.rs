use std::fs;

use predicates::prelude::*;

mod common;
use common::{commit_file, gitlet, init_repo, read};

#[test]
fn merge_without_conflict() {
    let dir = init_repo();
    let path = dir.path();

    commit_file(path, "a", "1", "base");
    gitlet(path).args(&["branch", "other"]).assert().success();
    gitlet(path).args(&["checkout", "other"]).assert().success();
    commit_file(path, "a", "2", "change a");
    gitlet(path).args(&["checkout", "master"]).assert().success();

    gitlet(path)
        .args(&["merge", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read(path, "a"), Some("2".to_string()));

    gitlet(path)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("===\ncommit "))
        .stdout(predicate::str::is_match("\nMerge: [0-9a-f]{7} [0-9a-f]{7}\n").unwrap())
        .stdout(predicate::str::contains("\nMerged other into master\n"));
}

#[test]
fn merge_with_conflict() {
    let dir = init_repo();
    let path = dir.path();

    commit_file(path, "a", "1", "base");
    gitlet(path).args(&["branch", "other"]).assert().success();
    commit_file(path, "a", "2", "ours");
    gitlet(path).args(&["checkout", "other"]).assert().success();
    commit_file(path, "a", "3", "theirs");
    gitlet(path).args(&["checkout", "master"]).assert().success();

    gitlet(path)
        .args(&["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        fs::read(path.join("a")).unwrap(),
        b"<<<<<<< HEAD\n2\n=======\n3\n>>>>>>>".to_vec()
    );

    gitlet(path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===",
        ))
        .stdout(predicate::str::contains("a (modified)"));
}

#[test]
fn merge_refuses_uncommitted_changes() {
    let dir = init_repo();
    let path = dir.path();

    gitlet(path).args(&["branch", "other"]).assert().success();
    fs::write(path.join("a"), "1").unwrap();
    gitlet(path).args(&["add", "a"]).assert().success();

    gitlet(path)
        .args(&["merge", "other"])
        .assert()
        .code(13)
        .stdout("")
        .stderr("You have uncommitted changes.\n");
}
