use super::super::*;

use gitlet_core::Repository;
use tempfile::tempdir;

use crate::TempRepo;

#[test]
fn creates_layout() {
    let dir = tempdir().unwrap();
    let r = OnDiskRepo::init(dir.path()).unwrap();

    let gitlet_dir = dir.path().join(".gitlet");
    assert_eq!(r.gitlet_dir(), gitlet_dir.as_path());
    assert!(gitlet_dir.join("objects").is_dir());
    assert!(gitlet_dir.join("commits").is_dir());
    assert!(gitlet_dir.join("branches").is_dir());
    assert!(gitlet_dir.join("config").is_file());

    // The root record is written by `Repository::init`.
    assert!(!gitlet_dir.join("state").exists());
    assert!(matches!(r.state(), Err(Error::NotInitialized)));
}

#[test]
fn fresh_repos_are_identical() {
    // The root commit has a fixed timestamp, so two new repositories match
    // byte for byte.
    let a = TempRepo::new();
    let b = TempRepo::new();

    assert!(!dir_diff::is_different(a.path(), b.path()).unwrap());
}

#[test]
fn err_if_gitlet_dir_exists() {
    let dir = tempdir().unwrap();
    let gitlet_dir = dir.path().join(".gitlet");
    fs::create_dir_all(&gitlet_dir).unwrap();

    let err = OnDiskRepo::init(dir.path()).unwrap_err();
    if let Error::AlreadyInitialized = err {
        // expected case
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn init_twice_leaves_state_untouched() {
    let reference = TempRepo::new();
    let tr = TempRepo::new();

    assert!(matches!(
        OnDiskRepo::init(tr.path()),
        Err(Error::AlreadyInitialized)
    ));

    // A store whose directory exists but whose root record is present is
    // also rejected by the state machine.
    let store = OnDiskRepo::new(tr.path()).unwrap();
    assert!(matches!(
        Repository::init(store),
        Err(Error::AlreadyInitialized)
    ));

    assert!(!dir_diff::is_different(reference.path(), tr.path()).unwrap());
}

#[test]
fn err_if_work_dir_missing() {
    let dir = tempdir().unwrap();
    let work_dir = dir.path().join("bogus");

    assert!(matches!(
        OnDiskRepo::init(&work_dir),
        Err(Error::WorkDirDoesntExist(_))
    ));
    assert!(!work_dir.exists());
}
