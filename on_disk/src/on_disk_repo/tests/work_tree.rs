use super::super::*;

use crate::TempRepo;

#[test]
fn lists_only_top_level_files() {
    let tr = TempRepo::new();
    tr.write("b", "2").write("a", "1");
    fs::create_dir(tr.path().join("subdir")).unwrap();
    fs::write(tr.path().join("subdir/nested"), "3").unwrap();

    let r = OnDiskRepo::new(tr.path()).unwrap();
    assert_eq!(r.work_files().unwrap(), vec!["a", "b"]);
}

#[test]
fn read_write_remove() {
    let tr = TempRepo::new();
    let mut r = OnDiskRepo::new(tr.path()).unwrap();

    assert_eq!(r.read_work_file("a").unwrap(), None);

    r.write_work_file("a", b"hello").unwrap();
    assert_eq!(tr.read("a"), Some("hello".to_string()));
    assert_eq!(r.read_work_file("a").unwrap(), Some(b"hello".to_vec()));

    r.remove_work_file("a").unwrap();
    assert_eq!(tr.read("a"), None);

    // Removing a missing file is not an error.
    r.remove_work_file("a").unwrap();
}

#[test]
fn directory_is_not_a_file() {
    let tr = TempRepo::new();
    fs::create_dir(tr.path().join("subdir")).unwrap();

    let r = OnDiskRepo::new(tr.path()).unwrap();
    assert_eq!(r.read_work_file("subdir").unwrap(), None);
}

#[test]
fn rejects_paths_outside_work_dir() {
    let tr = TempRepo::new();
    let mut r = OnDiskRepo::new(tr.path()).unwrap();

    assert!(matches!(
        r.write_work_file("../escape", b"x"),
        Err(Error::InvalidPath { .. })
    ));
    assert!(matches!(
        r.read_work_file(".gitlet"),
        Err(Error::InvalidPath { .. })
    ));
    assert!(matches!(
        r.remove_work_file("subdir/nested"),
        Err(Error::InvalidPath { .. })
    ));
}

#[test]
fn work_blob_snapshot() {
    let tr = TempRepo::new();
    tr.write("a", "hello");

    let r = OnDiskRepo::new(tr.path()).unwrap();
    let blob = r.work_blob("a").unwrap().unwrap();
    assert_eq!(blob, Blob::new("a", b"hello".to_vec()));
    assert!(r.work_blob("missing").unwrap().is_none());
}
