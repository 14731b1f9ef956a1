use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use gitlet_core::Repository;

use crate::OnDiskRepo;

/// A `TempRepo` creates a temporary gitlet repository on disk. It is
/// used in unit and integration tests that need a real working tree.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
#[derive(Default)]
pub struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: Option<tempfile::TempDir>,
    path: PathBuf,
}

impl TempRepo {
    // Create a new, initialized repo in a temporary directory.
    // This directory will be deleted when the struct is dropped.
    pub fn new() -> TempRepo {
        let r = TempRepo::uninitialized();
        r.init();
        r
    }

    // Create an empty temporary directory with no `.gitlet` directory.
    pub fn uninitialized() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path: PathBuf = tempdir.path().to_path_buf();

        TempRepo {
            tempdir: Some(tempdir),
            path,
        }
    }

    // Create a new, initialized repo in the specified location.
    // WARNING: This will erase any content already at that path.
    // Use this only when you need to manually inspect the results
    // of the test run.
    pub fn new_at_path<P: Into<PathBuf>>(p: P) -> TempRepo {
        let path = p.into();
        fs::remove_dir_all(&path).unwrap_or(());
        fs::create_dir_all(&path).unwrap();

        let r = TempRepo {
            tempdir: None,
            path,
        };

        r.init();
        r
    }

    fn init(&self) {
        let store = OnDiskRepo::init(&self.path).unwrap();
        Repository::init(store).unwrap();
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    // Write a file in the working tree.
    pub fn write(&self, name: &str, content: &str) -> &TempRepo {
        fs::write(self.path.join(name), content).unwrap();
        self
    }

    // Read a file from the working tree, or `None` if it doesn't exist.
    pub fn read(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path.join(name)).ok()
    }

    // Load the repository state.
    pub fn open(&self) -> Repository<OnDiskRepo> {
        Repository::open(OnDiskRepo::new(&self.path).unwrap()).unwrap()
    }

    // Load the repository, run `f` against it, and save the result.
    pub fn run<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Repository<OnDiskRepo>) -> T,
    {
        let mut r = self.open();
        let result = f(&mut r);
        r.save().unwrap();
        result
    }

    // Create a command struct pointing to the root of the repo.
    pub fn command<S: AsRef<OsStr>>(&self, program: S) -> Command {
        let mut c = Command::new(program);
        c.current_dir(&self.path);
        c
    }
}
