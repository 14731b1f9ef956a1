use std::{env, path::Path};

use gitlet_core::repo::Result;
use gitlet_on_disk::OnDiskRepo;

// Open the gitlet store whose `.gitlet` directory sits directly inside `path`.
//
// Parent directories are not searched: gitlet tracks a single flat
// directory, so the repository root is always the directory the command
// runs in.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDiskRepo> {
    OnDiskRepo::new(path.as_ref())
}

// Open the gitlet store in the current working directory.
#[cfg(not(tarpaulin_include))]
pub fn from_current_dir() -> Result<OnDiskRepo> {
    // This function is excluded from code coverage because we can't
    // be sure of the execution environment while testing. So we keep
    // it as simple as possible.
    let path = env::current_dir()?;
    from_path(path)
}
