use std::{fs, path::Path};

use assert_cmd::Command;

// Build a `gitlet` command that runs in `dir`.
pub fn gitlet(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").unwrap();
    cmd.current_dir(dir).env_remove("GITLET_LOG");
    cmd
}

// Run `gitlet init` in a new temporary directory.
#[allow(dead_code)]
pub fn init_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    gitlet(dir.path()).arg("init").assert().success();
    dir
}

// Write `content` to `name`, then add and commit it.
#[allow(dead_code)]
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    fs::write(dir.join(name), content).unwrap();
    gitlet(dir).args(&["add", name]).assert().success();
    gitlet(dir).args(&["commit", message]).assert().success();
}

#[allow(dead_code)]
pub fn read(dir: &Path, name: &str) -> Option<String> {
    fs::read_to_string(dir.join(name)).ok()
}
