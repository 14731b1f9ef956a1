use std::{io::Write, path::PathBuf};

#[cfg(test)]
use std::{ffi::OsString, path::Path};

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, ArgMatches};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("gitlet")
        .version(crate_version!())
        .about("A tiny version-control system")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands);

    cmds::add_subcommands(app)
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdout: &'a mut dyn Write,

    /// Working directory to operate on. `None` means the process's
    /// current directory.
    pub work_dir: Option<PathBuf>,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    /// Run a command against `work_dir` and return what it printed.
    #[cfg(test)]
    pub fn run_in<I, T>(work_dir: &Path, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("gitlet"));

        let mut stdout = Vec::new();

        App {
            arg_matches: clap_app().get_matches_from_safe(args)?,
            stdout: &mut stdout,
            work_dir: Some(work_dir.to_path_buf()),
        }
        .run()?;

        Ok(stdout)
    }

    /// Like `run_in`, but the output is returned as a string.
    #[cfg(test)]
    pub fn run_in_str<I, T>(work_dir: &Path, args: I) -> Result<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(String::from_utf8(App::run_in(work_dir, args)?)?)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    #[cfg(not(tarpaulin_include))]
    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    use super::App;

    #[test]
    fn no_subcommand_prints_help() {
        let mut cmd = Command::cargo_bin("gitlet").unwrap();
        cmd.assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::starts_with("gitlet 0."))
            .stderr(predicate::str::contains("USAGE:"));
    }

    #[test]
    fn version() {
        let mut cmd = Command::cargo_bin("gitlet").unwrap();
        cmd.arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("gitlet 0."))
            .stderr("");
    }

    #[test]
    fn unknown_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let err = App::run_in(dir.path(), vec!["bogus"]).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }
}
