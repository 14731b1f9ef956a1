use std::io::Write;

use crate::{format, App, Result};

use clap::{ArgMatches, SubCommand};

use super::open_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("status").about("Show branches, staged files, and working-tree changes")
}

pub(crate) fn run(app: &mut App, _matches: &ArgMatches) -> Result<()> {
    let status = open_repo(app)?.status()?;
    write!(app, "{}", format::status(&status))?;
    Ok(())
}
