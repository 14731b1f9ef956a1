use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

use super::with_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("reset")
        .about("Move the current branch to a commit and check out its files")
        .arg(
            Arg::with_name("commit")
                .required(true)
                .help("Commit ID or unique prefix"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let commit = matches.value_of("commit").unwrap();
    with_repo(app, |repo| repo.reset(commit))?;
    Ok(())
}
