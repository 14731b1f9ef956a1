use std::io::Write;

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

use super::with_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("merge")
        .about("Merge another branch into the current branch")
        .arg(
            Arg::with_name("branch")
                .required(true)
                .help("Branch to merge from"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let branch = matches.value_of("branch").unwrap();
    let outcome = with_repo(app, |repo| repo.merge(branch))?;

    if outcome.has_conflicts() {
        writeln!(app, "Encountered a merge conflict.")?;
    }
    Ok(())
}
