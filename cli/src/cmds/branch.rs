use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

use super::with_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("branch")
        .about("Create a branch at the current head")
        .arg(
            Arg::with_name("name")
                .required(true)
                .help("Name of the new branch"),
        )
}

pub(crate) fn rm_subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("rm-branch")
        .about("Delete a branch pointer")
        .arg(
            Arg::with_name("name")
                .required(true)
                .help("Name of the branch to delete"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let name = matches.value_of("name").unwrap();
    with_repo(app, |repo| repo.branch(name))
}

pub(crate) fn run_rm(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let name = matches.value_of("name").unwrap();
    with_repo(app, |repo| repo.remove_branch(name))
}
