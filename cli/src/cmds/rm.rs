use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

use super::with_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("rm")
        .about("Unstage a file, or stop tracking it and delete it")
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("Name of a file in the working directory"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let file = matches.value_of("file").unwrap();
    with_repo(app, |repo| repo.remove(file))?;
    Ok(())
}
