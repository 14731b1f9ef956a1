use std::io::Write;

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

use super::open_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("find")
        .about("Print the IDs of all commits with the given message")
        .arg(
            Arg::with_name("message")
                .required(true)
                .help("Exact commit message to look for"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let message = matches.value_of("message").unwrap();

    for id in open_repo(app)?.find(message)? {
        writeln!(app, "{}", id)?;
    }
    Ok(())
}
