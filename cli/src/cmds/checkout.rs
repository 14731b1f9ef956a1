use crate::{App, Result};

use clap::{AppSettings, Arg, ArgMatches, SubCommand};

use super::with_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("checkout")
        .about("Restore a file, or switch branches")
        .setting(AppSettings::ArgRequiredElseHelp)
        .after_help(
            "USAGE FORMS:\n    \
             gitlet checkout -- <file>             Restore <file> from the head commit\n    \
             gitlet checkout <commit> -- <file>    Restore <file> from <commit>\n    \
             gitlet checkout <branch>              Switch to <branch>",
        )
        .arg(
            Arg::with_name("target")
                .help("Branch to switch to, or commit ID (or unique prefix) to restore from"),
        )
        .arg(
            Arg::with_name("file")
                .last(true)
                .help("File to restore"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let target = matches.value_of("target");
    let file = matches.value_of("file");

    with_repo(app, |repo| match (target, file) {
        (None, Some(file)) => repo.checkout_file(file),
        (Some(commit), Some(file)) => repo.checkout_file_from(commit, file),
        (Some(branch), None) => repo.checkout_branch(branch),
        (None, None) => unreachable!(),
        // unreachable: ArgRequiredElseHelp exits before we get here.
    })
}
