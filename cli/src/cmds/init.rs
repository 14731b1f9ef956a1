use std::{env, io::Write, path::PathBuf};

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitlet_core::Repository;
use gitlet_on_disk::OnDiskRepo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty gitlet repository")
        .arg(
            Arg::with_name("directory")
                .help("The directory to initialize (default: the current directory)"),
        )
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let path: PathBuf = match (init_matches.value_of("directory"), &app.work_dir) {
        (Some(dir), Some(work_dir)) => work_dir.join(dir),
        (Some(dir), None) => PathBuf::from(dir),
        (None, Some(work_dir)) => work_dir.clone(),
        (None, None) => env::current_dir()?,
    };

    let store = OnDiskRepo::init(&path)?;
    Repository::init(store)?;

    writeln!(
        app,
        "Initialized empty Gitlet repository in {}",
        path.display()
    )?;

    Ok(())
}
