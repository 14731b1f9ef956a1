use gitlet_core::Repository;
use gitlet_on_disk::OnDiskRepo;

use crate::{find_repo, App, Result};

mod add;
mod branch;
mod checkout;
mod commit;
mod find;
mod init;
mod log;
mod merge;
mod reset;
mod rm;
mod status;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(init::subcommand())
        .subcommand(add::subcommand())
        .subcommand(commit::subcommand())
        .subcommand(rm::subcommand())
        .subcommand(log::subcommand())
        .subcommand(log::global_subcommand())
        .subcommand(find::subcommand())
        .subcommand(status::subcommand())
        .subcommand(checkout::subcommand())
        .subcommand(branch::subcommand())
        .subcommand(branch::rm_subcommand())
        .subcommand(reset::subcommand())
        .subcommand(merge::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("init", Some(m)) => init::run(app, &m),
        ("add", Some(m)) => add::run(app, &m),
        ("commit", Some(m)) => commit::run(app, &m),
        ("rm", Some(m)) => rm::run(app, &m),
        ("log", Some(m)) => log::run(app, &m),
        ("global-log", Some(m)) => log::run_global(app, &m),
        ("find", Some(m)) => find::run(app, &m),
        ("status", Some(m)) => status::run(app, &m),
        ("checkout", Some(m)) => checkout::run(app, &m),
        ("branch", Some(m)) => branch::run(app, &m),
        ("rm-branch", Some(m)) => branch::run_rm(app, &m),
        ("reset", Some(m)) => reset::run(app, &m),
        ("merge", Some(m)) => merge::run(app, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}

/// Load the repository the command operates on.
fn open_repo(app: &App) -> Result<Repository<OnDiskRepo>> {
    let store = match &app.work_dir {
        Some(dir) => find_repo::from_path(dir)?,
        None => find_repo::from_current_dir()?,
    };

    Ok(Repository::open(store)?)
}

/// Load the repository, apply `f`, and save whatever it changed.
///
/// Nothing is saved when `f` fails.
fn with_repo<F, T>(app: &App, f: F) -> Result<T>
where
    F: FnOnce(&mut Repository<OnDiskRepo>) -> gitlet_core::repo::Result<T>,
{
    let mut repo = open_repo(app)?;
    let result = f(&mut repo)?;
    repo.save()?;
    Ok(result)
}
