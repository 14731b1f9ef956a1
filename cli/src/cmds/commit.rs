use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

use super::with_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("commit")
        .about("Record the staged changes")
        .arg(
            Arg::with_name("message")
                .required(true)
                .empty_values(true)
                .help("Commit message"),
        )
}

pub(crate) fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let message = matches.value_of("message").unwrap_or_default();
    with_repo(app, |repo| repo.commit(message))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cmds::tests::fails_with;
    use crate::App;

    use gitlet_on_disk::TempRepo;

    #[test]
    fn commits_staged_file() {
        let tr = TempRepo::new();
        tr.write("a", "1");

        App::run_in(tr.path(), vec!["add", "a"]).unwrap();
        App::run_in(tr.path(), vec!["commit", "add a"]).unwrap();

        let repo = tr.open();
        let head = repo.head_commit().unwrap();
        assert_eq!(head.message(), "add a");
        assert!(head.blob_at("a").is_some());
        assert!(repo.branches().active().staging().is_empty());
    }

    #[test]
    fn error_nothing_staged() {
        let tr = TempRepo::new();
        assert_eq!(fails_with(tr.path(), vec!["commit", "nothing"]), 6);
    }

    #[test]
    fn error_blank_message() {
        let tr = TempRepo::new();
        tr.write("a", "1");
        App::run_in(tr.path(), vec!["add", "a"]).unwrap();

        assert_eq!(fails_with(tr.path(), vec!["commit", ""]), 7);

        // The staged file is still there.
        let repo = tr.open();
        assert!(!repo.branches().active().staging().is_empty());
    }
}
