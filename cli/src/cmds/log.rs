use std::io::Write;

use crate::{format, App, Result};

use chrono::Local;
use clap::{ArgMatches, SubCommand};
use gitlet_core::object::Commit;

use super::open_repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("log").about("Show the history of the current branch")
}

pub(crate) fn global_subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("global-log").about("Show every commit ever made")
}

pub(crate) fn run(app: &mut App, _matches: &ArgMatches) -> Result<()> {
    let commits = open_repo(app)?.log()?;
    print_commits(app, &commits)
}

pub(crate) fn run_global(app: &mut App, _matches: &ArgMatches) -> Result<()> {
    let commits = open_repo(app)?.global_log()?;
    print_commits(app, &commits)
}

fn print_commits(app: &mut App, commits: &[Commit]) -> Result<()> {
    for commit in commits {
        write!(app, "{}", format::log_entry(commit, &Local))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::App;

    use gitlet_on_disk::TempRepo;

    fn commit(tr: &TempRepo, name: &str, content: &str, message: &str) {
        tr.write(name, content);
        App::run_in(tr.path(), vec!["add", name]).unwrap();
        App::run_in(tr.path(), vec!["commit", message]).unwrap();
    }

    fn messages(stdout: &str) -> Vec<&str> {
        stdout
            .split("===\n")
            .filter(|entry| !entry.is_empty())
            .map(|entry| entry.lines().nth(2).unwrap())
            .collect()
    }

    #[test]
    fn log_shows_current_branch() {
        let tr = TempRepo::new();
        commit(&tr, "a", "1", "first");
        App::run_in(tr.path(), vec!["branch", "dev"]).unwrap();
        commit(&tr, "a", "2", "second");

        App::run_in(tr.path(), vec!["checkout", "dev"]).unwrap();
        commit(&tr, "b", "1", "on dev");

        let stdout = App::run_in_str(tr.path(), vec!["log"]).unwrap();
        assert_eq!(messages(&stdout), vec!["on dev", "first", "initial commit"]);
        assert!(stdout.starts_with("===\ncommit "));
        assert!(stdout.contains("\nDate: "));
        assert!(stdout.ends_with("initial commit\n\n"));

        let stdout = App::run_in_str(tr.path(), vec!["global-log"]).unwrap();
        assert_eq!(
            messages(&stdout),
            vec!["on dev", "second", "first", "initial commit"]
        );
    }

    #[test]
    fn merge_entry_names_both_parents() {
        let tr = TempRepo::new();
        commit(&tr, "a", "1", "first");
        App::run_in(tr.path(), vec!["branch", "dev"]).unwrap();
        App::run_in(tr.path(), vec!["checkout", "dev"]).unwrap();
        commit(&tr, "b", "1", "on dev");
        App::run_in(tr.path(), vec!["checkout", "master"]).unwrap();
        App::run_in(tr.path(), vec!["merge", "dev"]).unwrap();

        let repo = tr.open();
        let head = repo.head_commit().unwrap();
        let parent = head.parent().unwrap().short(7);
        let other = head.merged_from().unwrap().short(7);

        let stdout = App::run_in_str(tr.path(), vec!["log"]).unwrap();
        let first_entry = stdout.split("\n\n").next().unwrap();
        assert!(first_entry.contains(&format!("\nMerge: {} {}\n", parent, other)));
        assert!(first_entry.ends_with("Merged dev into master"));
    }
}
