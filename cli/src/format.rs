use std::fmt::Display;

use chrono::TimeZone;
use gitlet_core::{object::Commit, repository::Status};

/// Number of hex digits shown for each parent of a merge commit.
const SHORT_ID: usize = 7;

/// Render one `log` / `global-log` entry, with a trailing blank line.
pub(crate) fn log_entry<Tz>(commit: &Commit, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut s = format!("===\ncommit {}\n", commit.id());

    if let (Some(parent), Some(merged_from)) = (commit.parent(), commit.merged_from()) {
        s.push_str(&format!(
            "Merge: {} {}\n",
            parent.short(SHORT_ID),
            merged_from.short(SHORT_ID)
        ));
    }

    let date = commit.timestamp().with_timezone(tz);
    s.push_str(&format!(
        "Date: {}\n{}\n\n",
        date.format("%a %b %-d %H:%M:%S %Y %z"),
        commit.message()
    ));

    s
}

/// Render the sections printed by `status`.
pub(crate) fn status(status: &Status) -> String {
    let branches: Vec<String> = status
        .branches
        .iter()
        .map(|branch| {
            if *branch == status.active {
                format!("*{}", branch)
            } else {
                branch.clone()
            }
        })
        .collect();

    let modified: Vec<String> = status
        .modified
        .iter()
        .map(|(path, how)| format!("{} ({})", path, how))
        .collect();

    [
        section("Branches", &branches),
        section("Staged Files", &status.staged),
        section("Removed Files", &status.removed),
        section("Modifications Not Staged For Commit", &modified),
        section("Untracked Files", &status.untracked),
    ]
    .join("\n")
}

fn section(title: &str, lines: &[String]) -> String {
    let mut s = format!("=== {} ===\n", title);
    for line in lines {
        s.push_str(line);
        s.push('\n');
    }
    s
}
