use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::Repository;
use crate::graph::CommitGraph;
use crate::object::{Commit, Id};
use crate::repo::{Error, Repo, Result};

/// How a working-tree file differs from what the next commit would record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Modification {
    Modified,
    Deleted,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::Modified => write!(f, "modified"),
            Modification::Deleted => write!(f, "deleted"),
        }
    }
}

/// Snapshot of the repository reported by `status`. Every list is sorted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Status {
    pub branches: Vec<String>,
    pub active: String,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<(String, Modification)>,
    pub untracked: Vec<String>,
}

impl<R: Repo> Repository<R> {
    /// The active head and its first-parent ancestors, newest first.
    pub fn log(&self) -> Result<Vec<Commit>> {
        CommitGraph::new(&self.repo).ancestors(self.head()).collect()
    }

    /// Every stored commit, newest first.
    pub fn global_log(&self) -> Result<Vec<Commit>> {
        let mut commits = self
            .repo
            .commit_ids()?
            .iter()
            .map(|id| self.repo.commit(id))
            .collect::<Result<Vec<_>>>()?;

        commits.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(commits)
    }

    /// IDs of every commit whose message is exactly `message`.
    pub fn find(&self, message: &str) -> Result<Vec<Id>> {
        let ids: Vec<Id> = self
            .global_log()?
            .into_iter()
            .filter(|c| c.message() == message)
            .map(|c| c.id())
            .collect();

        if ids.is_empty() {
            Err(Error::NoCommitWithMessage(message.to_string()))
        } else {
            Ok(ids)
        }
    }

    pub fn status(&self) -> Result<Status> {
        let head = self.head_commit()?;
        let staging = self.branches.active().staging();

        let staged: BTreeMap<&str, Id> = staging
            .to_add()
            .iter()
            .map(|(id, path)| (path.as_str(), *id))
            .collect();
        let removed = staging.removed_paths();
        let tracked = head.paths();

        let mut work = BTreeMap::new();
        for name in self.repo.work_files()? {
            if let Some(blob) = self.repo.work_blob(&name)? {
                work.insert(name, blob.id());
            }
        }

        let mut modified = vec![];
        let paths: BTreeSet<&str> = staged
            .keys()
            .chain(tracked.keys())
            .copied()
            .collect();

        for path in paths {
            // What the next commit would record for this path.
            let expected = staged.get(path).or_else(|| {
                if removed.contains(path) {
                    None
                } else {
                    tracked.get(path)
                }
            });

            if let Some(expected) = expected {
                match work.get(path) {
                    None => modified.push((path.to_string(), Modification::Deleted)),
                    Some(actual) if actual != expected => {
                        modified.push((path.to_string(), Modification::Modified))
                    }
                    Some(_) => (),
                }
            }
        }

        let untracked = work
            .keys()
            .filter(|name| {
                let name = name.as_str();
                !staged.contains_key(name) && (!tracked.contains_key(name) || removed.contains(name))
            })
            .cloned()
            .collect();

        Ok(Status {
            branches: self.branches.iter().map(|b| b.name().to_string()).collect(),
            active: self.branches.active_name().to_string(),
            staged: staged.keys().map(|p| p.to_string()).collect(),
            removed: removed.iter().cloned().collect(),
            modified,
            untracked,
        })
    }
}
