//! The repository state machine.
//!
//! A [`Repository`] is loaded once per invocation from a [`Repo`] store,
//! executes commands against that single owned state, and writes back only
//! the records that changed when [`Repository::save`] is called. New blobs
//! and commits are written to the store as soon as they are created since
//! they are immutable.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::branch::{Branch, BranchManager, DEFAULT_BRANCH};
use crate::graph::CommitGraph;
use crate::merge::MergeBaseStrategy;
use crate::object::{Commit, Id};
use crate::path;
use crate::repo::{Error, Repo, Result, State};

mod branch;
mod checkout;
mod merge;
mod query;
mod stage;

pub use merge::MergeOutcome;
pub use query::{Modification, Status};

/// A loaded repository: a store plus the mutable state read from it.
pub struct Repository<R: Repo> {
    repo: R,
    branches: BranchManager,
    merge_base: Id,
    dirty: Dirty,
}

#[derive(Default)]
struct Dirty {
    state: bool,
    branches: BTreeSet<String>,
    removed: BTreeSet<String>,
}

impl<R: Repo> Repository<R> {
    /// Initialize an empty store: root commit, `master` branch, root record.
    pub fn init(mut repo: R) -> Result<Repository<R>> {
        if repo.state().is_ok() {
            return Err(Error::AlreadyInitialized);
        }

        let root = Commit::initial();
        repo.put_commit(&root)?;

        let master = Branch::new(DEFAULT_BRANCH, root.id());
        repo.put_branch(&master)?;
        repo.put_state(&State {
            active: DEFAULT_BRANCH.to_string(),
            merge_base: root.id(),
        })?;

        info!(root = %root.id(), "initialized repository");

        Repository::open(repo)
    }

    /// Load the state of an initialized store.
    pub fn open(repo: R) -> Result<Repository<R>> {
        let state = repo.state()?;
        let branches = BranchManager::from_branches(repo.branches()?, &state.active)?;

        debug!(active = %state.active, "opened repository");

        Ok(Repository {
            repo,
            branches,
            merge_base: state.merge_base,
            dirty: Dirty::default(),
        })
    }

    /// Write every branch record and root record changed since the last save.
    pub fn save(&mut self) -> Result<()> {
        for name in &self.dirty.removed {
            self.repo.remove_branch(name)?;
            debug!(branch = %name, "removed branch record");
        }

        for name in &self.dirty.branches {
            if let Some(branch) = self.branches.get(name) {
                self.repo.put_branch(branch)?;
                debug!(branch = %name, head = %branch.head(), "wrote branch record");
            }
        }

        if self.dirty.state {
            self.repo.put_state(&State {
                active: self.branches.active_name().to_string(),
                merge_base: self.merge_base,
            })?;
            debug!("wrote state record");
        }

        self.dirty = Dirty::default();
        Ok(())
    }

    /// Save and hand back the underlying store.
    pub fn into_inner(mut self) -> Result<R> {
        self.save()?;
        Ok(self.repo)
    }

    pub fn store(&self) -> &R {
        &self.repo
    }

    pub fn branches(&self) -> &BranchManager {
        &self.branches
    }

    /// The head of the active branch.
    pub fn head(&self) -> Id {
        self.branches.active().head()
    }

    pub fn head_commit(&self) -> Result<Commit> {
        self.repo.commit(&self.head())
    }

    /// The fork point recorded when the most recent branch was created.
    pub fn recorded_merge_base(&self) -> Id {
        self.merge_base
    }

    /// Pick the base for merging `other` into `current` according to the
    /// store's configured strategy.
    pub fn merge_base(&self, current: &Commit, other: &Commit) -> Result<Commit> {
        let id = match self.repo.merge_base_strategy() {
            MergeBaseStrategy::RecordedSplit => self.merge_base,
            MergeBaseStrategy::CommonAncestor => CommitGraph::new(&self.repo)
                .lowest_common_ancestor(current.id(), other.id())?
                .unwrap_or(self.merge_base),
        };

        self.repo.commit(&id)
    }

    fn touch_active(&mut self) {
        let name = self.branches.active_name().to_string();
        self.dirty.branches.insert(name);
    }

    fn touch_branch(&mut self, name: &str) {
        self.dirty.removed.remove(name);
        self.dirty.branches.insert(name.to_string());
    }

    /// Fail if a working-tree file is tracked by neither the current head
    /// nor `target`; replacing the tree with `target` would lose it.
    fn check_untracked(&self, target: &Commit) -> Result<()> {
        let current = self.head_commit()?;

        for name in self.repo.work_files()? {
            if let Some(blob) = self.repo.work_blob(&name)? {
                if !current.tracks(blob.id()) && !target.tracks(blob.id()) {
                    return Err(Error::UntrackedFileConflict(name));
                }
            }
        }

        Ok(())
    }

    /// Make the working tree match `target`'s snapshot exactly.
    fn write_tree(&mut self, target: &Commit) -> Result<()> {
        for name in self.repo.work_files()? {
            if target.blob_at(&name).is_none() {
                self.repo.remove_work_file(&name)?;
            }
        }

        for id in target.blobs().keys() {
            let blob = self.repo.blob(id)?;
            self.repo.write_work_file(blob.path(), blob.content())?;
        }

        Ok(())
    }
}

fn check_name(name: &str) -> Result<()> {
    path::check_name(name).map_err(|reason| Error::invalid_path(name, reason))
}
