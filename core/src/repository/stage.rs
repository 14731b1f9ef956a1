use chrono::Utc;
use tracing::{debug, info};

use super::{check_name, Repository};
use crate::object::Commit;
use crate::repo::{Error, Repo, Result};
use crate::staging::{Staged, Unstaged};

impl<R: Repo> Repository<R> {
    /// Stage the current content of `name` for the next commit.
    pub fn add(&mut self, name: &str) -> Result<Staged> {
        check_name(name)?;

        let blob = self
            .repo
            .work_blob(name)?
            .ok_or_else(|| Error::FileNotFound(name.to_string()))?;

        let head = self.head_commit()?;
        let outcome = self.branches.active_mut().staging_mut().stage(&blob, &head);

        if outcome == Staged::Added {
            self.repo.put_blob(&blob)?;
        }
        self.touch_active();

        debug!(file = name, blob = %blob.id(), ?outcome, "add");
        Ok(outcome)
    }

    /// Commit the staged changes on the active branch.
    pub fn commit(&mut self, message: &str) -> Result<Commit> {
        let head = self.head_commit()?;
        let commit = self
            .branches
            .active_mut()
            .staging_mut()
            .commit(&head, message, Utc::now())?;

        self.advance(commit)
    }

    /// Unstage `name`, or stage it for removal and delete it from the working tree.
    pub fn remove(&mut self, name: &str) -> Result<Unstaged> {
        check_name(name)?;

        let blob = self.repo.work_blob(name)?;
        let head = self.head_commit()?;
        let outcome = self
            .branches
            .active_mut()
            .staging_mut()
            .unstage(name, blob.as_ref(), &head)?;

        if outcome == Unstaged::StagedForRemoval {
            self.repo.remove_work_file(name)?;
        }
        self.touch_active();

        debug!(file = name, ?outcome, "rm");
        Ok(outcome)
    }

    /// Store `commit` and make it the head of the active branch.
    pub(super) fn advance(&mut self, commit: Commit) -> Result<Commit> {
        self.repo.put_commit(&commit)?;
        self.branches.active_mut().set_head(commit.id());
        self.touch_active();

        info!(
            branch = self.branches.active_name(),
            commit = %commit.id(),
            message = commit.message(),
            "created commit"
        );
        Ok(commit)
    }
}
