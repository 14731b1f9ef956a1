use tracing::info;

use super::{check_name, Repository};
use crate::graph::CommitGraph;
use crate::object::{Commit, Id};
use crate::repo::{Error, Repo, Result};

impl<R: Repo> Repository<R> {
    /// Restore `name` in the working tree from the head of the active branch.
    pub fn checkout_file(&mut self, name: &str) -> Result<()> {
        let head = self.head_commit()?;
        self.restore_file(&head, name)
    }

    /// Restore `name` in the working tree from the commit identified by
    /// `commit_ref`, a full ID or a unique prefix of one.
    pub fn checkout_file_from(&mut self, commit_ref: &str, name: &str) -> Result<()> {
        let commit = self.repo.resolve_commit(commit_ref)?;
        self.restore_file(&commit, name)
    }

    /// Make `name` the active branch and replace the working tree with its head.
    pub fn checkout_branch(&mut self, name: &str) -> Result<()> {
        let target = self.branches.switch_target(name)?.head();
        let target = self.repo.commit(&target)?;

        self.check_untracked(&target)?;
        self.write_tree(&target)?;
        self.branches.set_active(name)?;
        self.dirty.state = true;

        info!(branch = name, head = %target.id(), "switched branch");
        Ok(())
    }

    /// Move the active branch to `commit_ref` and rewrite the working tree.
    ///
    /// Every other branch whose first-parent history contains the target is
    /// moved along with it. The active branch's staging area is cleared.
    pub fn reset(&mut self, commit_ref: &str) -> Result<Commit> {
        let target = self.repo.resolve_commit(commit_ref)?;

        self.check_untracked(&target)?;
        self.write_tree(&target)?;

        let active = self.branches.active_name().to_string();
        let mut moved: Vec<String> = vec![];
        {
            let graph = CommitGraph::new(&self.repo);
            for branch in self.branches.iter() {
                if branch.name() != active && graph.contains(branch.head(), target.id())? {
                    moved.push(branch.name().to_string());
                }
            }
        }

        for name in &moved {
            self.move_branch(name, target.id());
        }
        self.move_branch(&active, target.id());
        self.branches.active_mut().staging_mut().clear();

        info!(commit = %target.id(), branches = ?moved, "reset");
        Ok(target)
    }

    fn move_branch(&mut self, name: &str, to: Id) {
        if let Some(branch) = self.branches.get_mut(name) {
            branch.set_head(to);
            self.touch_branch(name);
        }
    }

    fn restore_file(&mut self, commit: &Commit, name: &str) -> Result<()> {
        check_name(name)?;

        let id = commit.blob_at(name).ok_or_else(|| Error::FileNotInCommit(name.to_string()))?;
        let blob = self.repo.blob(&id)?;
        self.repo.write_work_file(name, blob.content())
    }
}
