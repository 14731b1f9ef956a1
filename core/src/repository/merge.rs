use chrono::Utc;
use tracing::{debug, info, warn};

use super::Repository;
use crate::merge::{self, MergeAction};
use crate::object::Commit;
use crate::repo::{Error, Repo, Result};

/// Result of a completed merge.
#[derive(Clone, Debug)]
pub struct MergeOutcome {
    /// The merge commit created on the active branch.
    pub commit: Commit,

    /// Paths left with conflict markers in the working tree, sorted.
    pub conflicts: Vec<String>,
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

impl<R: Repo> Repository<R> {
    /// Merge branch `name` into the active branch.
    ///
    /// Every precondition is checked before the working tree or staging
    /// area is touched. The merge commit is created even when conflicts
    /// were written or nothing changed.
    pub fn merge(&mut self, name: &str) -> Result<MergeOutcome> {
        if !self.branches.active().staging().is_empty() {
            return Err(Error::UncommittedChanges);
        }

        let other = self
            .branches
            .get(name)
            .ok_or_else(|| Error::NoSuchBranch(name.to_string()))?
            .head();

        let active = self.branches.active_name().to_string();
        if name == active {
            return Err(Error::SelfMerge);
        }

        let current = self.head_commit()?;
        let other = self.repo.commit(&other)?;
        let base = self.merge_base(&current, &other)?;
        let actions = merge::classify(&base, &current, &other);

        debug!(
            base = %base.id(),
            current = %current.id(),
            other = %other.id(),
            actions = actions.len(),
            "classified merge"
        );

        for action in &actions {
            if let Some(blob) = self.repo.work_blob(action.path())? {
                if !current.tracks(blob.id()) {
                    return Err(Error::UntrackedFileConflict(action.path().to_string()));
                }
            }
        }

        let mut conflicts = vec![];
        for action in actions {
            match action {
                MergeAction::TakeOther { path, blob } => {
                    let blob = self.repo.blob(&blob)?;
                    self.repo.write_work_file(&path, blob.content())?;
                    self.branches
                        .active_mut()
                        .staging_mut()
                        .stage(&blob, &current);
                }

                MergeAction::Remove { path, blob } => {
                    self.repo.remove_work_file(&path)?;
                    self.branches
                        .active_mut()
                        .staging_mut()
                        .stage_removal(blob, &path);
                }

                MergeAction::Conflict {
                    path,
                    current: ours,
                    other: theirs,
                } => {
                    let ours = self.repo.blob(&ours)?.into_content();
                    let theirs = self.repo.blob(&theirs)?.into_content();
                    self.repo
                        .write_work_file(&path, &merge::conflict_content(&ours, &theirs))?;
                    conflicts.push(path);
                }
            }
        }

        let message = format!("Merged {} into {}", name, active);
        let commit = self
            .branches
            .active_mut()
            .staging_mut()
            .apply(&current, &message, Utc::now())
            .with_merged_from(other.id());
        let commit = self.advance(commit)?;

        if conflicts.is_empty() {
            info!(branch = name, into = %active, "merged");
        } else {
            warn!(branch = name, into = %active, ?conflicts, "merged with conflicts");
        }

        Ok(MergeOutcome { commit, conflicts })
    }
}
