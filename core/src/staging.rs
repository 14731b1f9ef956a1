//! The per-branch set of pending changes applied by the next commit.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::object::{Blob, Commit, Id};
use crate::repo::{Error, Result};

/// Pending additions and removals for one branch.
///
/// Both maps are keyed by blob ID and hold the path the blob belongs to.
/// `removed_paths` is what `status` reports under "Removed Files"; it may
/// also name paths that were already gone from the working tree.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StagingArea {
    #[serde(default)]
    to_add: BTreeMap<Id, String>,

    #[serde(default)]
    to_remove: BTreeMap<Id, String>,

    #[serde(default)]
    removed_paths: BTreeSet<String>,
}

/// Outcome of [`StagingArea::stage`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Staged {
    /// The blob was added to the pending additions.
    Added,

    /// A pending removal of the same blob was cancelled.
    RemovalCancelled,

    /// The blob is already tracked or already staged.
    Unchanged,
}

/// Outcome of [`StagingArea::unstage`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Unstaged {
    /// A pending addition was dropped. The working tree is untouched.
    Unstaged,

    /// The head's blob is now staged for removal. The caller deletes the
    /// working-tree file.
    StagedForRemoval,

    /// The path is missing from the working tree; it is only recorded as
    /// removed and the next commit is unaffected.
    Recorded,
}

impl StagingArea {
    /// Returns true if nothing is staged for addition or removal.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn to_add(&self) -> &BTreeMap<Id, String> {
        &self.to_add
    }

    pub fn to_remove(&self) -> &BTreeMap<Id, String> {
        &self.to_remove
    }

    pub fn removed_paths(&self) -> &BTreeSet<String> {
        &self.removed_paths
    }

    /// Return the blob staged for addition at `path`, if any.
    pub fn staged_at(&self, path: &str) -> Option<Id> {
        self.to_add
            .iter()
            .find(|(_, p)| p.as_str() == path)
            .map(|(id, _)| *id)
    }

    /// Stage `blob` for addition on a branch whose head is `head`.
    pub fn stage(&mut self, blob: &Blob, head: &Commit) -> Staged {
        let path = blob.path();

        if self.to_remove.remove(&blob.id()).is_some() {
            self.removed_paths.remove(path);
            return Staged::RemovalCancelled;
        }

        // Any older version of this path, staged either way, is superseded.
        self.to_add.retain(|id, p| p != path || *id == blob.id());
        let before = self.to_remove.len();
        self.to_remove.retain(|_, p| p != path);
        if self.to_remove.len() != before {
            self.removed_paths.remove(path);
        }

        if head.tracks(blob.id()) || self.to_add.contains_key(&blob.id()) {
            Staged::Unchanged
        } else {
            self.to_add.insert(blob.id(), path.to_string());
            Staged::Added
        }
    }

    /// Unstage or schedule removal of `path`.
    ///
    /// `blob` is the current working-tree content of `path`, or `None` if the
    /// file does not exist.
    pub fn unstage(&mut self, path: &str, blob: Option<&Blob>, head: &Commit) -> Result<Unstaged> {
        match blob {
            Some(blob) => {
                if self.to_add.remove(&blob.id()).is_some() {
                    Ok(Unstaged::Unstaged)
                } else if head.tracks(blob.id()) {
                    self.to_remove.insert(blob.id(), path.to_string());
                    self.removed_paths.insert(path.to_string());
                    Ok(Unstaged::StagedForRemoval)
                } else {
                    Err(Error::NothingToRemove(path.to_string()))
                }
            }

            None => {
                self.removed_paths.insert(path.to_string());
                Ok(Unstaged::Recorded)
            }
        }
    }

    /// Create a commit on top of `parent` from the staged changes and clear
    /// the staging area.
    pub fn commit(
        &mut self,
        parent: &Commit,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Commit> {
        if message.trim().is_empty() {
            return Err(Error::MissingCommitMessage);
        }

        if self.is_empty() {
            return Err(Error::EmptyCommit);
        }

        Ok(self.apply(parent, message, timestamp))
    }

    /// Like `commit`, but an empty staging area still produces a commit.
    pub(crate) fn apply(
        &mut self,
        parent: &Commit,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Commit {
        let mut blobs = parent.blobs().clone();

        for id in self.to_remove.keys() {
            blobs.remove(id);
        }

        for (id, path) in &self.to_add {
            blobs.retain(|old_id, old_path| old_path != path || old_id == id);
            blobs.insert(*id, path.clone());
        }

        self.clear();
        Commit::child(parent, message, timestamp, blobs)
    }

    /// Stage `blob`, the head's version of `path`, for removal.
    pub(crate) fn stage_removal(&mut self, blob: Id, path: &str) {
        self.to_add.retain(|_, p| p != path);
        self.to_remove.insert(blob, path.to_string());
        self.removed_paths.insert(path.to_string());
    }

    pub fn clear(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
        self.removed_paths.clear();
    }
}
