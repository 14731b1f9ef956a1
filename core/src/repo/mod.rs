//! Represents an abstract gitlet repository store.
//!
//! ## Design Goals
//!
//! Gitlet intends to allow repositories to be stored in multiple different mechanisms.
//! `gitlet_on_disk` provides local on-disk repositories; [`InMemory`] keeps
//! everything in memory and is mostly useful for tests. The repository state
//! machine itself lives in [`crate::Repository`] and only talks to a store
//! through the [`Repo`] trait.

use serde::{Deserialize, Serialize};

mod error;
pub use error::{Error, Result};

mod in_memory;
pub use in_memory::InMemory;

use crate::branch::Branch;
use crate::merge::MergeBaseStrategy;
use crate::object::{Blob, Commit, Id};

/// The small mutable root record of a repository.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct State {
    /// Name of the active branch.
    pub active: String,

    /// Head of the source branch the last time a branch was created.
    pub merge_base: Id,
}

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing a gitlet repo and its working tree.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture: immutable objects
/// (blobs and commits) are written once, while branch records and the root
/// [`State`] record are small and rewritten as they change.
///
/// The provided methods build the content-store lookups on top of those
/// primitives.
pub trait Repo {
    /// Store a blob. Storing a blob whose ID already exists is a no-op.
    fn put_blob(&mut self, blob: &Blob) -> Result<()>;

    /// Load a blob by ID.
    fn blob(&self, id: &Id) -> Result<Blob>;

    /// Store a commit.
    ///
    /// Fails with `ObjectCollision` if a different commit with the same ID
    /// is already stored.
    fn put_commit(&mut self, commit: &Commit) -> Result<()>;

    /// Load a commit by ID. Fails with `NoSuchCommit` if it doesn't exist.
    fn commit(&self, id: &Id) -> Result<Commit>;

    /// List the IDs of every stored commit.
    fn commit_ids(&self) -> Result<Vec<Id>>;

    /// Load every branch record.
    fn branches(&self) -> Result<Vec<Branch>>;

    /// Create or replace a branch record.
    fn put_branch(&mut self, branch: &Branch) -> Result<()>;

    /// Delete a branch record.
    fn remove_branch(&mut self, name: &str) -> Result<()>;

    /// Load the root record. Fails with `NotInitialized` if there is none.
    fn state(&self) -> Result<State>;

    /// Create or replace the root record.
    fn put_state(&mut self, state: &State) -> Result<()>;

    /// List the names of the files in the working tree, sorted.
    fn work_files(&self) -> Result<Vec<String>>;

    /// Read a working-tree file, or `None` if it doesn't exist.
    fn read_work_file(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Create or overwrite a working-tree file.
    fn write_work_file(&mut self, name: &str, content: &[u8]) -> Result<()>;

    /// Delete a working-tree file. Deleting a missing file is a no-op.
    fn remove_work_file(&mut self, name: &str) -> Result<()>;

    /// Which commit `merge` uses as the common base.
    fn merge_base_strategy(&self) -> MergeBaseStrategy {
        MergeBaseStrategy::default()
    }

    /// Snapshot the current content of a working-tree file as a blob.
    fn work_blob(&self, name: &str) -> Result<Option<Blob>> {
        Ok(self
            .read_work_file(name)?
            .map(|content| Blob::new(name, content)))
    }

    /// Find a commit by full ID or by a unique prefix of its ID.
    fn resolve_commit(&self, id_or_prefix: &str) -> Result<Commit> {
        if let Ok(id) = id_or_prefix.parse::<Id>() {
            return self.commit(&id);
        }

        let mut matches = self
            .commit_ids()?
            .into_iter()
            .filter(|id| id.has_prefix(id_or_prefix));

        match (matches.next(), matches.next()) {
            (Some(id), None) => self.commit(&id),
            (Some(_), Some(_)) => Err(Error::AmbiguousCommit(id_or_prefix.to_string())),
            (None, _) => Err(Error::NoSuchCommit(id_or_prefix.to_string())),
        }
    }
}
