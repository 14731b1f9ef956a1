use std::collections::BTreeMap;

use super::{Error, Repo, Result, State};
use crate::branch::Branch;
use crate::merge::MergeBaseStrategy;
use crate::object::{Blob, Commit, Id};

/// Implementation of `Repo` that keeps objects, records, and the working
/// tree in memory.
#[derive(Debug, Default)]
pub struct InMemory {
    blobs: BTreeMap<Id, Blob>,
    commits: BTreeMap<Id, Commit>,
    branches: BTreeMap<String, Branch>,
    state: Option<State>,
    work: BTreeMap<String, Vec<u8>>,
    merge_base: MergeBaseStrategy,
}

impl InMemory {
    /// Create an empty, uninitialized store.
    pub fn new() -> InMemory {
        InMemory::default()
    }

    /// Create an empty store that merges using `strategy`.
    pub fn with_merge_base(strategy: MergeBaseStrategy) -> InMemory {
        InMemory {
            merge_base: strategy,
            ..InMemory::default()
        }
    }

    /// Store `commit` under an arbitrary `id`, bypassing the ID check.
    #[cfg(test)]
    pub(crate) fn insert_commit_at(&mut self, id: Id, commit: Commit) {
        self.commits.insert(id, commit);
    }
}

impl Repo for InMemory {
    fn put_blob(&mut self, blob: &Blob) -> Result<()> {
        self.blobs.entry(blob.id()).or_insert_with(|| blob.clone());
        Ok(())
    }

    fn blob(&self, id: &Id) -> Result<Blob> {
        self.blobs.get(id).cloned().ok_or_else(|| Error::Corrupt {
            record: id.to_string(),
            reason: "blob is missing".to_string(),
        })
    }

    fn put_commit(&mut self, commit: &Commit) -> Result<()> {
        match self.commits.get(&commit.id()) {
            Some(existing) if existing != commit => Err(Error::ObjectCollision(commit.id())),
            Some(_) => Ok(()),
            None => {
                self.commits.insert(commit.id(), commit.clone());
                Ok(())
            }
        }
    }

    fn commit(&self, id: &Id) -> Result<Commit> {
        self.commits
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NoSuchCommit(id.to_string()))
    }

    fn commit_ids(&self) -> Result<Vec<Id>> {
        Ok(self.commits.keys().copied().collect())
    }

    fn branches(&self) -> Result<Vec<Branch>> {
        Ok(self.branches.values().cloned().collect())
    }

    fn put_branch(&mut self, branch: &Branch) -> Result<()> {
        self.branches
            .insert(branch.name().to_string(), branch.clone());
        Ok(())
    }

    fn remove_branch(&mut self, name: &str) -> Result<()> {
        self.branches.remove(name);
        Ok(())
    }

    fn state(&self) -> Result<State> {
        self.state.clone().ok_or(Error::NotInitialized)
    }

    fn put_state(&mut self, state: &State) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn work_files(&self) -> Result<Vec<String>> {
        Ok(self.work.keys().cloned().collect())
    }

    fn read_work_file(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.work.get(name).cloned())
    }

    fn write_work_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.work.insert(name.to_string(), content.to_vec());
        Ok(())
    }

    fn remove_work_file(&mut self, name: &str) -> Result<()> {
        self.work.remove(name);
        Ok(())
    }

    fn merge_base_strategy(&self) -> MergeBaseStrategy {
        self.merge_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use std::collections::BTreeMap as Map;

    #[test]
    fn blob_round_trip_never_overwrites() {
        let mut r = InMemory::new();
        let blob = Blob::new("a", b"hello".to_vec());

        r.put_blob(&blob).unwrap();
        r.put_blob(&blob).unwrap();
        assert_eq!(r.blob(&blob.id()).unwrap(), blob);
    }

    #[test]
    fn commit_collision() {
        let mut r = InMemory::new();
        let root = Commit::initial();
        r.put_commit(&root).unwrap();
        r.put_commit(&root).unwrap();

        let now = Utc::now();
        let a = Commit::child(&root, "same", now, Map::new());
        let mut blobs = Map::new();
        let blob = Blob::new("x", b"1".to_vec());
        blobs.insert(blob.id(), "x".to_string());
        let b = Commit::child(&root, "same", now, blobs);
        assert_eq!(a.id(), b.id());

        r.put_commit(&a).unwrap();
        match r.put_commit(&b).unwrap_err() {
            Error::ObjectCollision(id) => assert_eq!(id, a.id()),
            err => panic!("Unexpected error {:?}", err),
        }
    }

    #[test]
    fn resolve_commit_by_prefix() {
        let mut r = InMemory::new();
        let root = Commit::initial();
        r.put_commit(&root).unwrap();

        let id = root.id().to_string();
        assert_eq!(r.resolve_commit(&id).unwrap(), root);
        assert_eq!(r.resolve_commit(&id[..8]).unwrap(), root);

        match r.resolve_commit("zzzzzzzz").unwrap_err() {
            Error::NoSuchCommit(prefix) => assert_eq!(prefix, "zzzzzzzz"),
            err => panic!("Unexpected error {:?}", err),
        }
    }

    #[test]
    fn resolve_missing_full_id() {
        let r = InMemory::new();
        let id = Commit::initial().id().to_string();
        assert!(matches!(r.resolve_commit(&id), Err(Error::NoSuchCommit(_))));
    }

    #[test]
    fn uninitialized_state() {
        let r = InMemory::new();
        assert!(matches!(r.state(), Err(Error::NotInitialized)));
    }
}
