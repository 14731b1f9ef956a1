//! Traversal of the parent-linked commit history.

use std::collections::{BTreeMap, VecDeque};

use crate::object::{Commit, Id};
use crate::repo::{Repo, Result};

/// Read-only view of the commits in a store as a graph.
pub struct CommitGraph<'a, R: Repo + ?Sized> {
    repo: &'a R,
}

impl<'a, R: Repo + ?Sized> CommitGraph<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        CommitGraph { repo }
    }

    /// Iterate over `head` and its first-parent ancestors, newest first.
    pub fn ancestors(&self, head: Id) -> Ancestors<'a, R> {
        Ancestors {
            repo: self.repo,
            next: Some(head),
        }
    }

    /// Returns true if `id` is `head` or one of its first-parent ancestors.
    pub fn contains(&self, head: Id, id: Id) -> Result<bool> {
        for commit in self.ancestors(head) {
            if commit?.id() == id {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Find the closest common ancestor of `a` and `b`.
    ///
    /// Both parent and merged-from links are followed. Each commit reachable
    /// from both heads is scored by the sum of its distances from the two
    /// heads; the lowest score wins, with ties going to the commit closer to
    /// `a`.
    pub fn lowest_common_ancestor(&self, a: Id, b: Id) -> Result<Option<Id>> {
        let from_a = self.distances(a)?;
        let from_b = self.distances(b)?;

        Ok(from_b
            .iter()
            .filter_map(|(id, db)| from_a.get(id).map(|da| (da + db, *da, *id)))
            .min()
            .map(|(_, _, id)| id))
    }

    fn distances(&self, head: Id) -> Result<BTreeMap<Id, usize>> {
        let mut distances = BTreeMap::new();
        let mut queue = VecDeque::new();

        distances.insert(head, 0);
        queue.push_back(head);

        while let Some(id) = queue.pop_front() {
            let distance = distances[&id];
            let commit = self.repo.commit(&id)?;

            for next in commit.parent().into_iter().chain(commit.merged_from()) {
                if !distances.contains_key(&next) {
                    distances.insert(next, distance + 1);
                    queue.push_back(next);
                }
            }
        }

        Ok(distances)
    }
}

/// Iterator returned by [`CommitGraph::ancestors`].
pub struct Ancestors<'a, R: Repo + ?Sized> {
    repo: &'a R,
    next: Option<Id>,
}

impl<'a, R: Repo + ?Sized> Iterator for Ancestors<'a, R> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        let commit = self.repo.commit(&id);
        if let Ok(commit) = &commit {
            self.next = commit.parent();
        }
        Some(commit)
    }
}
