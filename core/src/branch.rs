//! Named branches: a head pointer into the commit store plus a staging area.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::object::Id;
use crate::path;
use crate::repo::{Error, Result};
use crate::staging::StagingArea;

/// Name of the branch created by `init`.
pub const DEFAULT_BRANCH: &str = "master";

/// A named pointer to a head commit, with its own pending changes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Branch {
    name: String,
    head: Id,

    #[serde(default)]
    staging: StagingArea,
}

impl Branch {
    pub fn new<S: Into<String>>(name: S, head: Id) -> Branch {
        Branch {
            name: name.into(),
            head,
            staging: StagingArea::default(),
        }
    }

    /// Create a new branch starting from this one. The new branch gets a copy
    /// of this branch's head and staged changes.
    pub fn fork<S: Into<String>>(&self, name: S) -> Branch {
        Branch {
            name: name.into(),
            head: self.head,
            staging: self.staging.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn head(&self) -> Id {
        self.head
    }

    pub fn set_head(&mut self, head: Id) {
        self.head = head;
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut StagingArea {
        &mut self.staging
    }
}

/// Owns every branch in a repository and knows which one is active.
#[derive(Clone, Debug)]
pub struct BranchManager {
    branches: BTreeMap<String, Branch>,
    active: String,
}

impl BranchManager {
    /// Create a manager holding a single, active branch.
    pub fn new(active: Branch) -> BranchManager {
        let name = active.name().to_string();
        let mut branches = BTreeMap::new();
        branches.insert(name.clone(), active);

        BranchManager {
            branches,
            active: name,
        }
    }

    /// Rebuild a manager from persisted branch records.
    pub fn from_branches<I>(branches: I, active: &str) -> Result<BranchManager>
    where
        I: IntoIterator<Item = Branch>,
    {
        let branches: BTreeMap<String, Branch> = branches
            .into_iter()
            .map(|b| (b.name().to_string(), b))
            .collect();

        if !branches.contains_key(active) {
            return Err(Error::Corrupt {
                record: "state".to_string(),
                reason: format!("active branch `{}` has no branch record", active),
            });
        }

        Ok(BranchManager {
            branches,
            active: active.to_string(),
        })
    }

    pub fn active(&self) -> &Branch {
        &self.branches[&self.active]
    }

    pub fn active_mut(&mut self) -> &mut Branch {
        self.branches
            .get_mut(&self.active)
            .expect("active branch is always present")
    }

    pub fn active_name(&self) -> &str {
        &self.active
    }

    pub fn get(&self, name: &str) -> Option<&Branch> {
        self.branches.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Branch> {
        self.branches.get_mut(name)
    }

    /// Iterate over all branches in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    /// Create branch `name` as a fork of branch `from`.
    ///
    /// Returns the head `name` was forked at.
    pub fn create(&mut self, name: &str, from: &str) -> Result<Id> {
        path::check_name(name).map_err(|reason| Error::invalid_path(name, reason))?;

        if self.branches.contains_key(name) {
            return Err(Error::BranchExists(name.to_string()));
        }

        let source = self
            .branches
            .get(from)
            .ok_or_else(|| Error::NoSuchBranch(from.to_string()))?;

        let branch = source.fork(name);
        let fork_point = branch.head();
        self.branches.insert(name.to_string(), branch);

        Ok(fork_point)
    }

    /// Remove branch `name`. The active branch can not be removed.
    pub fn delete(&mut self, name: &str) -> Result<Branch> {
        if name == self.active {
            return Err(Error::CannotDeleteActive(name.to_string()));
        }

        self.branches
            .remove(name)
            .ok_or_else(|| Error::NoSuchBranch(name.to_string()))
    }

    /// Check that `name` is a branch other than the active one and return it.
    pub fn switch_target(&self, name: &str) -> Result<&Branch> {
        let branch = self
            .branches
            .get(name)
            .ok_or_else(|| Error::NoSuchBranch(name.to_string()))?;

        if name == self.active {
            return Err(Error::AlreadyOnBranch(name.to_string()));
        }

        Ok(branch)
    }

    /// Make `name` the active branch.
    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.branches.contains_key(name) {
            return Err(Error::NoSuchBranch(name.to_string()));
        }

        self.active = name.to_string();
        Ok(())
    }
}
