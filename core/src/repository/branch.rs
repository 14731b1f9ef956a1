use tracing::info;

use super::Repository;
use crate::repo::{Repo, Result};

impl<R: Repo> Repository<R> {
    /// Create branch `name` from the active branch's head and staged changes.
    ///
    /// The active head becomes the recorded merge base.
    pub fn branch(&mut self, name: &str) -> Result<()> {
        let active = self.branches.active_name().to_string();
        let fork_point = self.branches.create(name, &active)?;

        self.merge_base = fork_point;
        self.touch_branch(name);
        self.dirty.state = true;

        info!(branch = name, from = %active, at = %fork_point, "created branch");
        Ok(())
    }

    /// Delete branch `name`. Its commits stay in the store.
    pub fn remove_branch(&mut self, name: &str) -> Result<()> {
        self.branches.delete(name)?;

        self.dirty.branches.remove(name);
        self.dirty.removed.insert(name.to_string());

        info!(branch = name, "removed branch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_file, repo};
    use super::*;

    use crate::repo::Error;

    #[test]
    fn branch_records_merge_base() {
        let mut r = repo();
        commit_file(&mut r, "a", "1", "first");
        let head = r.head();

        r.branch("dev").unwrap();
        assert_eq!(r.recorded_merge_base(), head);
        assert_eq!(r.branches().get("dev").unwrap().head(), head);
        assert_eq!(r.branches().active_name(), "master");
    }

    #[test]
    fn branch_twice_fails() {
        let mut r = repo();
        r.branch("dev").unwrap();
        assert!(matches!(r.branch("dev"), Err(Error::BranchExists(_))));
    }

    #[test]
    fn remove_branch_keeps_commits() {
        let mut r = repo();
        r.branch("dev").unwrap();
        r.checkout_branch("dev").unwrap();
        commit_file(&mut r, "a", "1", "dev work");
        let dev_head = r.head();
        r.checkout_branch("master").unwrap();

        r.remove_branch("dev").unwrap();
        r.save().unwrap();

        assert!(r.branches().get("dev").is_none());
        assert!(r.store().branches().unwrap().iter().all(|b| b.name() != "dev"));
        assert!(r.store().commit(&dev_head).is_ok());
    }

    #[test]
    fn remove_active_branch_fails() {
        let mut r = repo();
        match r.remove_branch("master").unwrap_err() {
            Error::CannotDeleteActive(name) => assert_eq!(name, "master"),
            err => panic!("Unexpected error {:?}", err),
        }
    }

    #[test]
    fn recreate_removed_branch_before_save() {
        let mut r = repo();
        r.branch("dev").unwrap();
        r.save().unwrap();

        r.remove_branch("dev").unwrap();
        r.branch("dev").unwrap();
        r.save().unwrap();

        assert!(r.store().branches().unwrap().iter().any(|b| b.name() == "dev"));
    }
}
