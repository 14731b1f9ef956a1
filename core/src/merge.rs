//! Three-way classification of changes between a merge base and two heads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::object::{Commit, Id};

/// How `merge` picks the base commit for the three-way comparison.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeBaseStrategy {
    /// Use the head recorded the last time a branch was created.
    ///
    /// This is only correct when there has been a single fork since the
    /// branches last diverged.
    RecordedSplit,

    /// Search the commit graph for the closest common ancestor of both heads.
    CommonAncestor,
}

impl Default for MergeBaseStrategy {
    fn default() -> Self {
        MergeBaseStrategy::RecordedSplit
    }
}

/// What to do with a single path when merging.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MergeAction {
    /// Write the other branch's blob to the working tree and stage it.
    TakeOther { path: String, blob: Id },

    /// Delete the file and stage the current blob for removal.
    Remove { path: String, blob: Id },

    /// Both sides changed or added the path with different content.
    Conflict { path: String, current: Id, other: Id },
}

impl MergeAction {
    pub fn path(&self) -> &str {
        match self {
            MergeAction::TakeOther { path, .. }
            | MergeAction::Remove { path, .. }
            | MergeAction::Conflict { path, .. } => path,
        }
    }
}

/// Compare `current` and `other` against `base`, path by path.
///
/// Paths that need no change are left out. Actions are ordered by path.
pub fn classify(base: &Commit, current: &Commit, other: &Commit) -> Vec<MergeAction> {
    let base_paths = base.paths();
    let current_paths = current.paths();
    let other_paths = other.paths();

    let all_paths: BTreeSet<&str> = base_paths
        .keys()
        .chain(current_paths.keys())
        .chain(other_paths.keys())
        .copied()
        .collect();

    all_paths
        .into_iter()
        .filter_map(|path| {
            let s = base_paths.get(path).copied();
            let c = current_paths.get(path).copied();
            let g = other_paths.get(path).copied();
            classify_path(path, s, c, g)
        })
        .collect()
}

fn classify_path(path: &str, s: Option<Id>, c: Option<Id>, g: Option<Id>) -> Option<MergeAction> {
    let path = path.to_string();

    match (s, c, g) {
        // Same result on both sides, including both deleted.
        (_, c, g) if c == g => None,

        // Only the other side changed (or added) the file.
        (s, Some(c), Some(g)) if s == Some(c) => Some(MergeAction::TakeOther { path, blob: g }),
        (None, None, Some(g)) => Some(MergeAction::TakeOther { path, blob: g }),

        // Only the current side changed (or added) the file.
        (s, Some(_), Some(g)) if s == Some(g) => None,
        (None, Some(_), None) => None,

        // Deleted on the other side and untouched here.
        (Some(s), Some(c), None) if s == c => Some(MergeAction::Remove { path, blob: c }),

        // Deleted on one side, kept or edited on the other: the current
        // side wins.
        (Some(_), Some(_), None) | (Some(_), None, Some(_)) => None,

        (_, Some(current), Some(other)) => Some(MergeAction::Conflict {
            path,
            current,
            other,
        }),

        (_, _, _) => None,
    }
}

/// Build the content written to a conflicted file.
pub fn conflict_content(current: &[u8], other: &[u8]) -> Vec<u8> {
    let mut content = Vec::with_capacity(current.len() + other.len() + 32);
    content.extend_from_slice(b"<<<<<<< HEAD\n");
    content.extend_from_slice(current);
    content.extend_from_slice(b"\n=======\n");
    content.extend_from_slice(other);
    content.extend_from_slice(b"\n>>>>>>>");
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::object::Blob;
    use crate::staging::StagingArea;

    fn commit(files: &[(&str, &str)]) -> Commit {
        let root = Commit::initial();
        let mut staging = StagingArea::default();
        for (path, content) in files {
            staging.stage(&Blob::new(*path, content.as_bytes().to_vec()), &root);
        }
        staging.apply(&root, "files", Utc::now())
    }

    fn id(path: &str, content: &str) -> Id {
        Blob::new(path, content.as_bytes().to_vec()).id()
    }

    #[test]
    fn changed_only_in_other() {
        let s = commit(&[("a", "1")]);
        let c = commit(&[("a", "1")]);
        let g = commit(&[("a", "2")]);

        assert_eq!(
            classify(&s, &c, &g),
            vec![MergeAction::TakeOther {
                path: "a".to_string(),
                blob: id("a", "2"),
            }]
        );
    }

    #[test]
    fn changed_only_in_current_or_same_in_both() {
        let s = commit(&[("a", "1"), ("b", "1")]);
        let c = commit(&[("a", "2"), ("b", "3")]);
        let g = commit(&[("a", "1"), ("b", "3")]);

        assert!(classify(&s, &c, &g).is_empty());
    }

    #[test]
    fn changed_differently() {
        let s = commit(&[("a", "1")]);
        let c = commit(&[("a", "2")]);
        let g = commit(&[("a", "3")]);

        assert_eq!(
            classify(&s, &c, &g),
            vec![MergeAction::Conflict {
                path: "a".to_string(),
                current: id("a", "2"),
                other: id("a", "3"),
            }]
        );
    }

    #[test]
    fn deletions() {
        let s = commit(&[("gone_there", "1"), ("gone_here", "1"), ("edit_vs_delete", "1")]);
        let c = commit(&[("gone_there", "1"), ("edit_vs_delete", "2")]);
        let g = commit(&[("gone_here", "1")]);

        assert_eq!(
            classify(&s, &c, &g),
            vec![MergeAction::Remove {
                path: "gone_there".to_string(),
                blob: id("gone_there", "1"),
            }]
        );
    }

    #[test]
    fn delete_vs_edit_keeps_current() {
        let s = commit(&[("a", "1")]);
        let c = commit(&[]);
        let g = commit(&[("a", "2")]);
        assert!(classify(&s, &c, &g).is_empty());

        let c = commit(&[("a", "2")]);
        let g = commit(&[]);
        assert!(classify(&s, &c, &g).is_empty());
    }

    #[test]
    fn added_since_split() {
        let s = commit(&[]);
        let c = commit(&[("mine", "1"), ("both_same", "x"), ("both_diff", "1")]);
        let g = commit(&[("theirs", "1"), ("both_same", "x"), ("both_diff", "2")]);

        let actions = classify(&s, &c, &g);
        assert_eq!(
            actions,
            vec![
                MergeAction::Conflict {
                    path: "both_diff".to_string(),
                    current: id("both_diff", "1"),
                    other: id("both_diff", "2"),
                },
                MergeAction::TakeOther {
                    path: "theirs".to_string(),
                    blob: id("theirs", "1"),
                },
            ]
        );
        assert_eq!(actions[1].path(), "theirs");
    }

    #[test]
    fn conflict_markers() {
        assert_eq!(
            conflict_content(b"2", b"3"),
            b"<<<<<<< HEAD\n2\n=======\n3\n>>>>>>>".to_vec()
        );
        assert_eq!(
            conflict_content(b"", b"3"),
            b"<<<<<<< HEAD\n\n=======\n3\n>>>>>>>".to_vec()
        );
    }

    #[test]
    fn strategy_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            base: MergeBaseStrategy,
        }

        let w: Wrapper = serde_json::from_str(r#"{"base":"common-ancestor"}"#).unwrap();
        assert_eq!(w.base, MergeBaseStrategy::CommonAncestor);
        assert_eq!(MergeBaseStrategy::default(), MergeBaseStrategy::RecordedSplit);
    }
}
