use std::collections::BTreeMap;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Message carried by the root commit of every repository.
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// An immutable snapshot of every tracked file at a point in time.
///
/// The snapshot maps blob IDs to the path each blob was stored under. Blob
/// content lives in the object store and is fetched on demand.
///
/// A commit's ID is computed from its timestamp and message only. Two commits
/// with the same message created at the same instant would share an ID; the
/// store rejects the second one as a collision.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Commit {
    id: Id,
    message: String,
    timestamp: DateTime<Utc>,
    parent: Option<Id>,

    // Head of the branch that was merged in, if any. Display only: history
    // walks follow `parent` alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    merged_from: Option<Id>,

    blobs: BTreeMap<Id, String>,
}

impl Commit {
    /// Create the root commit: fixed message, epoch timestamp, empty snapshot.
    pub fn initial() -> Commit {
        Commit::build(
            INITIAL_COMMIT_MESSAGE.to_string(),
            DateTime::<Utc>::from(UNIX_EPOCH),
            None,
            BTreeMap::new(),
        )
    }

    pub(crate) fn child(
        parent: &Commit,
        message: &str,
        timestamp: DateTime<Utc>,
        blobs: BTreeMap<Id, String>,
    ) -> Commit {
        Commit::build(message.to_string(), timestamp, Some(parent.id), blobs)
    }

    pub(crate) fn with_merged_from(mut self, other: Id) -> Commit {
        self.merged_from = Some(other);
        self
    }

    fn build(
        message: String,
        timestamp: DateTime<Utc>,
        parent: Option<Id>,
        blobs: BTreeMap<Id, String>,
    ) -> Commit {
        let stamp = timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);
        let id = Id::hash_of(&[stamp.as_bytes(), message.as_bytes()]);

        Commit {
            id,
            message,
            timestamp,
            parent,
            merged_from: None,
            blobs,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Return the parent commit's ID, or `None` for the root commit.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Return the other branch head recorded by a merge commit.
    pub fn merged_from(&self) -> Option<Id> {
        self.merged_from
    }

    /// Return the snapshot as a map of blob ID to path.
    pub fn blobs(&self) -> &BTreeMap<Id, String> {
        &self.blobs
    }

    /// Returns true if this exact blob (same path and content) is in the snapshot.
    pub fn tracks(&self, blob: Id) -> bool {
        self.blobs.contains_key(&blob)
    }

    /// Return the ID of the blob stored at `path`, if any.
    pub fn blob_at(&self, path: &str) -> Option<Id> {
        self.blobs
            .iter()
            .find(|(_, p)| p.as_str() == path)
            .map(|(id, _)| *id)
    }

    /// Return the snapshot keyed by path instead of blob ID.
    pub fn paths(&self) -> BTreeMap<&str, Id> {
        self.blobs
            .iter()
            .map(|(id, path)| (path.as_str(), *id))
            .collect()
    }
}
