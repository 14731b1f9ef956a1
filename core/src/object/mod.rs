//! Immutable, content-addressed objects: blobs (file snapshots) and
//! commits (snapshots of the whole tracked file set).

mod blob;
pub use blob::Blob;

mod commit;
pub use commit::{Commit, INITIAL_COMMIT_MESSAGE};

mod id;
pub use id::{Id, ParseIdError};
