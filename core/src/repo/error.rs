use std::path::PathBuf;

use thiserror::Error;

use crate::object::Id;
use crate::path::PathError;

/// Describes the potential error conditions that might arise from gitlet `Repo` operations.
///
/// Most variants are user-facing conditions that are detected before any
/// state is modified. `ObjectCollision`, `Corrupt`, `IoError`, and
/// `OtherError` indicate a broken or unreachable repository.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Working directory {0} does not exist.")]
    WorkDirDoesntExist(PathBuf),

    #[error("File does not exist.")]
    FileNotFound(String),

    #[error("No reason to remove the file.")]
    NothingToRemove(String),

    #[error("No changes added to the commit.")]
    EmptyCommit,

    #[error("Please enter a commit message.")]
    MissingCommitMessage,

    #[error("A branch with that name already exists.")]
    BranchExists(String),

    #[error("A branch with that name does not exist.")]
    NoSuchBranch(String),

    #[error("Cannot remove the current branch.")]
    CannotDeleteActive(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict(String),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("No commit with that id exists.")]
    NoSuchCommit(String),

    #[error("More than one commit starts with `{0}`.")]
    AmbiguousCommit(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),

    #[error("Found no commit with that message.")]
    NoCommitWithMessage(String),

    #[error("Invalid name `{name}`: {reason}.")]
    InvalidPath { name: String, reason: PathError },

    #[error("object {0} already exists with different content")]
    ObjectCollision(Id),

    #[error("corrupt record {record}: {reason}")]
    Corrupt { record: String, reason: String },

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    OtherError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Each user-facing condition has its own status so that scripts can
    /// tell them apart. Status 1 is left to usage errors reported by the
    /// argument parser; every internal failure maps to 101.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NotInitialized => 2,
            Error::AlreadyInitialized => 3,
            Error::FileNotFound(_) => 4,
            Error::NothingToRemove(_) => 5,
            Error::EmptyCommit => 6,
            Error::MissingCommitMessage => 7,
            Error::BranchExists(_) => 8,
            Error::NoSuchBranch(_) => 9,
            Error::CannotDeleteActive(_) => 10,
            Error::AlreadyOnBranch(_) => 11,
            Error::UntrackedFileConflict(_) => 12,
            Error::UncommittedChanges => 13,
            Error::SelfMerge => 14,
            Error::NoSuchCommit(_) => 15,
            Error::AmbiguousCommit(_) => 16,
            Error::FileNotInCommit(_) => 17,
            Error::NoCommitWithMessage(_) => 18,
            Error::InvalidPath { .. } => 19,
            Error::WorkDirDoesntExist(_) => 20,
            Error::ObjectCollision(_)
            | Error::Corrupt { .. }
            | Error::IoError(_)
            | Error::OtherError(_) => 101,
        }
    }

    pub(crate) fn invalid_path(name: &str, reason: PathError) -> Error {
        Error::InvalidPath {
            name: name.to_string(),
            reason,
        }
    }
}

/// A specialized `Result` type for gitlet `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
