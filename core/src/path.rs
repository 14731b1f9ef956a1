//! Validation of working-tree file names.
//!
//! The working tree is flat: only regular files directly inside the work
//! directory are tracked. Branch names follow the same rules because each
//! branch is stored as a single file named after the branch.

use thiserror::Error;

/// Name of the metadata directory inside the work directory.
pub const METADATA_DIR: &str = ".gitlet";

/// Reasons why a string can not be accepted as a working-tree file name.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PathError {
    #[error("name is empty")]
    EmptyPath,

    #[error("name contains a path separator")]
    ContainsSeparator,

    #[error("name contains a NUL byte")]
    ContainsNull,

    #[error("name refers to a directory")]
    DotOrDotDot,

    #[error("name refers to the repository metadata directory")]
    MetadataDir,
}

/// Check that `name` is acceptable as a top-level working-tree file name.
pub fn check_name(name: &str) -> Result<(), PathError> {
    if name.is_empty() {
        Err(PathError::EmptyPath)
    } else if name.contains(|c| c == '/' || c == '\\') {
        Err(PathError::ContainsSeparator)
    } else if name.contains('\0') {
        Err(PathError::ContainsNull)
    } else if name == "." || name == ".." {
        Err(PathError::DotOrDotDot)
    } else if name.eq_ignore_ascii_case(METADATA_DIR) {
        // Case-insensitive file systems would map `.GITLET` onto the
        // metadata directory.
        Err(PathError::MetadataDir)
    } else {
        Ok(())
    }
}
