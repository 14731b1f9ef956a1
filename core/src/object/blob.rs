use super::Id;

/// Snapshot of one file's content at a given path.
///
/// The ID is derived from both the path and the content, so identical
/// bytes stored under two different file names are two distinct blobs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Blob {
    id: Id,
    path: String,
    content: Vec<u8>,
}

impl Blob {
    /// Create a blob and compute its ID.
    pub fn new<P: Into<String>>(path: P, content: Vec<u8>) -> Blob {
        let path = path.into();
        let id = Id::hash_of(&[path.as_bytes(), content.as_slice()]);
        Blob { id, path, content }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}
