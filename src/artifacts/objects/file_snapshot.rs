//! File snapshot
//!
//! A snapshot pairs a path with the hash of its content. While a file sits in
//! the staging area the snapshot also carries the content itself; once the
//! file is committed the content lives in the blob store and the snapshot
//! kept by the commit is trimmed down to path and hash.
//!
//! ## Hash
//!
//! `sha1(<content><path>)`, so the same bytes under two different paths hash
//! differently.

use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone)]
pub struct FileSnapshot {
    /// Path relative to the working tree root, unique within a commit
    path: String,
    /// File content, present only while staged
    content: Option<String>,
    /// Content hash, derived from content and path
    oid: ObjectId,
}

impl FileSnapshot {
    /// Create a staged snapshot and compute its hash
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        let oid = Self::hash_content(&path, &content);

        FileSnapshot {
            path,
            content: Some(content),
            oid,
        }
    }

    /// Create a trimmed snapshot that only references its blob
    pub fn trimmed(path: impl Into<String>, oid: ObjectId) -> Self {
        FileSnapshot {
            path: path.into(),
            content: None,
            oid,
        }
    }

    pub fn hash_content(path: &str, content: &str) -> ObjectId {
        ObjectId::digest(format!("{content}{path}"))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn is_trimmed(&self) -> bool {
        self.content.is_none()
    }

    /// Replace the content and recompute the hash
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.oid = Self::hash_content(&self.path, &content);
        self.content = Some(content);
    }

    /// Copy of this snapshot with the content dropped
    pub fn to_trimmed(&self) -> Self {
        Self::trimmed(self.path.clone(), self.oid.clone())
    }
}

/// Snapshots with equal hashes are the same file content for merge purposes
impl PartialEq for FileSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.oid == other.oid
    }
}

impl Eq for FileSnapshot {}
