//! Commit record
//!
//! Commits are immutable nodes of the commit DAG. They contain:
//! - The Merkle root hash of their file set
//! - Trimmed file snapshots (path + content hash, no content)
//! - Up to two parent commit IDs (two only for merge commits)
//! - Author, timestamp and message
//!
//! ## Identity
//!
//! ```text
//! id = sha1(<message><author><timestamp><tree hash><parent1><parent2>)
//! ```
//!
//! The timestamp is rendered as RFC 3339 with nanoseconds, which keeps ids
//! of otherwise identical commits apart.

use crate::artifacts::objects::file_snapshot::FileSnapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeHash;
use chrono::{DateTime, FixedOffset, SecondsFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    id: ObjectId,
    message: String,
    author: String,
    timestamp: DateTime<FixedOffset>,
    tree_hash: TreeHash,
    /// Trimmed snapshots in staging order
    files: Vec<FileSnapshot>,
    parent1: Option<ObjectId>,
    /// Present only for merge commits
    parent2: Option<ObjectId>,
}

impl CommitRecord {
    /// Create a new commit
    ///
    /// File snapshots are trimmed before being kept, so the record never
    /// holds file content.
    ///
    /// # Arguments
    ///
    /// * `message` - Commit message
    /// * `author` - Author name
    /// * `timestamp` - Commit time
    /// * `tree_hash` - Merkle root of the staged files
    /// * `files` - Staged snapshots
    /// * `parent1` - Previous head of the branch (None for a root commit)
    /// * `parent2` - Merged-in head (merge commits only)
    pub fn new(
        message: String,
        author: String,
        timestamp: DateTime<FixedOffset>,
        tree_hash: TreeHash,
        files: &[FileSnapshot],
        parent1: Option<ObjectId>,
        parent2: Option<ObjectId>,
    ) -> Self {
        let id = Self::compute_id(
            &message,
            &author,
            &timestamp,
            &tree_hash,
            parent1.as_ref(),
            parent2.as_ref(),
        );

        CommitRecord {
            id,
            message,
            author,
            timestamp,
            tree_hash,
            files: files.iter().map(FileSnapshot::to_trimmed).collect(),
            parent1,
            parent2,
        }
    }

    fn compute_id(
        message: &str,
        author: &str,
        timestamp: &DateTime<FixedOffset>,
        tree_hash: &TreeHash,
        parent1: Option<&ObjectId>,
        parent2: Option<&ObjectId>,
    ) -> ObjectId {
        let mut content = format!(
            "{}{}{}{}",
            message,
            author,
            timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            tree_hash
        );
        for parent in [parent1, parent2].into_iter().flatten() {
            content.push_str(parent.as_ref());
        }

        ObjectId::digest(content)
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn tree_hash(&self) -> &TreeHash {
        &self.tree_hash
    }

    pub fn files(&self) -> &[FileSnapshot] {
        &self.files
    }

    pub fn parent1(&self) -> Option<&ObjectId> {
        self.parent1.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    /// Parents in traversal order: first parent, then the merged-in parent
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent1.iter().chain(self.parent2.iter())
    }

    pub fn is_merge_commit(&self) -> bool {
        self.parent1.is_some() && self.parent2.is_some()
    }
}
