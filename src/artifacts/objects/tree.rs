//! Merkle tree over a set of staged files
//!
//! The tree summarises a file set with a single root hash. Each staged file
//! becomes a blob leaf hashed from its content; the root hashes the sorted
//! list of `(leaf hash, name)` pairs.
//!
//! ## Format
//!
//! Leaf: `sha1("blob <size>\0<content>")`
//! Root: `sha1("tree " + <hash><name> for each child sorted by name)`
//!
//! Children are sorted by name, so the root hash does not depend on the order
//! files were staged in. An empty file set has no root hash and is rendered as
//! the `empty_tree` sentinel.

use crate::artifacts::objects::file_snapshot::FileSnapshot;
use crate::artifacts::objects::object_id::ObjectId;

/// Sentinel rendered for a commit with no files
pub const EMPTY_TREE: &str = "empty_tree";

/// Root hash of a commit's file set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TreeHash {
    Empty,
    Root(ObjectId),
}

impl TreeHash {
    pub fn is_empty(&self) -> bool {
        matches!(self, TreeHash::Empty)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TreeHash::Empty => EMPTY_TREE,
            TreeHash::Root(oid) => oid.as_ref(),
        }
    }
}

impl std::fmt::Display for TreeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Blob,
    Tree,
}

#[derive(Debug, Clone)]
pub struct MerkleNode {
    name: String,
    hash: ObjectId,
    kind: NodeKind,
    /// Sorted by name, only populated for tree nodes
    children: Vec<MerkleNode>,
}

impl MerkleNode {
    fn blob(snapshot: &FileSnapshot) -> Self {
        let content = snapshot.content().unwrap_or_default();
        let header = format!("blob {}\0", content.len());

        MerkleNode {
            name: snapshot.path().to_string(),
            hash: ObjectId::digest(format!("{header}{content}")),
            kind: NodeKind::Blob,
            children: Vec::new(),
        }
    }

    fn tree(name: &str, mut children: Vec<MerkleNode>) -> Self {
        // stable sort keeps the result independent of insertion order
        children.sort_by(|a, b| a.name.cmp(&b.name));

        let combined = children
            .iter()
            .fold(String::from("tree "), |mut acc, child| {
                acc.push_str(child.hash.as_ref());
                acc.push_str(&child.name);
                acc
            });

        MerkleNode {
            name: name.to_string(),
            hash: ObjectId::digest(combined),
            kind: NodeKind::Tree,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash(&self) -> &ObjectId {
        &self.hash
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[MerkleNode] {
        &self.children
    }
}

/// Merkle tree built fresh for each hash computation
#[derive(Debug, Clone)]
pub struct MerkleTree {
    root: MerkleNode,
}

impl MerkleTree {
    /// Build a tree from staged snapshots
    ///
    /// Leaves are computed from snapshot content; a trimmed snapshot is hashed
    /// as empty content, so callers hash staged files only.
    pub fn build<'s>(files: impl IntoIterator<Item = &'s FileSnapshot>) -> Self {
        let leaves = files.into_iter().map(MerkleNode::blob).collect::<Vec<_>>();

        MerkleTree {
            root: MerkleNode::tree("root", leaves),
        }
    }

    /// Convenience wrapper returning only the root hash
    pub fn hash<'s>(files: impl IntoIterator<Item = &'s FileSnapshot>) -> TreeHash {
        Self::build(files).root_hash()
    }

    pub fn root(&self) -> &MerkleNode {
        &self.root
    }

    pub fn root_hash(&self) -> TreeHash {
        if self.root.children.is_empty() {
            TreeHash::Empty
        } else {
            TreeHash::Root(self.root.hash.clone())
        }
    }
}
