//! Data structures and algorithms
//!
//! - `branch`: Branch names and branch references
//! - `log`: Commit history traversal
//! - `merge`: Merge base search and three-way merge
//! - `objects`: Object types (file snapshot, Merkle tree, commit)

pub mod branch;
pub mod log;
pub mod merge;
pub mod objects;
